use async_graphql::{Context, Error, Object, Result};
use uuid::Uuid;

use crate::auth::permissions::{require_admin, require_role};
use crate::gql::error::DbResultExt;
use crate::gql::types::{PaginatedResponse, PaginationInput, Role};
use crate::state::AppState;
use infra::repos::users::{self, UserFilter};

use super::types::User;

#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    /// Admin listing of users, with optional search and role/active filters.
    async fn users(
        &self,
        ctx: &Context<'_>,
        search: Option<String>,
        role: Option<Role>,
        is_active: Option<bool>,
        pagination: Option<PaginationInput>,
    ) -> Result<PaginatedResponse<User>> {
        require_admin(ctx).await?;

        let state = ctx.data::<AppState>()?;

        let filter = UserFilter {
            search,
            role: role.map(String::from),
            is_active,
        };
        let limit_offset = pagination.unwrap_or_default().to_limit_offset();

        let (rows, total_count) = tokio::try_join!(
            users::list(&state.db, filter.clone(), limit_offset),
            users::count(&state.db, filter)
        )
        .db_err()?;

        let items: Vec<User> = rows.into_iter().map(User::from).collect();

        let page_size = items.len() as i32;
        let offset = limit_offset.offset as i32;
        let has_next_page = (offset + limit_offset.limit as i32) < total_count as i32;

        Ok(PaginatedResponse {
            items,
            total_count: total_count as i32,
            page_size,
            offset,
            has_next_page,
        })
    }

    /// Fetch a single user by ID. Admin only.
    async fn user(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<User>> {
        require_admin(ctx).await?;

        let state = ctx.data::<AppState>()?;
        let row = users::get_by_id(&state.db, id)
            .await
            .db_err()?;

        Ok(row.map(User::from))
    }
}

#[derive(Default)]
pub struct UserMutation;

#[Object]
impl UserMutation {
    /// Change a user's role. Admins can assign any role below admin;
    /// granting admin or super admin requires a super admin.
    async fn update_user_role(&self, ctx: &Context<'_>, id: Uuid, role: Role) -> Result<User> {
        if matches!(role, Role::Admin | Role::SuperAdmin) {
            require_role(ctx, Role::SuperAdmin).await?;
        } else {
            require_admin(ctx).await?;
        }

        let state = ctx.data::<AppState>()?;
        let row = users::set_role(&state.db, id, &String::from(role))
            .await
            .db_err()?
            .ok_or_else(|| Error::new("User not found"))?;

        tracing::info!(user_id = %id, role = ?role, "User role updated");
        Ok(User::from(row))
    }
}
