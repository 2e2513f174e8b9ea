use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::auth::permissions::require_user;
use crate::gql::error::{DbResultExt, ResultExt};
use crate::gql::types::{PaginatedResponse, PaginationInput};
use crate::state::AppState;
use infra::repos::sports_professionals::{self, CreateProfessionalData, ProfessionalFilter};

use super::service;
use super::types::{ProfessionalDraft, SportsProfessional, SubmitProfessionalInput};

#[derive(Default)]
pub struct ProfessionalQuery;

#[Object]
impl ProfessionalQuery {
    /// Public directory of sports professionals.
    async fn sports_professionals(
        &self,
        ctx: &Context<'_>,
        sport: Option<String>,
        city: Option<String>,
        pagination: Option<PaginationInput>,
    ) -> Result<PaginatedResponse<SportsProfessional>> {
        let state = ctx.data::<AppState>()?;

        let filter = ProfessionalFilter { sport, city };
        let limit_offset = pagination.unwrap_or_default().to_limit_offset();

        let (rows, total_count) = tokio::try_join!(
            sports_professionals::list(&state.db, filter.clone(), limit_offset),
            sports_professionals::count(&state.db, filter)
        )
        .db_err()?;

        let items: Vec<SportsProfessional> =
            rows.into_iter().map(SportsProfessional::from).collect();

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

    /// The authenticated user's autosaved wizard draft, if any.
    async fn my_professional_draft(&self, ctx: &Context<'_>) -> Result<Option<ProfessionalDraft>> {
        let user = require_user(ctx).await?;
        let user_id = Uuid::parse_str(user.id.as_str()).gql_err("Invalid user ID")?;

        let state = ctx.data::<AppState>()?;
        let row = sports_professionals::get_draft(&state.db, user_id)
            .await
            .db_err()?;

        Ok(row.map(ProfessionalDraft::from))
    }
}

#[derive(Default)]
pub struct ProfessionalMutation;

#[Object]
impl ProfessionalMutation {
    /// Autosave one wizard step. Subsequent saves replace the draft.
    async fn save_professional_draft(
        &self,
        ctx: &Context<'_>,
        step: i32,
        payload: serde_json::Value,
    ) -> Result<ProfessionalDraft> {
        let user = require_user(ctx).await?;
        let user_id = Uuid::parse_str(user.id.as_str()).gql_err("Invalid user ID")?;

        let state = ctx.data::<AppState>()?;
        let row = sports_professionals::save_draft(&state.db, user_id, step, payload)
            .await
            .db_err()?;

        Ok(ProfessionalDraft::from(row))
    }

    /// Finish the wizard: create the directory profile, promote the user's
    /// role, and drop the draft, atomically.
    async fn submit_professional_registration(
        &self,
        ctx: &Context<'_>,
        input: SubmitProfessionalInput,
    ) -> Result<SportsProfessional> {
        let user = require_user(ctx).await?;
        let user_id = Uuid::parse_str(user.id.as_str()).gql_err("Invalid user ID")?;

        let state = ctx.data::<AppState>()?;
        let profile = service::submit_registration(
            &state.db,
            CreateProfessionalData {
                user_id,
                sport: input.sport,
                bio: input.bio,
                city: input.city,
                hourly_rate_cents: input.hourly_rate_cents,
                years_experience: input.years_experience,
                certifications: input.certifications,
            },
        )
        .await?;

        Ok(SportsProfessional::from(profile))
    }
}
