use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::auth::permissions::{require_ground_owner, require_role};
use crate::gql::error::{DbResultExt, ResultExt};
use crate::gql::subscriptions::remove_ground_channel;
use crate::gql::types::{PaginatedResponse, PaginationInput, Role};
use crate::state::AppState;
use infra::repos::grounds::{self, CreateGroundData, GroundFilter, UpdateGroundData};

use super::types::{CreateGroundInput, GeoFilterInput, Ground, UpdateGroundInput};

/// Whether a ground falls inside the radius filter. Plain Euclidean
/// distance over raw coordinates, as the original product computed it.
pub(crate) fn within_radius(latitude: f64, longitude: f64, filter: &GeoFilterInput) -> bool {
    let d_lat = latitude - filter.latitude;
    let d_lng = longitude - filter.longitude;
    (d_lat * d_lat + d_lng * d_lng).sqrt() <= filter.radius
}

#[derive(Default)]
pub struct GroundQuery;

#[Object]
impl GroundQuery {
    /// List grounds, optionally filtered by game and/or a geo radius.
    ///
    /// The game filter runs server-side; the radius filter is applied to
    /// the fetched page. `total_count` reflects the game filter only.
    async fn grounds(
        &self,
        ctx: &Context<'_>,
        game: Option<String>,
        near: Option<GeoFilterInput>,
        pagination: Option<PaginationInput>,
    ) -> Result<PaginatedResponse<Ground>> {
        let state = ctx.data::<AppState>()?;

        let filter = GroundFilter {
            game,
            owner_id: None,
        };
        let limit_offset = pagination.unwrap_or_default().to_limit_offset();

        let (rows, total_count) = tokio::try_join!(
            grounds::list(&state.db, filter.clone(), limit_offset),
            grounds::count(&state.db, filter)
        )
        .db_err()?;

        let items: Vec<Ground> = rows
            .into_iter()
            .filter(|g| match &near {
                Some(geo) => within_radius(g.latitude, g.longitude, geo),
                None => true,
            })
            .map(Ground::from)
            .collect();

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

    /// The game catalog, for populating the ground filter.
    async fn games(&self, ctx: &Context<'_>) -> Result<Vec<super::types::Game>> {
        let state = ctx.data::<AppState>()?;
        let rows = infra::repos::games::list(&state.db)
            .await
            .db_err()?;
        Ok(rows.into_iter().map(super::types::Game::from).collect())
    }

    /// Get a single ground by ID.
    async fn ground(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<Ground>> {
        let state = ctx.data::<AppState>()?;

        let row = grounds::get_by_id(&state.db, id)
            .await
            .db_err()?;

        Ok(row.map(Ground::from))
    }

    /// Grounds belonging to the authenticated ground owner.
    async fn my_grounds(&self, ctx: &Context<'_>) -> Result<Vec<Ground>> {
        let user = require_role(ctx, Role::GroundOwner).await?;
        let owner_id = Uuid::parse_str(user.id.as_str()).gql_err("Invalid user ID")?;

        let state = ctx.data::<AppState>()?;
        let rows = grounds::list(
            &state.db,
            GroundFilter {
                game: None,
                owner_id: Some(owner_id),
            },
            infra::pagination::LimitOffset::default(),
        )
        .await
        .db_err()?;

        Ok(rows.into_iter().map(Ground::from).collect())
    }
}

#[derive(Default)]
pub struct GroundMutation;

#[Object]
impl GroundMutation {
    /// Create a ground owned by the authenticated ground owner.
    async fn create_ground(&self, ctx: &Context<'_>, input: CreateGroundInput) -> Result<Ground> {
        let user = require_role(ctx, Role::GroundOwner).await?;
        let owner_id = Uuid::parse_str(user.id.as_str()).gql_err("Invalid user ID")?;

        let state = ctx.data::<AppState>()?;
        let row = grounds::create(
            &state.db,
            CreateGroundData {
                owner_id,
                name: input.name,
                description: input.description,
                address: input.address,
                latitude: input.latitude,
                longitude: input.longitude,
                games: input.games,
                facilities: input.facilities,
                images: input.images,
            },
        )
        .await
        .db_err()?;

        tracing::info!(ground_id = %row.id, %owner_id, "Ground created");
        Ok(Ground::from(row))
    }

    /// Update a ground. Owner of the ground or admin only.
    async fn update_ground(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        input: UpdateGroundInput,
    ) -> Result<Ground> {
        require_ground_owner(ctx, id).await?;

        let state = ctx.data::<AppState>()?;
        let row = grounds::update(
            &state.db,
            id,
            UpdateGroundData {
                name: input.name,
                description: input.description,
                address: input.address,
                latitude: input.latitude,
                longitude: input.longitude,
                games: input.games,
                facilities: input.facilities,
                images: input.images,
            },
        )
        .await
        .db_err()?
        .ok_or_else(|| async_graphql::Error::new("Ground not found"))?;

        Ok(Ground::from(row))
    }

    /// Add a game to the catalog. Admin only; re-adding an existing name
    /// returns the existing entry.
    async fn create_game(&self, ctx: &Context<'_>, name: String) -> Result<super::types::Game> {
        crate::auth::permissions::require_admin(ctx).await?;

        let state = ctx.data::<AppState>()?;
        let row = infra::repos::games::create(&state.db, &name)
            .await
            .db_err()?;

        Ok(super::types::Game::from(row))
    }

    /// Delete a ground. Owner of the ground or admin only.
    async fn delete_ground(&self, ctx: &Context<'_>, id: Uuid) -> Result<bool> {
        require_ground_owner(ctx, id).await?;

        let state = ctx.data::<AppState>()?;
        let deleted = grounds::delete(&state.db, id)
            .await
            .db_err()?;

        if deleted {
            remove_ground_channel(id);
            tracing::info!(ground_id = %id, "Ground deleted");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geo(latitude: f64, longitude: f64, radius: f64) -> GeoFilterInput {
        GeoFilterInput {
            latitude,
            longitude,
            radius,
        }
    }

    #[test]
    fn point_inside_radius_matches() {
        let filter = geo(12.97, 77.59, 0.1);
        assert!(within_radius(12.97, 77.59, &filter));
        assert!(within_radius(13.03, 77.65, &filter));
    }

    #[test]
    fn point_outside_radius_is_filtered() {
        let filter = geo(12.97, 77.59, 0.1);
        assert!(!within_radius(13.20, 77.59, &filter));
        assert!(!within_radius(12.97, 78.00, &filter));
    }

    #[test]
    fn boundary_point_counts_as_inside() {
        let filter = geo(0.0, 0.0, 5.0);
        assert!(within_radius(3.0, 4.0, &filter));
        assert!(!within_radius(3.0, 4.1, &filter));
    }
}
