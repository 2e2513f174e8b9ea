use sqlx::{PgExecutor, Result as SqlxResult};
use uuid::Uuid;

use crate::models::GroundRow;
use crate::pagination::LimitOffset;

#[derive(Debug, Clone, Default)]
pub struct GroundFilter {
    /// Only grounds offering this game.
    pub game: Option<String>,
    pub owner_id: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub struct CreateGroundData {
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub games: Vec<String>,
    pub facilities: Vec<String>,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateGroundData {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub games: Option<Vec<String>>,
    pub facilities: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
}

const GROUND_COLUMNS: &str = "id, owner_id, name, description, address, latitude, longitude, \
     games, facilities, images, rating, review_count, created_at, updated_at";

pub async fn get_by_id<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
) -> SqlxResult<Option<GroundRow>> {
    sqlx::query_as::<_, GroundRow>(&format!(
        "SELECT {GROUND_COLUMNS} FROM grounds WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(executor)
    .await
}

/// List grounds with an optional server-side game filter.
///
/// Uses the COALESCE pattern so one prepared statement covers every filter
/// combination. Geo filtering happens in the caller, on the fetched rows.
pub async fn list<'e>(
    executor: impl PgExecutor<'e>,
    filter: GroundFilter,
    page: LimitOffset,
) -> SqlxResult<Vec<GroundRow>> {
    sqlx::query_as::<_, GroundRow>(&format!(
        r#"
        SELECT {GROUND_COLUMNS}
        FROM grounds
        WHERE ($1::text IS NULL OR $1 = ANY(games))
          AND ($2::uuid IS NULL OR owner_id = $2)
        ORDER BY rating DESC, created_at DESC
        LIMIT $3 OFFSET $4
        "#
    ))
    .bind(filter.game)
    .bind(filter.owner_id)
    .bind(page.limit)
    .bind(page.offset)
    .fetch_all(executor)
    .await
}

pub async fn count<'e>(executor: impl PgExecutor<'e>, filter: GroundFilter) -> SqlxResult<i64> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM grounds
        WHERE ($1::text IS NULL OR $1 = ANY(games))
          AND ($2::uuid IS NULL OR owner_id = $2)
        "#,
    )
    .bind(filter.game)
    .bind(filter.owner_id)
    .fetch_one(executor)
    .await
}

pub async fn create<'e>(
    executor: impl PgExecutor<'e>,
    data: CreateGroundData,
) -> SqlxResult<GroundRow> {
    sqlx::query_as::<_, GroundRow>(&format!(
        r#"
        INSERT INTO grounds (owner_id, name, description, address, latitude, longitude,
                             games, facilities, images)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING {GROUND_COLUMNS}
        "#
    ))
    .bind(data.owner_id)
    .bind(data.name)
    .bind(data.description)
    .bind(data.address)
    .bind(data.latitude)
    .bind(data.longitude)
    .bind(data.games)
    .bind(data.facilities)
    .bind(data.images)
    .fetch_one(executor)
    .await
}

pub async fn update<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
    data: UpdateGroundData,
) -> SqlxResult<Option<GroundRow>> {
    sqlx::query_as::<_, GroundRow>(&format!(
        r#"
        UPDATE grounds
        SET name = COALESCE($2, name),
            description = COALESCE($3, description),
            address = COALESCE($4, address),
            latitude = COALESCE($5, latitude),
            longitude = COALESCE($6, longitude),
            games = COALESCE($7, games),
            facilities = COALESCE($8, facilities),
            images = COALESCE($9, images),
            updated_at = NOW()
        WHERE id = $1
        RETURNING {GROUND_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(data.name)
    .bind(data.description)
    .bind(data.address)
    .bind(data.latitude)
    .bind(data.longitude)
    .bind(data.games)
    .bind(data.facilities)
    .bind(data.images)
    .fetch_optional(executor)
    .await
}

pub async fn delete<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> SqlxResult<bool> {
    let result = sqlx::query("DELETE FROM grounds WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}
