use sqlx::{PgExecutor, Result as SqlxResult};
use uuid::Uuid;

use crate::models::{ProfessionalDraftRow, SportsProfessionalRow};
use crate::pagination::LimitOffset;

#[derive(Debug, Clone, Default)]
pub struct ProfessionalFilter {
    pub sport: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateProfessionalData {
    pub user_id: Uuid,
    pub sport: String,
    pub bio: Option<String>,
    pub city: Option<String>,
    pub hourly_rate_cents: Option<i32>,
    pub years_experience: Option<i32>,
    pub certifications: Vec<String>,
}

const PRO_COLUMNS: &str = "id, user_id, sport, bio, city, hourly_rate_cents, years_experience, \
     certifications, created_at, updated_at";

pub async fn get_by_user<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
) -> SqlxResult<Option<SportsProfessionalRow>> {
    sqlx::query_as::<_, SportsProfessionalRow>(&format!(
        "SELECT {PRO_COLUMNS} FROM sports_professionals WHERE user_id = $1"
    ))
    .bind(user_id)
    .fetch_optional(executor)
    .await
}

pub async fn list<'e>(
    executor: impl PgExecutor<'e>,
    filter: ProfessionalFilter,
    page: LimitOffset,
) -> SqlxResult<Vec<SportsProfessionalRow>> {
    sqlx::query_as::<_, SportsProfessionalRow>(&format!(
        r#"
        SELECT {PRO_COLUMNS}
        FROM sports_professionals
        WHERE ($1::text IS NULL OR sport = $1)
          AND ($2::text IS NULL OR LOWER(city) = LOWER($2))
        ORDER BY created_at DESC
        LIMIT $3 OFFSET $4
        "#
    ))
    .bind(filter.sport)
    .bind(filter.city)
    .bind(page.limit)
    .bind(page.offset)
    .fetch_all(executor)
    .await
}

pub async fn count<'e>(
    executor: impl PgExecutor<'e>,
    filter: ProfessionalFilter,
) -> SqlxResult<i64> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM sports_professionals
        WHERE ($1::text IS NULL OR sport = $1)
          AND ($2::text IS NULL OR LOWER(city) = LOWER($2))
        "#,
    )
    .bind(filter.sport)
    .bind(filter.city)
    .fetch_one(executor)
    .await
}

pub async fn create<'e>(
    executor: impl PgExecutor<'e>,
    data: CreateProfessionalData,
) -> SqlxResult<SportsProfessionalRow> {
    sqlx::query_as::<_, SportsProfessionalRow>(&format!(
        r#"
        INSERT INTO sports_professionals
            (user_id, sport, bio, city, hourly_rate_cents, years_experience, certifications)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {PRO_COLUMNS}
        "#
    ))
    .bind(data.user_id)
    .bind(data.sport)
    .bind(data.bio)
    .bind(data.city)
    .bind(data.hourly_rate_cents)
    .bind(data.years_experience)
    .bind(data.certifications)
    .fetch_one(executor)
    .await
}

// Wizard draft autosave: one row per user, replaced on every save.

pub async fn get_draft<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
) -> SqlxResult<Option<ProfessionalDraftRow>> {
    sqlx::query_as::<_, ProfessionalDraftRow>(
        "SELECT user_id, step, payload, updated_at FROM professional_drafts WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(executor)
    .await
}

pub async fn save_draft<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
    step: i32,
    payload: serde_json::Value,
) -> SqlxResult<ProfessionalDraftRow> {
    sqlx::query_as::<_, ProfessionalDraftRow>(
        r#"
        INSERT INTO professional_drafts (user_id, step, payload, updated_at)
        VALUES ($1, $2, $3, NOW())
        ON CONFLICT (user_id)
        DO UPDATE SET step = EXCLUDED.step, payload = EXCLUDED.payload, updated_at = NOW()
        RETURNING user_id, step, payload, updated_at
        "#,
    )
    .bind(user_id)
    .bind(step)
    .bind(payload)
    .fetch_one(executor)
    .await
}

pub async fn delete_draft<'e>(executor: impl PgExecutor<'e>, user_id: Uuid) -> SqlxResult<bool> {
    let result = sqlx::query("DELETE FROM professional_drafts WHERE user_id = $1")
        .bind(user_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}
