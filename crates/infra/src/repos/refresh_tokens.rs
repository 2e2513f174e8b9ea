use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, Result as SqlxResult};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RefreshTokenRow {
    pub id: Uuid,
    pub token_hash: String,
    pub user_id: Uuid,
    pub family_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

pub async fn create<'e>(
    executor: impl PgExecutor<'e>,
    token_hash: &str,
    user_id: Uuid,
    family_id: Uuid,
    expires_at: DateTime<Utc>,
) -> SqlxResult<Uuid> {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO refresh_tokens (token_hash, user_id, family_id, expires_at) \
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(token_hash)
    .bind(user_id)
    .bind(family_id)
    .bind(expires_at)
    .fetch_one(executor)
    .await
}

/// Active (unrevoked, unexpired) token lookup.
pub async fn find_by_hash<'e>(
    executor: impl PgExecutor<'e>,
    token_hash: &str,
) -> SqlxResult<Option<RefreshTokenRow>> {
    sqlx::query_as::<_, RefreshTokenRow>(
        "SELECT id, token_hash, user_id, family_id, expires_at, revoked_at, created_at \
         FROM refresh_tokens \
         WHERE token_hash = $1 AND revoked_at IS NULL AND expires_at > NOW()",
    )
    .bind(token_hash)
    .fetch_optional(executor)
    .await
}

/// Whether this hash belongs to an already-revoked token (reuse signal).
pub async fn is_revoked<'e>(executor: impl PgExecutor<'e>, token_hash: &str) -> SqlxResult<bool> {
    let row: Option<i32> = sqlx::query_scalar(
        "SELECT 1 FROM refresh_tokens WHERE token_hash = $1 AND revoked_at IS NOT NULL",
    )
    .bind(token_hash)
    .fetch_optional(executor)
    .await?;

    Ok(row.is_some())
}

pub async fn revoke<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> SqlxResult<()> {
    sqlx::query("UPDATE refresh_tokens SET revoked_at = NOW() WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(())
}

/// Revoke every token in a family. Used when a revoked token is replayed.
pub async fn revoke_family<'e>(executor: impl PgExecutor<'e>, family_id: Uuid) -> SqlxResult<u64> {
    let result = sqlx::query(
        "UPDATE refresh_tokens SET revoked_at = NOW() \
         WHERE family_id = $1 AND revoked_at IS NULL",
    )
    .bind(family_id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}

/// Lookup of the family for a (possibly revoked) hash, for theft handling.
pub async fn family_of<'e>(
    executor: impl PgExecutor<'e>,
    token_hash: &str,
) -> SqlxResult<Option<Uuid>> {
    sqlx::query_scalar::<_, Uuid>("SELECT family_id FROM refresh_tokens WHERE token_hash = $1")
        .bind(token_hash)
        .fetch_optional(executor)
        .await
}
