use chrono::{Duration, Utc};
use rand::distr::Alphanumeric;
use rand::RngExt;
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;

pub struct RotateResult {
    pub user_id: Uuid,
    pub new_raw_token: String,
}

pub fn hash_token(raw: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn generate_raw_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

pub async fn create_refresh_token(
    pool: &PgPool,
    user_id: Uuid,
    expiration_days: u64,
) -> Result<String, AppError> {
    let raw_token = generate_raw_token();
    let token_hash = hash_token(&raw_token);
    let family_id = Uuid::new_v4();
    let expires_at = Utc::now() + Duration::days(expiration_days as i64);

    infra::repos::refresh_tokens::create(pool, &token_hash, user_id, family_id, expires_at)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create refresh token: {}", e)))?;

    Ok(raw_token)
}

/// Rotate a refresh token: revoke the presented one, mint a new one in the
/// same family. Replay of an already-revoked token revokes the whole family
/// (theft detection).
pub async fn rotate_refresh_token(
    pool: &PgPool,
    raw_token: &str,
    expiration_days: u64,
) -> Result<RotateResult, AppError> {
    let token_hash = hash_token(raw_token);

    let existing = infra::repos::refresh_tokens::find_by_hash(pool, &token_hash)
        .await
        .map_err(AppError::Db)?;

    match existing {
        Some(token_row) => {
            infra::repos::refresh_tokens::revoke(pool, token_row.id)
                .await
                .map_err(AppError::Db)?;

            let new_raw = generate_raw_token();
            let new_hash = hash_token(&new_raw);
            let expires_at = Utc::now() + Duration::days(expiration_days as i64);

            infra::repos::refresh_tokens::create(
                pool,
                &new_hash,
                token_row.user_id,
                token_row.family_id,
                expires_at,
            )
            .await
            .map_err(AppError::Db)?;

            Ok(RotateResult {
                user_id: token_row.user_id,
                new_raw_token: new_raw,
            })
        }
        None => {
            let was_revoked = infra::repos::refresh_tokens::is_revoked(pool, &token_hash)
                .await
                .map_err(AppError::Db)?;

            if was_revoked {
                if let Some(family_id) = infra::repos::refresh_tokens::family_of(pool, &token_hash)
                    .await
                    .map_err(AppError::Db)?
                {
                    let revoked =
                        infra::repos::refresh_tokens::revoke_family(pool, family_id).await?;
                    tracing::warn!(
                        %family_id,
                        revoked,
                        "Revoked refresh token replayed; family invalidated"
                    );
                }
            }

            Err(AppError::Unauthorized(
                "Invalid or expired refresh token".to_string(),
            ))
        }
    }
}
