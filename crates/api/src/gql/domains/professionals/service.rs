use thiserror::Error;

use infra::models::SportsProfessionalRow;
use infra::repos::sports_professionals::{self, CreateProfessionalData};
use infra::repos::users;

#[derive(Debug, Error)]
pub enum ProfessionalError {
    #[error("A professional profile already exists for this user")]
    AlreadyRegistered,

    #[error("database error")]
    Db(#[from] sqlx::Error),
}

/// Finalize the registration wizard in one transaction: create the
/// directory entry, promote the user's role, drop the autosaved draft.
pub async fn submit_registration(
    pool: &sqlx::PgPool,
    data: CreateProfessionalData,
) -> Result<SportsProfessionalRow, ProfessionalError> {
    let user_id = data.user_id;

    let mut tx = pool.begin().await?;

    if sports_professionals::get_by_user(&mut *tx, user_id)
        .await?
        .is_some()
    {
        return Err(ProfessionalError::AlreadyRegistered);
    }

    let profile = sports_professionals::create(&mut *tx, data).await?;
    users::set_role(&mut *tx, user_id, "sports_professional").await?;
    sports_professionals::delete_draft(&mut *tx, user_id).await?;

    tx.commit().await?;

    tracing::info!(%user_id, profile_id = %profile.id, "Sports professional registered");
    Ok(profile)
}
