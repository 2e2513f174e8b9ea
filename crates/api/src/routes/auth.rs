use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::auth::{password, refresh};
use crate::error::AppError;
use crate::state::AppState;
use infra::repos::users::{self, CreateUserData};

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub phone: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    if body.password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let existing = users::get_credentials_by_email(&state.db, &body.email).await?;
    if existing.is_some() {
        return Err(AppError::Conflict(
            "An account with this email already exists".to_string(),
        ));
    }

    let password_hash = password::hash_password(&body.password)?;
    let user = users::create(
        &state.db,
        CreateUserData {
            email: body.email,
            password_hash,
            name: body.name,
            phone: body.phone,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, "New user registered");
    issue_tokens(&state, user.id, user.email, user.role).await
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let creds = users::get_credentials_by_email(&state.db, &body.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

    if !creds.is_active {
        return Err(AppError::Unauthorized("Account is deactivated".to_string()));
    }

    if !password::verify_password(&body.password, &creds.password_hash)? {
        return Err(AppError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    issue_tokens(&state, creds.id, creds.email, creds.role).await
}

pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let expiration_days = state.auth_config().refresh_token_expiration_days;
    let rotated =
        refresh::rotate_refresh_token(&state.db, &body.refresh_token, expiration_days).await?;

    let user = infra::repos::users::get_by_id(&state.db, rotated.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User no longer exists".to_string()))?;

    let access_token = state
        .jwt_service()
        .create_token(user.id, user.email, user.role)?;

    Ok(Json(TokenResponse {
        access_token,
        refresh_token: rotated.new_raw_token,
        token_type: "Bearer",
    }))
}

async fn issue_tokens(
    state: &AppState,
    user_id: uuid::Uuid,
    email: String,
    role: String,
) -> Result<Json<TokenResponse>, AppError> {
    let access_token = state.jwt_service().create_token(user_id, email, role)?;
    let refresh_token = refresh::create_refresh_token(
        &state.db,
        user_id,
        state.auth_config().refresh_token_expiration_days,
    )
    .await?;

    Ok(Json(TokenResponse {
        access_token,
        refresh_token,
        token_type: "Bearer",
    }))
}
