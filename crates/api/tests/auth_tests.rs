mod common;

use api::error::AppError;
use api::routes::auth::{self, LoginRequest, RefreshRequest, RegisterRequest};
use axum::extract::State;
use axum::Json;
use common::*;

#[tokio::test]
#[ignore = "requires a Postgres instance via TEST_DATABASE_URL"]
async fn register_then_login_issues_tokens() {
    let app_state = setup_test_db().await;

    let unique = unique_suffix();
    let email = format!("reg_{unique}@test.com");

    let Json(tokens) = auth::register(
        State(app_state.clone()),
        Json(RegisterRequest {
            email: email.clone(),
            password: "correct-horse-battery".to_string(),
            name: "New Player".to_string(),
            phone: None,
        }),
    )
    .await
    .expect("registration should succeed");

    assert!(!tokens.access_token.is_empty());
    assert!(!tokens.refresh_token.is_empty());
    assert_eq!(tokens.token_type, "Bearer");

    // Duplicate registration conflicts
    let err = auth::register(
        State(app_state.clone()),
        Json(RegisterRequest {
            email: email.clone(),
            password: "correct-horse-battery".to_string(),
            name: "Imposter".to_string(),
            phone: None,
        }),
    )
    .await
    .err()
    .expect("duplicate email must be rejected");
    assert!(matches!(err, AppError::Conflict(_)));

    // Login with the right password works, wrong password does not
    let result = auth::login(
        State(app_state.clone()),
        Json(LoginRequest {
            email: email.clone(),
            password: "correct-horse-battery".to_string(),
        }),
    )
    .await;
    assert!(result.is_ok());

    let err = auth::login(
        State(app_state),
        Json(LoginRequest {
            email,
            password: "wrong-password".to_string(),
        }),
    )
    .await
    .err()
    .expect("wrong password must be rejected");
    assert!(matches!(err, AppError::Unauthorized(_)));
}

#[tokio::test]
#[ignore = "requires a Postgres instance via TEST_DATABASE_URL"]
async fn short_password_is_rejected() {
    let app_state = setup_test_db().await;

    let unique = unique_suffix();
    let err = auth::register(
        State(app_state),
        Json(RegisterRequest {
            email: format!("shortpw_{unique}@test.com"),
            password: "short".to_string(),
            name: "Short".to_string(),
            phone: None,
        }),
    )
    .await
    .err()
    .expect("short password must be rejected");
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
#[ignore = "requires a Postgres instance via TEST_DATABASE_URL"]
async fn refresh_rotation_detects_token_replay() {
    let app_state = setup_test_db().await;

    let unique = unique_suffix();
    let Json(tokens) = auth::register(
        State(app_state.clone()),
        Json(RegisterRequest {
            email: format!("rotate_{unique}@test.com"),
            password: "correct-horse-battery".to_string(),
            name: "Rotator".to_string(),
            phone: None,
        }),
    )
    .await
    .expect("registration should succeed");

    // Normal rotation: old token is spent, a new one comes back
    let Json(rotated) = auth::refresh(
        State(app_state.clone()),
        Json(RefreshRequest {
            refresh_token: tokens.refresh_token.clone(),
        }),
    )
    .await
    .expect("first refresh should succeed");
    assert_ne!(rotated.refresh_token, tokens.refresh_token);

    // Replaying the spent token trips theft detection and kills the family
    let err = auth::refresh(
        State(app_state.clone()),
        Json(RefreshRequest {
            refresh_token: tokens.refresh_token,
        }),
    )
    .await
    .err()
    .expect("replayed token must be rejected");
    assert!(matches!(err, AppError::Unauthorized(_)));

    // The freshly rotated token is dead too
    let err = auth::refresh(
        State(app_state),
        Json(RefreshRequest {
            refresh_token: rotated.refresh_token,
        }),
    )
    .await
    .err()
    .expect("family revocation must invalidate the rotated token");
    assert!(matches!(err, AppError::Unauthorized(_)));
}
