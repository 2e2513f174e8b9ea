mod common;

use api::gql::build_schema;
use async_graphql::Variables;
use common::*;
use serde_json::json;

const SAVE_DRAFT: &str = r#"
    mutation SaveDraft($step: Int!, $payload: JSON!) {
        saveProfessionalDraft(step: $step, payload: $payload) {
            step
            payload
        }
    }
"#;

const SUBMIT: &str = r#"
    mutation Submit($input: SubmitProfessionalInput!) {
        submitProfessionalRegistration(input: $input) {
            id
            sport
            city
            certifications
        }
    }
"#;

#[tokio::test]
#[ignore = "requires a Postgres instance via TEST_DATABASE_URL"]
async fn draft_autosave_survives_and_is_replaced() {
    let app_state = setup_test_db().await;
    let schema = build_schema(app_state.clone());

    let unique = unique_suffix();
    let (_, claims) =
        create_test_user(&app_state, &format!("draft_{unique}@test.com"), "user").await;

    let response = execute_graphql(
        &schema,
        SAVE_DRAFT,
        Some(Variables::from_json(json!({
            "step": 1,
            "payload": { "sport": "tennis" },
        }))),
        Some(claims.clone()),
    )
    .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    // A later step replaces the earlier draft, not appends
    let response = execute_graphql(
        &schema,
        SAVE_DRAFT,
        Some(Variables::from_json(json!({
            "step": 2,
            "payload": { "sport": "tennis", "city": "Pune" },
        }))),
        Some(claims.clone()),
    )
    .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let response = execute_graphql(
        &schema,
        r#"query { myProfessionalDraft { step payload } }"#,
        None,
        Some(claims),
    )
    .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    assert_eq!(data["myProfessionalDraft"]["step"], 2);
    assert_eq!(data["myProfessionalDraft"]["payload"]["city"], "Pune");
}

#[tokio::test]
#[ignore = "requires a Postgres instance via TEST_DATABASE_URL"]
async fn submission_promotes_role_and_clears_draft() {
    let app_state = setup_test_db().await;
    let schema = build_schema(app_state.clone());

    let unique = unique_suffix();
    let (user_id, claims) =
        create_test_user(&app_state, &format!("pro_{unique}@test.com"), "user").await;

    let response = execute_graphql(
        &schema,
        SAVE_DRAFT,
        Some(Variables::from_json(json!({
            "step": 3,
            "payload": { "sport": "cricket" },
        }))),
        Some(claims.clone()),
    )
    .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let response = execute_graphql(
        &schema,
        SUBMIT,
        Some(Variables::from_json(json!({
            "input": {
                "sport": "cricket",
                "city": "Mumbai",
                "hourlyRateCents": 150000,
                "yearsExperience": 8,
                "certifications": ["Level 2 Coach"],
            }
        }))),
        Some(claims.clone()),
    )
    .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    assert_eq!(data["submitProfessionalRegistration"]["sport"], "cricket");

    // Role was promoted
    let role: String = sqlx::query_scalar("SELECT role FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_one(&app_state.db)
        .await
        .unwrap();
    assert_eq!(role, "sports_professional");

    // Draft is gone
    let response = execute_graphql(
        &schema,
        r#"query { myProfessionalDraft { step } }"#,
        None,
        Some(claims.clone()),
    )
    .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    assert!(data["myProfessionalDraft"].is_null());

    // Resubmission is rejected
    let response = execute_graphql(
        &schema,
        SUBMIT,
        Some(Variables::from_json(json!({
            "input": { "sport": "cricket" }
        }))),
        Some(claims),
    )
    .await;
    assert!(!response.errors.is_empty());
    assert!(response.errors[0].message.contains("already exists"));

    // The failed resubmission left exactly one profile
    let profiles: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM sports_professionals WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&app_state.db)
            .await
            .unwrap();
    assert_eq!(profiles, 1);
}

#[tokio::test]
#[ignore = "requires a Postgres instance via TEST_DATABASE_URL"]
async fn directory_filters_by_sport_and_city() {
    let app_state = setup_test_db().await;
    let schema = build_schema(app_state.clone());

    let unique = unique_suffix();
    let sport = format!("padel_{unique}");

    for (i, city) in ["Pune", "Mumbai"].iter().enumerate() {
        let (_, claims) = create_test_user(
            &app_state,
            &format!("dir_{unique}_{i}@test.com"),
            "user",
        )
        .await;
        let response = execute_graphql(
            &schema,
            SUBMIT,
            Some(Variables::from_json(json!({
                "input": { "sport": sport, "city": city }
            }))),
            Some(claims),
        )
        .await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
    }

    let response = execute_graphql(
        &schema,
        r#"query($sport: String, $city: String) {
            sportsProfessionals(sport: $sport, city: $city) {
                totalCount
                items { city }
            }
        }"#,
        Some(Variables::from_json(json!({
            "sport": sport,
            "city": "pune",
        }))),
        None,
    )
    .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    // City match is case-insensitive
    assert_eq!(data["sportsProfessionals"]["totalCount"], 1);
    assert_eq!(data["sportsProfessionals"]["items"][0]["city"], "Pune");
}
