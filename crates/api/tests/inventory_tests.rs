mod common;

use api::gql::build_schema;
use async_graphql::Variables;
use common::*;
use serde_json::json;

const ALLOCATE: &str = r#"
    mutation Allocate($groundId: UUID!, $itemId: UUID!, $quantity: Int!) {
        allocateInventory(groundId: $groundId, itemId: $itemId, quantity: $quantity) {
            quantity
        }
    }
"#;

const USE_ITEMS: &str = r#"
    mutation UseItems($groundId: UUID!, $itemId: UUID!, $quantity: Int!) {
        useInventoryItems(groundId: $groundId, itemId: $itemId, quantity: $quantity) {
            quantity
        }
    }
"#;

#[tokio::test]
#[ignore = "requires a Postgres instance via TEST_DATABASE_URL"]
async fn allocation_accumulates_and_consumption_decrements() {
    let app_state = setup_test_db().await;
    let schema = build_schema(app_state.clone());

    let unique = unique_suffix();
    let (owner_id, owner_claims) = create_test_user(
        &app_state,
        &format!("inv_owner_{unique}@test.com"),
        "ground_owner",
    )
    .await;
    let ground_id = create_test_ground(&app_state, owner_id, "Stocked Grounds").await;
    let item_id = create_test_item(&app_state, &format!("Cricket Ball {unique}")).await;

    let vars = |quantity: i32| {
        Variables::from_json(json!({
            "groundId": ground_id.to_string(),
            "itemId": item_id.to_string(),
            "quantity": quantity,
        }))
    };

    // Two allocations to the same (ground, item) pair accumulate
    let response = execute_graphql(&schema, ALLOCATE, Some(vars(10)), Some(owner_claims.clone())).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let response = execute_graphql(&schema, ALLOCATE, Some(vars(5)), Some(owner_claims.clone())).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    assert_eq!(data["allocateInventory"]["quantity"], 15);

    // Consumption decrements
    let response = execute_graphql(&schema, USE_ITEMS, Some(vars(6)), Some(owner_claims)).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    assert_eq!(data["useInventoryItems"]["quantity"], 9);
}

#[tokio::test]
#[ignore = "requires a Postgres instance via TEST_DATABASE_URL"]
async fn consumption_beyond_stock_is_rejected_without_change() {
    let app_state = setup_test_db().await;
    let schema = build_schema(app_state.clone());

    let unique = unique_suffix();
    let (owner_id, owner_claims) = create_test_user(
        &app_state,
        &format!("short_owner_{unique}@test.com"),
        "ground_owner",
    )
    .await;
    let ground_id = create_test_ground(&app_state, owner_id, "Short Stock").await;
    let item_id = create_test_item(&app_state, &format!("Net {unique}")).await;

    let vars = |quantity: i32| {
        Variables::from_json(json!({
            "groundId": ground_id.to_string(),
            "itemId": item_id.to_string(),
            "quantity": quantity,
        }))
    };

    let response = execute_graphql(&schema, ALLOCATE, Some(vars(3)), Some(owner_claims.clone())).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let response = execute_graphql(&schema, USE_ITEMS, Some(vars(4)), Some(owner_claims.clone())).await;
    assert!(!response.errors.is_empty(), "Over-consumption must fail");
    assert!(
        response.errors[0].message.contains("Insufficient stock"),
        "unexpected error: {}",
        response.errors[0].message
    );

    // Stock is untouched by the failed consumption
    let quantity: i32 = sqlx::query_scalar(
        "SELECT quantity FROM ground_inventory WHERE ground_id = $1 AND item_id = $2",
    )
    .bind(ground_id)
    .bind(item_id)
    .fetch_one(&app_state.db)
    .await
    .unwrap();
    assert_eq!(quantity, 3);
}

#[tokio::test]
#[ignore = "requires a Postgres instance via TEST_DATABASE_URL"]
async fn non_owner_cannot_touch_ground_inventory() {
    let app_state = setup_test_db().await;
    let schema = build_schema(app_state.clone());

    let unique = unique_suffix();
    let (owner_id, _) = create_test_user(
        &app_state,
        &format!("perm_owner_{unique}@test.com"),
        "ground_owner",
    )
    .await;
    let (_, other_claims) = create_test_user(
        &app_state,
        &format!("perm_other_{unique}@test.com"),
        "ground_owner",
    )
    .await;
    let ground_id = create_test_ground(&app_state, owner_id, "Private Stock").await;
    let item_id = create_test_item(&app_state, &format!("Bat {unique}")).await;

    let response = execute_graphql(
        &schema,
        ALLOCATE,
        Some(Variables::from_json(json!({
            "groundId": ground_id.to_string(),
            "itemId": item_id.to_string(),
            "quantity": 2,
        }))),
        Some(other_claims),
    )
    .await;
    assert!(!response.errors.is_empty());
    assert!(response.errors[0].message.contains("Access denied"));
}
