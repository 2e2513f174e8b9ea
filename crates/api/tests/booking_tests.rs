mod common;

use api::gql::build_schema;
use async_graphql::Variables;
use chrono::NaiveDate;
use common::*;
use serde_json::json;

const CREATE_BOOKING: &str = r#"
    mutation CreateBooking($input: CreateBookingInput!) {
        createBooking(input: $input) {
            id
            bookingStatus
            paymentStatus
            totalAmountCents
            groundName
            slots {
                id
                startTime
                isBooked
            }
        }
    }
"#;

#[tokio::test]
#[ignore = "requires a Postgres instance via TEST_DATABASE_URL"]
async fn booking_two_slots_sums_prices_and_marks_slots_booked() {
    let app_state = setup_test_db().await;
    let schema = build_schema(app_state.clone());

    let unique = unique_suffix();
    let (owner_id, _) = create_test_user(
        &app_state,
        &format!("owner_{unique}@test.com"),
        "ground_owner",
    )
    .await;
    let (_, player_claims) =
        create_test_user(&app_state, &format!("player_{unique}@test.com"), "user").await;

    let ground_id = create_test_ground(&app_state, owner_id, "Sunrise Arena").await;
    let date = NaiveDate::from_ymd_opt(2026, 9, 15).unwrap();
    // Two slots at Rs. 500.00 each
    let slot_ids = create_test_slots(&app_state, ground_id, date, 9, 2, 50000).await;

    let variables = Variables::from_json(json!({
        "input": {
            "groundId": ground_id.to_string(),
            "slotDate": date.to_string(),
            "slotIds": slot_ids.iter().map(|id| id.to_string()).collect::<Vec<_>>(),
        }
    }));

    let response = execute_graphql(&schema, CREATE_BOOKING, Some(variables), Some(player_claims)).await;
    assert!(
        response.errors.is_empty(),
        "Booking should succeed: {:?}",
        response.errors
    );

    let data = response.data.into_json().unwrap();
    let booking = &data["createBooking"];

    assert_eq!(booking["totalAmountCents"], 100_000);
    assert_eq!(booking["bookingStatus"], "PENDING");
    assert_eq!(booking["paymentStatus"], "PENDING");
    assert_eq!(booking["groundName"], "Sunrise Arena");
    assert_eq!(booking["slots"].as_array().unwrap().len(), 2);
    for slot in booking["slots"].as_array().unwrap() {
        assert_eq!(slot["isBooked"], true);
    }

    // Both slots are gone from availability
    let avail = execute_graphql(
        &schema,
        r#"query($groundId: UUID!, $date: NaiveDate!) {
            availableTimeSlots(groundId: $groundId, date: $date) { id }
        }"#,
        Some(Variables::from_json(json!({
            "groundId": ground_id.to_string(),
            "date": date.to_string(),
        }))),
        None,
    )
    .await;
    assert!(avail.errors.is_empty(), "{:?}", avail.errors);
    let avail = avail.data.into_json().unwrap();
    assert_eq!(avail["availableTimeSlots"].as_array().unwrap().len(), 0);
}

#[tokio::test]
#[ignore = "requires a Postgres instance via TEST_DATABASE_URL"]
async fn overlapping_booking_fails_atomically() {
    let app_state = setup_test_db().await;
    let schema = build_schema(app_state.clone());

    let unique = unique_suffix();
    let (owner_id, _) = create_test_user(
        &app_state,
        &format!("conf_owner_{unique}@test.com"),
        "ground_owner",
    )
    .await;
    let (_, first_claims) =
        create_test_user(&app_state, &format!("conf_first_{unique}@test.com"), "user").await;
    let (_, second_claims) =
        create_test_user(&app_state, &format!("conf_second_{unique}@test.com"), "user").await;

    let ground_id = create_test_ground(&app_state, owner_id, "Conflict Park").await;
    let date = NaiveDate::from_ymd_opt(2026, 9, 16).unwrap();
    let slot_ids = create_test_slots(&app_state, ground_id, date, 10, 3, 40000).await;

    let vars = |ids: &[uuid::Uuid]| {
        Variables::from_json(json!({
            "input": {
                "groundId": ground_id.to_string(),
                "slotDate": date.to_string(),
                "slotIds": ids.iter().map(|id| id.to_string()).collect::<Vec<_>>(),
            }
        }))
    };

    // First booking takes the middle slot
    let response = execute_graphql(
        &schema,
        CREATE_BOOKING,
        Some(vars(&slot_ids[1..2])),
        Some(first_claims),
    )
    .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    // Second booking wants all three and must fail whole, not partially
    let response = execute_graphql(
        &schema,
        CREATE_BOOKING,
        Some(vars(&slot_ids)),
        Some(second_claims),
    )
    .await;
    assert!(!response.errors.is_empty(), "Conflicting booking must fail");
    assert!(
        response.errors[0].message.contains("no longer available"),
        "unexpected error: {}",
        response.errors[0].message
    );

    // The two free slots were not consumed by the failed attempt
    let remaining: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM time_slots WHERE ground_id = $1 AND NOT is_booked",
    )
    .bind(ground_id)
    .fetch_one(&app_state.db)
    .await
    .unwrap();
    assert_eq!(remaining, 2);

    // And no orphan booking row was written
    let bookings: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE ground_id = $1")
        .bind(ground_id)
        .fetch_one(&app_state.db)
        .await
        .unwrap();
    assert_eq!(bookings, 1);
}

#[tokio::test]
#[ignore = "requires a Postgres instance via TEST_DATABASE_URL"]
async fn payment_confirms_booking_and_rejects_double_completion() {
    let app_state = setup_test_db().await;
    let schema = build_schema(app_state.clone());

    let unique = unique_suffix();
    let (owner_id, _) = create_test_user(
        &app_state,
        &format!("pay_owner_{unique}@test.com"),
        "ground_owner",
    )
    .await;
    let (_, player_claims) =
        create_test_user(&app_state, &format!("pay_player_{unique}@test.com"), "user").await;

    let ground_id = create_test_ground(&app_state, owner_id, "Payment Grounds").await;
    let date = NaiveDate::from_ymd_opt(2026, 9, 17).unwrap();
    let slot_ids = create_test_slots(&app_state, ground_id, date, 8, 1, 30000).await;

    let response = execute_graphql(
        &schema,
        CREATE_BOOKING,
        Some(Variables::from_json(json!({
            "input": {
                "groundId": ground_id.to_string(),
                "slotDate": date.to_string(),
                "slotIds": [slot_ids[0].to_string()],
            }
        }))),
        Some(player_claims.clone()),
    )
    .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let booking_id = response.data.into_json().unwrap()["createBooking"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let complete = r#"
        mutation CompletePayment($bookingId: UUID!) {
            completePayment(bookingId: $bookingId) {
                bookingStatus
                paymentStatus
            }
        }
    "#;
    let vars = || Variables::from_json(json!({ "bookingId": booking_id }));

    let response = execute_graphql(&schema, complete, Some(vars()), Some(player_claims.clone())).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    assert_eq!(data["completePayment"]["bookingStatus"], "CONFIRMED");
    assert_eq!(data["completePayment"]["paymentStatus"], "COMPLETED");

    // Second completion: booking is no longer pending
    let response = execute_graphql(&schema, complete, Some(vars()), Some(player_claims)).await;
    assert!(!response.errors.is_empty());
    assert!(response.errors[0].message.contains("not pending"));
}

#[tokio::test]
#[ignore = "requires a Postgres instance via TEST_DATABASE_URL"]
async fn cancellation_releases_slots_for_rebooking() {
    let app_state = setup_test_db().await;
    let schema = build_schema(app_state.clone());

    let unique = unique_suffix();
    let (owner_id, _) = create_test_user(
        &app_state,
        &format!("cxl_owner_{unique}@test.com"),
        "ground_owner",
    )
    .await;
    let (_, first_claims) =
        create_test_user(&app_state, &format!("cxl_first_{unique}@test.com"), "user").await;
    let (_, second_claims) =
        create_test_user(&app_state, &format!("cxl_second_{unique}@test.com"), "user").await;

    let ground_id = create_test_ground(&app_state, owner_id, "Release Field").await;
    let date = NaiveDate::from_ymd_opt(2026, 9, 18).unwrap();
    let slot_ids = create_test_slots(&app_state, ground_id, date, 14, 1, 25000).await;

    let booking_vars = || {
        Variables::from_json(json!({
            "input": {
                "groundId": ground_id.to_string(),
                "slotDate": date.to_string(),
                "slotIds": [slot_ids[0].to_string()],
            }
        }))
    };

    let response = execute_graphql(
        &schema,
        CREATE_BOOKING,
        Some(booking_vars()),
        Some(first_claims.clone()),
    )
    .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let booking_id = response.data.into_json().unwrap()["createBooking"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let cancel = r#"
        mutation CancelBooking($bookingId: UUID!) {
            cancelBooking(bookingId: $bookingId) {
                bookingStatus
                paymentStatus
            }
        }
    "#;

    let response = execute_graphql(
        &schema,
        cancel,
        Some(Variables::from_json(json!({ "bookingId": booking_id }))),
        Some(first_claims.clone()),
    )
    .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    assert_eq!(data["cancelBooking"]["bookingStatus"], "CANCELLED");
    assert_eq!(data["cancelBooking"]["paymentStatus"], "CANCELLED");

    // Cancelling again is a no-op, not an error
    let response = execute_graphql(
        &schema,
        cancel,
        Some(Variables::from_json(json!({ "bookingId": booking_id }))),
        Some(first_claims),
    )
    .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    // The slot is bookable again by someone else
    let response = execute_graphql(
        &schema,
        CREATE_BOOKING,
        Some(booking_vars()),
        Some(second_claims),
    )
    .await;
    assert!(
        response.errors.is_empty(),
        "Released slot should be bookable: {:?}",
        response.errors
    );
}

#[tokio::test]
#[ignore = "requires a Postgres instance via TEST_DATABASE_URL"]
async fn guest_booking_requires_name_and_phone() {
    let app_state = setup_test_db().await;
    let schema = build_schema(app_state.clone());

    let unique = unique_suffix();
    let (owner_id, _) = create_test_user(
        &app_state,
        &format!("guest_owner_{unique}@test.com"),
        "ground_owner",
    )
    .await;

    let ground_id = create_test_ground(&app_state, owner_id, "Guest Grounds").await;
    let date = NaiveDate::from_ymd_opt(2026, 9, 19).unwrap();
    let slot_ids = create_test_slots(&app_state, ground_id, date, 11, 1, 20000).await;

    // No claims and no guest identity: rejected before touching the DB
    let response = execute_graphql(
        &schema,
        CREATE_BOOKING,
        Some(Variables::from_json(json!({
            "input": {
                "groundId": ground_id.to_string(),
                "slotDate": date.to_string(),
                "slotIds": [slot_ids[0].to_string()],
            }
        }))),
        None,
    )
    .await;
    assert!(!response.errors.is_empty());
    assert!(response.errors[0].message.contains("name and phone"));

    // With guest identity the anonymous booking goes through
    let response = execute_graphql(
        &schema,
        CREATE_BOOKING,
        Some(Variables::from_json(json!({
            "input": {
                "groundId": ground_id.to_string(),
                "slotDate": date.to_string(),
                "slotIds": [slot_ids[0].to_string()],
                "guestName": "Walk-in Guest",
                "guestPhone": "8888888888",
            }
        }))),
        None,
    )
    .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
}

#[tokio::test]
#[ignore = "requires a Postgres instance via TEST_DATABASE_URL"]
async fn my_bookings_returns_slots_in_one_page() {
    let app_state = setup_test_db().await;
    let schema = build_schema(app_state.clone());

    let unique = unique_suffix();
    let (owner_id, _) = create_test_user(
        &app_state,
        &format!("hist_owner_{unique}@test.com"),
        "ground_owner",
    )
    .await;
    let (_, player_claims) =
        create_test_user(&app_state, &format!("hist_player_{unique}@test.com"), "user").await;

    let ground_id = create_test_ground(&app_state, owner_id, "History Field").await;
    let date = NaiveDate::from_ymd_opt(2026, 9, 20).unwrap();
    let slot_ids = create_test_slots(&app_state, ground_id, date, 7, 4, 15000).await;

    for chunk in slot_ids.chunks(2) {
        let response = execute_graphql(
            &schema,
            CREATE_BOOKING,
            Some(Variables::from_json(json!({
                "input": {
                    "groundId": ground_id.to_string(),
                    "slotDate": date.to_string(),
                    "slotIds": chunk.iter().map(|id| id.to_string()).collect::<Vec<_>>(),
                }
            }))),
            Some(player_claims.clone()),
        )
        .await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
    }

    let response = execute_graphql(
        &schema,
        r#"query {
            myBookings {
                id
                totalAmountCents
                slots { startTime endTime }
            }
        }"#,
        None,
        Some(player_claims),
    )
    .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    let bookings = data["myBookings"].as_array().unwrap();
    assert_eq!(bookings.len(), 2);
    for booking in bookings {
        assert_eq!(booking["totalAmountCents"], 30_000);
        assert_eq!(booking["slots"].as_array().unwrap().len(), 2);
    }
}
