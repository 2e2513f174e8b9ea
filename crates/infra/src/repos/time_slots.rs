use chrono::{NaiveDate, NaiveTime};
use sqlx::{PgExecutor, Result as SqlxResult};
use uuid::Uuid;

use crate::models::TimeSlotRow;

#[derive(Debug, Clone)]
pub struct CreateTimeSlotData {
    pub ground_id: Uuid,
    pub slot_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub price_cents: i32,
}

const SLOT_COLUMNS: &str = "id, ground_id, slot_date, start_time, end_time, price_cents, \
     is_booked, sports_area_id, created_at, updated_at";

pub async fn create<'e>(
    executor: impl PgExecutor<'e>,
    data: CreateTimeSlotData,
) -> SqlxResult<TimeSlotRow> {
    sqlx::query_as::<_, TimeSlotRow>(&format!(
        r#"
        INSERT INTO time_slots (ground_id, slot_date, start_time, end_time, price_cents)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {SLOT_COLUMNS}
        "#
    ))
    .bind(data.ground_id)
    .bind(data.slot_date)
    .bind(data.start_time)
    .bind(data.end_time)
    .bind(data.price_cents)
    .fetch_one(executor)
    .await
}

/// All unbooked slots for a ground on a date, ordered by start time.
pub async fn list_available<'e>(
    executor: impl PgExecutor<'e>,
    ground_id: Uuid,
    date: NaiveDate,
) -> SqlxResult<Vec<TimeSlotRow>> {
    sqlx::query_as::<_, TimeSlotRow>(&format!(
        r#"
        SELECT {SLOT_COLUMNS}
        FROM time_slots
        WHERE ground_id = $1 AND slot_date = $2 AND NOT is_booked
        ORDER BY start_time ASC
        "#
    ))
    .bind(ground_id)
    .bind(date)
    .fetch_all(executor)
    .await
}

/// Conditionally flip the requested slots to booked in one statement.
///
/// Only rows that are still unbooked, belong to the ground and fall on the
/// requested date are updated, and the updated rows are returned. The caller
/// compares the returned count against the requested count: a shortfall
/// means some slot was taken concurrently (or never existed) and the
/// surrounding transaction must roll back.
pub async fn reserve<'e>(
    executor: impl PgExecutor<'e>,
    ground_id: Uuid,
    date: NaiveDate,
    slot_ids: &[Uuid],
    sports_area_id: Option<Uuid>,
) -> SqlxResult<Vec<TimeSlotRow>> {
    sqlx::query_as::<_, TimeSlotRow>(&format!(
        r#"
        UPDATE time_slots
        SET is_booked = TRUE,
            sports_area_id = COALESCE($4, sports_area_id),
            updated_at = NOW()
        WHERE id = ANY($3::uuid[])
          AND ground_id = $1
          AND slot_date = $2
          AND NOT is_booked
        RETURNING {SLOT_COLUMNS}
        "#
    ))
    .bind(ground_id)
    .bind(date)
    .bind(slot_ids)
    .bind(sports_area_id)
    .fetch_all(executor)
    .await
}

/// Release every slot linked to a booking. Idempotent: already-released
/// slots are matched and rewritten to the same state.
pub async fn release_for_booking<'e>(
    executor: impl PgExecutor<'e>,
    booking_id: Uuid,
) -> SqlxResult<u64> {
    let result = sqlx::query(
        r#"
        UPDATE time_slots
        SET is_booked = FALSE, sports_area_id = NULL, updated_at = NOW()
        WHERE id IN (
            SELECT time_slot_id FROM booking_slots WHERE booking_id = $1
        )
        "#,
    )
    .bind(booking_id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}
