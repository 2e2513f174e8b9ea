use sqlx::{PgExecutor, Result as SqlxResult};
use uuid::Uuid;

use crate::models::TimeSlotRow;

/// Insert one link row per reserved slot, as a single multi-row insert.
pub async fn link<'e>(
    executor: impl PgExecutor<'e>,
    booking_id: Uuid,
    slot_ids: &[Uuid],
) -> SqlxResult<u64> {
    let result = sqlx::query(
        r#"
        INSERT INTO booking_slots (booking_id, time_slot_id)
        SELECT $1, unnest($2::uuid[])
        "#,
    )
    .bind(booking_id)
    .bind(slot_ids)
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}

/// Batched slot hydration for a set of bookings: one joined query instead
/// of a per-booking lookup chain. Pairs come back ordered by start time so
/// callers can group them without re-sorting.
pub async fn slots_for_bookings<'e>(
    executor: impl PgExecutor<'e>,
    booking_ids: &[Uuid],
) -> SqlxResult<Vec<(Uuid, TimeSlotRow)>> {
    let rows = sqlx::query_as::<_, BookingSlotJoinRow>(
        r#"
        SELECT bs.booking_id,
               ts.id, ts.ground_id, ts.slot_date, ts.start_time, ts.end_time,
               ts.price_cents, ts.is_booked, ts.sports_area_id, ts.created_at, ts.updated_at
        FROM booking_slots bs
        JOIN time_slots ts ON ts.id = bs.time_slot_id
        WHERE bs.booking_id = ANY($1::uuid[])
        ORDER BY ts.start_time ASC
        "#,
    )
    .bind(booking_ids)
    .fetch_all(executor)
    .await?;

    Ok(rows.into_iter().map(|r| (r.booking_id, r.into())).collect())
}

#[derive(sqlx::FromRow)]
struct BookingSlotJoinRow {
    booking_id: Uuid,
    id: Uuid,
    ground_id: Uuid,
    slot_date: chrono::NaiveDate,
    start_time: chrono::NaiveTime,
    end_time: chrono::NaiveTime,
    price_cents: i32,
    is_booked: bool,
    sports_area_id: Option<Uuid>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<BookingSlotJoinRow> for TimeSlotRow {
    fn from(r: BookingSlotJoinRow) -> Self {
        TimeSlotRow {
            id: r.id,
            ground_id: r.ground_id,
            slot_date: r.slot_date,
            start_time: r.start_time,
            end_time: r.end_time,
            price_cents: r.price_cents,
            is_booked: r.is_booked,
            sports_area_id: r.sports_area_id,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}
