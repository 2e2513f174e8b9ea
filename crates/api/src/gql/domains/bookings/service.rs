use chrono::NaiveDate;
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

use infra::models::{BookingRow, TimeSlotRow};
use infra::repos::bookings::{self, BookingStatus, CreateBookingData, PaymentStatus};
use infra::repos::{booking_slots, grounds, time_slots};

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Ground not found")]
    GroundNotFound,

    #[error("No time slots requested")]
    NoSlots,

    /// Some requested slot was already booked (or does not exist for this
    /// ground and date). Raised before anything persists.
    #[error("Requested slots are no longer available ({reserved} of {requested} free)")]
    SlotsUnavailable { requested: usize, reserved: usize },

    #[error("Booking not found")]
    BookingNotFound,

    #[error("Booking is not pending (status: {0})")]
    NotPending(&'static str),

    #[error("database error")]
    Db(#[from] sqlx::Error),
}

/// Parameters for booking creation (parsed by the resolver).
pub struct CreateBookingParams {
    pub user_id: Option<Uuid>,
    pub guest_name: Option<String>,
    pub guest_phone: Option<String>,
    pub ground_id: Uuid,
    pub slot_date: NaiveDate,
    pub slot_ids: Vec<Uuid>,
    pub sports_area_id: Option<Uuid>,
}

/// A booking together with its reserved slots, ordered by start time.
pub struct BookingWithSlots {
    pub booking: BookingRow,
    pub slots: Vec<TimeSlotRow>,
}

/// Total of a slot set, as stamped on the booking at creation.
pub fn total_amount_cents(slots: &[TimeSlotRow]) -> i32 {
    slots.iter().map(|s| s.price_cents).sum()
}

/// Drop duplicate slot ids while preserving request order.
pub fn dedupe_slot_ids(slot_ids: &[Uuid]) -> Vec<Uuid> {
    let mut seen = std::collections::HashSet::new();
    slot_ids
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Create a booking in one transaction.
///
/// The reserve step is a single conditional UPDATE over the requested slot
/// ids; a shortfall in the returned row count means a concurrent booking
/// (or a bogus id) and rolls the whole transaction back, so no booking row,
/// no link rows and no flipped slot ever outlive a failed attempt.
///
/// The caller (resolver) is responsible for:
/// - Authentication / guest identity validation
/// - Converting the result to GraphQL types
/// - Publishing subscription events
pub async fn create_booking(
    pool: &sqlx::PgPool,
    params: CreateBookingParams,
) -> Result<BookingWithSlots, BookingError> {
    let slot_ids = dedupe_slot_ids(&params.slot_ids);
    if slot_ids.is_empty() {
        return Err(BookingError::NoSlots);
    }

    let mut tx = pool.begin().await?;

    let ground = grounds::get_by_id(&mut *tx, params.ground_id)
        .await?
        .ok_or(BookingError::GroundNotFound)?;

    let mut reserved = time_slots::reserve(
        &mut *tx,
        params.ground_id,
        params.slot_date,
        &slot_ids,
        params.sports_area_id,
    )
    .await?;

    if reserved.len() != slot_ids.len() {
        // Conflict: some slot got booked concurrently. Hard failure, no
        // partial booking, no alternate-slot suggestion.
        return Err(BookingError::SlotsUnavailable {
            requested: slot_ids.len(),
            reserved: reserved.len(),
        });
    }

    reserved.sort_by_key(|s| s.start_time);
    let total = total_amount_cents(&reserved);

    let booking = bookings::create(
        &mut *tx,
        CreateBookingData {
            user_id: params.user_id,
            guest_name: params.guest_name,
            guest_phone: params.guest_phone,
            ground_id: params.ground_id,
            ground_name: ground.name,
            slot_date: params.slot_date,
            total_amount_cents: total,
        },
    )
    .await?;

    booking_slots::link(&mut *tx, booking.id, &slot_ids).await?;

    tx.commit().await?;

    tracing::info!(
        booking_id = %booking.id,
        ground_id = %params.ground_id,
        slots = reserved.len(),
        total_cents = total,
        "Booking created"
    );

    Ok(BookingWithSlots {
        booking,
        slots: reserved,
    })
}

/// Cancel a booking and release its slots, in one transaction.
///
/// Idempotent: cancelling an already-cancelled booking re-applies the same
/// terminal state and returns the same result.
pub async fn cancel_booking(
    pool: &sqlx::PgPool,
    booking_id: Uuid,
) -> Result<BookingWithSlots, BookingError> {
    let mut tx = pool.begin().await?;

    let existing = bookings::get_by_id_for_update(&mut *tx, booking_id)
        .await?
        .ok_or(BookingError::BookingNotFound)?;

    // Release only on the first cancel. A repeat cancel must not touch the
    // slots: they may have been rebooked by someone else since.
    if existing.booking_status != BookingStatus::Cancelled {
        time_slots::release_for_booking(&mut *tx, existing.id).await?;
    }

    let booking = bookings::set_status(
        &mut *tx,
        existing.id,
        BookingStatus::Cancelled,
        PaymentStatus::Cancelled,
    )
    .await?;

    let slots = slots_of(&mut *tx, booking.id).await?;

    tx.commit().await?;

    tracing::info!(booking_id = %booking.id, "Booking cancelled");

    Ok(BookingWithSlots { booking, slots })
}

/// Mark a pending booking as paid and confirmed. Trusted to be called only
/// after external payment confirmation.
pub async fn complete_payment(
    pool: &sqlx::PgPool,
    booking_id: Uuid,
) -> Result<BookingWithSlots, BookingError> {
    let mut tx = pool.begin().await?;

    let existing = bookings::get_by_id_for_update(&mut *tx, booking_id)
        .await?
        .ok_or(BookingError::BookingNotFound)?;

    if existing.booking_status != BookingStatus::Pending {
        return Err(BookingError::NotPending(existing.booking_status.as_str()));
    }

    let booking = bookings::set_status(
        &mut *tx,
        existing.id,
        BookingStatus::Confirmed,
        PaymentStatus::Completed,
    )
    .await?;

    let slots = slots_of(&mut *tx, booking.id).await?;

    tx.commit().await?;

    tracing::info!(booking_id = %booking.id, "Payment completed, booking confirmed");

    Ok(BookingWithSlots { booking, slots })
}

/// Hydrate a page of booking rows with their slots in a single batched
/// query (replaces the original per-booking lookup chain).
pub async fn hydrate(
    pool: &sqlx::PgPool,
    rows: Vec<BookingRow>,
) -> Result<Vec<BookingWithSlots>, BookingError> {
    let ids: Vec<Uuid> = rows.iter().map(|b| b.id).collect();
    let pairs = booking_slots::slots_for_bookings(pool, &ids).await?;

    let mut by_booking: HashMap<Uuid, Vec<TimeSlotRow>> = HashMap::new();
    for (booking_id, slot) in pairs {
        by_booking.entry(booking_id).or_default().push(slot);
    }

    Ok(rows
        .into_iter()
        .map(|booking| {
            let slots = by_booking.remove(&booking.id).unwrap_or_default();
            BookingWithSlots { booking, slots }
        })
        .collect())
}

async fn slots_of<'e>(
    executor: impl sqlx::PgExecutor<'e>,
    booking_id: Uuid,
) -> Result<Vec<TimeSlotRow>, sqlx::Error> {
    let pairs = booking_slots::slots_for_bookings(executor, &[booking_id]).await?;
    Ok(pairs.into_iter().map(|(_, slot)| slot).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, Utc};

    fn slot(price_cents: i32) -> TimeSlotRow {
        TimeSlotRow {
            id: Uuid::new_v4(),
            ground_id: Uuid::new_v4(),
            slot_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            price_cents,
            is_booked: false,
            sports_area_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn total_is_sum_of_slot_prices() {
        let slots = vec![slot(50000), slot(50000)];
        assert_eq!(total_amount_cents(&slots), 100000);
        assert_eq!(total_amount_cents(&[]), 0);
    }

    #[test]
    fn dedupe_preserves_order() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert_eq!(dedupe_slot_ids(&[a, b, a, b, a]), vec![a, b]);
        assert_eq!(dedupe_slot_ids(&[]), Vec::<Uuid>::new());
    }

    #[test]
    fn conflict_error_names_the_shortfall() {
        let err = BookingError::SlotsUnavailable {
            requested: 3,
            reserved: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains("1 of 3"));
    }
}
