use chrono::NaiveDate;
use sqlx::{PgExecutor, Result as SqlxResult};
use std::str::FromStr;
use uuid::Uuid;

use crate::models::BookingRow;
use crate::pagination::LimitOffset;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, serde::Serialize, serde::Deserialize)]
#[sqlx(type_name = "booking_status", rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            _ => Err(format!("Unknown booking status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, serde::Serialize, serde::Deserialize)]
#[sqlx(type_name = "payment_status", rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Cancelled,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "completed" => Ok(PaymentStatus::Completed),
            "cancelled" => Ok(PaymentStatus::Cancelled),
            _ => Err(format!("Unknown payment status: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateBookingData {
    pub user_id: Option<Uuid>,
    pub guest_name: Option<String>,
    pub guest_phone: Option<String>,
    pub ground_id: Uuid,
    pub ground_name: String,
    pub slot_date: NaiveDate,
    pub total_amount_cents: i32,
}

const BOOKING_COLUMNS: &str = "id, user_id, guest_name, guest_phone, ground_id, ground_name, \
     slot_date, total_amount_cents, booking_status, payment_status, created_at, updated_at";

pub async fn create<'e>(
    executor: impl PgExecutor<'e>,
    data: CreateBookingData,
) -> SqlxResult<BookingRow> {
    sqlx::query_as::<_, BookingRow>(&format!(
        r#"
        INSERT INTO bookings (user_id, guest_name, guest_phone, ground_id, ground_name,
                              slot_date, total_amount_cents)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {BOOKING_COLUMNS}
        "#
    ))
    .bind(data.user_id)
    .bind(data.guest_name)
    .bind(data.guest_phone)
    .bind(data.ground_id)
    .bind(data.ground_name)
    .bind(data.slot_date)
    .bind(data.total_amount_cents)
    .fetch_one(executor)
    .await
}

pub async fn get_by_id<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
) -> SqlxResult<Option<BookingRow>> {
    sqlx::query_as::<_, BookingRow>(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(executor)
    .await
}

/// Same as `get_by_id` but takes a row lock so concurrent status changes
/// (cancel vs. payment completion) serialize.
pub async fn get_by_id_for_update<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
) -> SqlxResult<Option<BookingRow>> {
    sqlx::query_as::<_, BookingRow>(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1 FOR UPDATE"
    ))
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn list_by_user<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
    page: LimitOffset,
) -> SqlxResult<Vec<BookingRow>> {
    sqlx::query_as::<_, BookingRow>(&format!(
        r#"
        SELECT {BOOKING_COLUMNS}
        FROM bookings
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#
    ))
    .bind(user_id)
    .bind(page.limit)
    .bind(page.offset)
    .fetch_all(executor)
    .await
}

pub async fn list_by_ground<'e>(
    executor: impl PgExecutor<'e>,
    ground_id: Uuid,
    page: LimitOffset,
) -> SqlxResult<Vec<BookingRow>> {
    sqlx::query_as::<_, BookingRow>(&format!(
        r#"
        SELECT {BOOKING_COLUMNS}
        FROM bookings
        WHERE ground_id = $1
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#
    ))
    .bind(ground_id)
    .bind(page.limit)
    .bind(page.offset)
    .fetch_all(executor)
    .await
}

pub async fn set_status<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
    booking_status: BookingStatus,
    payment_status: PaymentStatus,
) -> SqlxResult<BookingRow> {
    sqlx::query_as::<_, BookingRow>(&format!(
        r#"
        UPDATE bookings
        SET booking_status = $2, payment_status = $3, updated_at = NOW()
        WHERE id = $1
        RETURNING {BOOKING_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(booking_status)
    .bind(payment_status)
    .fetch_one(executor)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips() {
        for s in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Cancelled,
        ] {
            assert_eq!(BookingStatus::from_str(s.as_str()), Ok(s));
        }
        for s in [
            PaymentStatus::Pending,
            PaymentStatus::Completed,
            PaymentStatus::Cancelled,
        ] {
            assert_eq!(PaymentStatus::from_str(s.as_str()), Ok(s));
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(BookingStatus::from_str("paid").is_err());
        assert!(PaymentStatus::from_str("refunded").is_err());
    }
}
