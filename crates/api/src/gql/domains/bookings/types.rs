use async_graphql::{Enum, InputObject, SimpleObject, ID};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use super::service::BookingWithSlots;

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl From<infra::repos::bookings::BookingStatus> for BookingStatus {
    fn from(status: infra::repos::bookings::BookingStatus) -> Self {
        match status {
            infra::repos::bookings::BookingStatus::Pending => BookingStatus::Pending,
            infra::repos::bookings::BookingStatus::Confirmed => BookingStatus::Confirmed,
            infra::repos::bookings::BookingStatus::Cancelled => BookingStatus::Cancelled,
        }
    }
}

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
pub enum PaymentStatus {
    Pending,
    Completed,
    Cancelled,
}

impl From<infra::repos::bookings::PaymentStatus> for PaymentStatus {
    fn from(status: infra::repos::bookings::PaymentStatus) -> Self {
        match status {
            infra::repos::bookings::PaymentStatus::Pending => PaymentStatus::Pending,
            infra::repos::bookings::PaymentStatus::Completed => PaymentStatus::Completed,
            infra::repos::bookings::PaymentStatus::Cancelled => PaymentStatus::Cancelled,
        }
    }
}

#[derive(SimpleObject, Clone, Debug)]
pub struct TimeSlot {
    pub id: ID,
    pub ground_id: ID,
    pub slot_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub price_cents: i32,
    pub is_booked: bool,
    pub sports_area_id: Option<ID>,
}

impl From<infra::models::TimeSlotRow> for TimeSlot {
    fn from(row: infra::models::TimeSlotRow) -> Self {
        TimeSlot {
            id: row.id.into(),
            ground_id: row.ground_id.into(),
            slot_date: row.slot_date,
            start_time: row.start_time,
            end_time: row.end_time,
            price_cents: row.price_cents,
            is_booked: row.is_booked,
            sports_area_id: row.sports_area_id.map(Into::into),
        }
    }
}

#[derive(SimpleObject, Clone, Debug)]
pub struct Booking {
    pub id: ID,
    pub user_id: Option<ID>,
    pub guest_name: Option<String>,
    pub guest_phone: Option<String>,
    pub ground_id: ID,
    pub ground_name: String,
    pub slot_date: NaiveDate,
    pub slots: Vec<TimeSlot>,
    pub total_amount_cents: i32,
    pub booking_status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

impl From<BookingWithSlots> for Booking {
    fn from(b: BookingWithSlots) -> Self {
        let row = b.booking;
        Booking {
            id: row.id.into(),
            user_id: row.user_id.map(Into::into),
            guest_name: row.guest_name,
            guest_phone: row.guest_phone,
            ground_id: row.ground_id.into(),
            ground_name: row.ground_name,
            slot_date: row.slot_date,
            slots: b.slots.into_iter().map(TimeSlot::from).collect(),
            total_amount_cents: row.total_amount_cents,
            booking_status: row.booking_status.into(),
            payment_status: row.payment_status.into(),
            created_at: row.created_at,
        }
    }
}

/// One slot of a publishing batch.
#[derive(InputObject, Clone)]
pub struct TimeSlotInput {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub price_cents: i32,
}

#[derive(InputObject, Clone)]
pub struct CreateBookingInput {
    pub ground_id: Uuid,
    pub slot_date: NaiveDate,
    pub slot_ids: Vec<Uuid>,
    /// Required (with guest_phone) when the caller is not authenticated.
    pub guest_name: Option<String>,
    pub guest_phone: Option<String>,
    pub sports_area_id: Option<Uuid>,
}

// Subscription payloads

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
pub enum BookingEventType {
    Created,
    Cancelled,
    PaymentCompleted,
}

#[derive(SimpleObject, Clone, Debug)]
pub struct BookingEvent {
    pub event_type: BookingEventType,
    pub booking: Booking,
}
