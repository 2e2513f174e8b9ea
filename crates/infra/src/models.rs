use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::repos::bookings::{BookingStatus, PaymentStatus};

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct GameRow {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct GroundRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub games: Vec<String>,
    pub facilities: Vec<String>,
    pub images: Vec<String>,
    pub rating: f64,
    pub review_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TimeSlotRow {
    pub id: Uuid,
    pub ground_id: Uuid,
    pub slot_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub price_cents: i32,
    pub is_booked: bool,
    pub sports_area_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct BookingRow {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub guest_name: Option<String>,
    pub guest_phone: Option<String>,
    pub ground_id: Uuid,
    pub ground_name: String,
    pub slot_date: NaiveDate,
    pub total_amount_cents: i32,
    pub booking_status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct InventoryItemRow {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub price_cents: i32,
    pub description: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct GroundInventoryRow {
    pub id: Uuid,
    pub ground_id: Uuid,
    pub item_id: Uuid,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Stock row joined with its catalog item, for per-ground listings.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct GroundInventoryWithItemRow {
    pub id: Uuid,
    pub ground_id: Uuid,
    pub item_id: Uuid,
    pub quantity: i32,
    pub item_name: String,
    pub item_category: String,
    pub item_price_cents: i32,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct SportsProfessionalRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub sport: String,
    pub bio: Option<String>,
    pub city: Option<String>,
    pub hourly_rate_cents: Option<i32>,
    pub years_experience: Option<i32>,
    pub certifications: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ProfessionalDraftRow {
    pub user_id: Uuid,
    pub step: i32,
    pub payload: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}
