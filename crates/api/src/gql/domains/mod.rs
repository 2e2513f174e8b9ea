pub mod auth;
pub mod bookings;
pub mod grounds;
pub mod inventory;
pub mod professionals;
pub mod users;
