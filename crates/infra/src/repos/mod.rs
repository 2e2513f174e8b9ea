pub mod booking_slots;
pub mod bookings;
pub mod games;
pub mod ground_inventory;
pub mod grounds;
pub mod inventory_items;
pub mod refresh_tokens;
pub mod sports_professionals;
pub mod time_slots;
pub mod users;

pub use bookings::{BookingStatus, CreateBookingData, PaymentStatus};
pub use grounds::{CreateGroundData, GroundFilter, UpdateGroundData};
pub use inventory_items::{CreateInventoryItemData, UpdateInventoryItemData};
pub use sports_professionals::{CreateProfessionalData, ProfessionalFilter};
pub use time_slots::CreateTimeSlotData;
pub use users::{CreateUserData, UserFilter};
