//! Re-export hub for GraphQL types shared across domains.

pub use crate::gql::common::types::{
    NotificationType, PaginatedResponse, PaginationInput, Role, UserNotification,
    TITLE_BOOKING_CANCELLED, TITLE_BOOKING_CONFIRMED,
};
pub use crate::gql::domains::bookings::types::{
    Booking, BookingEvent, BookingEventType, BookingStatus, PaymentStatus, TimeSlot,
};
pub use crate::gql::domains::grounds::types::{GeoFilterInput, Ground, Location};
pub use crate::gql::domains::inventory::types::{GroundInventory, InventoryItem};
pub use crate::gql::domains::professionals::types::{ProfessionalDraft, SportsProfessional};
pub use crate::gql::domains::users::types::User;
