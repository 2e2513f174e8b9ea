use async_graphql::{Enum, InputObject, SimpleObject, ID};
use chrono::{DateTime, Utc};

use infra::pagination::LimitOffset;

// Notification title constants
pub const TITLE_BOOKING_CONFIRMED: &str = "Booking Confirmed";
pub const TITLE_BOOKING_CANCELLED: &str = "Booking Cancelled";

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
pub enum Role {
    User,
    GroundOwner,
    SportsProfessional,
    Admin,
    SuperAdmin,
}

impl From<String> for Role {
    fn from(role: String) -> Self {
        match role.as_str() {
            "ground_owner" => Role::GroundOwner,
            "sports_professional" => Role::SportsProfessional,
            "admin" => Role::Admin,
            "super_admin" => Role::SuperAdmin,
            _ => Role::User, // Default to plain user for unknown roles
        }
    }
}

impl From<Option<String>> for Role {
    fn from(role: Option<String>) -> Self {
        match role {
            Some(r) => Role::from(r),
            None => Role::User,
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::User => "user".to_string(),
            Role::GroundOwner => "ground_owner".to_string(),
            Role::SportsProfessional => "sports_professional".to_string(),
            Role::Admin => "admin".to_string(),
            Role::SuperAdmin => "super_admin".to_string(),
        }
    }
}

#[derive(InputObject, Clone, Copy, Debug)]
pub struct PaginationInput {
    pub limit: Option<i32>,
    pub offset: Option<i32>,
}

impl PaginationInput {
    pub fn to_limit_offset(self) -> LimitOffset {
        LimitOffset::new(
            self.limit.unwrap_or(50) as i64,
            self.offset.unwrap_or(0) as i64,
        )
    }
}

impl Default for PaginationInput {
    fn default() -> Self {
        Self {
            limit: Some(50),
            offset: Some(0),
        }
    }
}

#[derive(SimpleObject)]
#[graphql(concrete(name = "GroundPage", params(crate::gql::domains::grounds::types::Ground)))]
#[graphql(concrete(name = "BookingPage", params(crate::gql::domains::bookings::types::Booking)))]
#[graphql(concrete(name = "UserPage", params(crate::gql::domains::users::types::User)))]
#[graphql(concrete(
    name = "SportsProfessionalPage",
    params(crate::gql::domains::professionals::types::SportsProfessional)
))]
pub struct PaginatedResponse<T: async_graphql::OutputType> {
    pub items: Vec<T>,
    pub total_count: i32,
    pub page_size: i32,
    pub offset: i32,
    pub has_next_page: bool,
}

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
pub enum NotificationType {
    BookingConfirmed,
    BookingCancelled,
}

#[derive(SimpleObject, Clone, Debug)]
pub struct UserNotification {
    pub id: ID,
    pub user_id: ID,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub booking_id: Option<ID>,
    pub created_at: DateTime<Utc>,
}
