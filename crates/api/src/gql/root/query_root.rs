use async_graphql::MergedObject;

use crate::gql::domains::auth::AuthQuery;
use crate::gql::domains::bookings::BookingQuery;
use crate::gql::domains::grounds::GroundQuery;
use crate::gql::domains::inventory::InventoryQuery;
use crate::gql::domains::professionals::ProfessionalQuery;
use crate::gql::domains::users::UserQuery;

#[derive(MergedObject, Default)]
pub struct QueryRoot(
    AuthQuery,
    BookingQuery,
    GroundQuery,
    InventoryQuery,
    ProfessionalQuery,
    UserQuery,
);
