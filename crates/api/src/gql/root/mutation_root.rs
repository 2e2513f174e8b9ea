use async_graphql::MergedObject;

use crate::gql::domains::bookings::BookingMutation;
use crate::gql::domains::grounds::GroundMutation;
use crate::gql::domains::inventory::InventoryMutation;
use crate::gql::domains::professionals::ProfessionalMutation;
use crate::gql::domains::users::UserMutation;

#[derive(MergedObject, Default)]
pub struct MutationRoot(
    BookingMutation,
    GroundMutation,
    InventoryMutation,
    ProfessionalMutation,
    UserMutation,
);
