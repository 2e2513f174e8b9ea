pub mod resolvers;
pub mod service;
pub mod types;

pub use resolvers::{BookingMutation, BookingQuery};
