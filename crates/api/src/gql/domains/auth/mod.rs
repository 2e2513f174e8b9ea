pub mod resolvers;

pub use resolvers::AuthQuery;
