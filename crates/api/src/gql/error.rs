//! Error conversion helpers for GraphQL resolvers.
//!
//! async-graphql has a blanket `impl<T: Display + Send + Sync + 'static>
//! From<T> for Error`, so service-layer error enums convert via `?`; this
//! module covers the raw repo and loader calls made directly from resolvers.

use std::sync::Arc;

/// Sanitizing wrapper for database failures.
///
/// The sqlx detail is logged server-side; clients only ever see a generic
/// message. Repo calls produce `sqlx::Error`, dataloaders `Arc<sqlx::Error>`.
#[derive(Debug)]
pub enum GqlError {
    Sqlx(sqlx::Error),
    Loader(Arc<sqlx::Error>),
}

impl std::fmt::Display for GqlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GqlError::Sqlx(e) => {
                // Log the real error server-side; return a generic message to clients
                tracing::error!("Database error: {e}");
                write!(f, "Internal database error")
            }
            GqlError::Loader(e) => {
                tracing::error!("Data loading failed: {e}");
                write!(f, "Internal database error")
            }
        }
    }
}

impl std::error::Error for GqlError {}

impl From<sqlx::Error> for GqlError {
    fn from(e: sqlx::Error) -> Self {
        GqlError::Sqlx(e)
    }
}

impl From<Arc<sqlx::Error>> for GqlError {
    fn from(e: Arc<sqlx::Error>) -> Self {
        GqlError::Loader(e)
    }
}

/// Extension trait that converts any `Result<T, E>` where `E: Display`
/// into `async_graphql::Result<T>` with a contextual message prefix.
///
/// Usage: `Uuid::parse_str(id).gql_err("Invalid ground ID")?`
pub trait ResultExt<T> {
    fn gql_err(self, context: &str) -> std::result::Result<T, async_graphql::Error>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for std::result::Result<T, E> {
    fn gql_err(self, context: &str) -> std::result::Result<T, async_graphql::Error> {
        self.map_err(|e| async_graphql::Error::new(format!("{context}: {e}")))
    }
}

/// Extension trait for repo and loader results: routes the error through
/// [`GqlError`] so the database detail never reaches a client.
pub trait DbResultExt<T> {
    fn db_err(self) -> std::result::Result<T, async_graphql::Error>;
}

impl<T, E: Into<GqlError>> DbResultExt<T> for std::result::Result<T, E> {
    fn db_err(self) -> std::result::Result<T, async_graphql::Error> {
        self.map_err(|e| async_graphql::Error::from(e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn repo_errors_are_sanitized_for_clients() {
        let res: Result<(), sqlx::Error> = Err(sqlx::Error::PoolTimedOut);
        let err = res.db_err().unwrap_err();
        assert_eq!(err.message, "Internal database error");
    }

    #[test]
    fn loader_errors_are_sanitized_for_clients() {
        let res: Result<(), Arc<sqlx::Error>> = Err(Arc::new(sqlx::Error::RowNotFound));
        let err = res.db_err().unwrap_err();
        assert_eq!(err.message, "Internal database error");
    }

    #[test]
    fn gql_err_keeps_the_caller_context() {
        let err = Uuid::parse_str("not-a-uuid")
            .gql_err("Invalid ground ID")
            .unwrap_err();
        assert!(err.message.starts_with("Invalid ground ID: "));
    }
}
