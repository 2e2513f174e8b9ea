/// Shared connection pool alias used throughout the repos.
pub type Db = sqlx::PgPool;
