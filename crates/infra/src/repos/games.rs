use sqlx::{PgExecutor, Result as SqlxResult};

use crate::models::GameRow;

pub async fn list<'e>(executor: impl PgExecutor<'e>) -> SqlxResult<Vec<GameRow>> {
    sqlx::query_as::<_, GameRow>("SELECT id, name, created_at FROM games ORDER BY name ASC")
        .fetch_all(executor)
        .await
}

pub async fn create<'e>(executor: impl PgExecutor<'e>, name: &str) -> SqlxResult<GameRow> {
    sqlx::query_as::<_, GameRow>(
        r#"
        INSERT INTO games (name) VALUES ($1)
        ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
        RETURNING id, name, created_at
        "#,
    )
    .bind(name)
    .fetch_one(executor)
    .await
}
