use sqlx::{PgExecutor, Result as SqlxResult};
use uuid::Uuid;

use crate::models::InventoryItemRow;
use crate::pagination::LimitOffset;

#[derive(Debug, Clone)]
pub struct CreateInventoryItemData {
    pub name: String,
    pub category: String,
    pub price_cents: i32,
    pub description: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateInventoryItemData {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price_cents: Option<i32>,
    pub description: Option<String>,
    pub image: Option<String>,
}

const ITEM_COLUMNS: &str =
    "id, name, category, price_cents, description, image, created_at, updated_at";

pub async fn get_by_id<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
) -> SqlxResult<Option<InventoryItemRow>> {
    sqlx::query_as::<_, InventoryItemRow>(&format!(
        "SELECT {ITEM_COLUMNS} FROM inventory_items WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn list<'e>(
    executor: impl PgExecutor<'e>,
    category: Option<String>,
    page: LimitOffset,
) -> SqlxResult<Vec<InventoryItemRow>> {
    sqlx::query_as::<_, InventoryItemRow>(&format!(
        r#"
        SELECT {ITEM_COLUMNS}
        FROM inventory_items
        WHERE ($1::text IS NULL OR category = $1)
        ORDER BY name ASC
        LIMIT $2 OFFSET $3
        "#
    ))
    .bind(category)
    .bind(page.limit)
    .bind(page.offset)
    .fetch_all(executor)
    .await
}

pub async fn create<'e>(
    executor: impl PgExecutor<'e>,
    data: CreateInventoryItemData,
) -> SqlxResult<InventoryItemRow> {
    sqlx::query_as::<_, InventoryItemRow>(&format!(
        r#"
        INSERT INTO inventory_items (name, category, price_cents, description, image)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {ITEM_COLUMNS}
        "#
    ))
    .bind(data.name)
    .bind(data.category)
    .bind(data.price_cents)
    .bind(data.description)
    .bind(data.image)
    .fetch_one(executor)
    .await
}

pub async fn update<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
    data: UpdateInventoryItemData,
) -> SqlxResult<Option<InventoryItemRow>> {
    sqlx::query_as::<_, InventoryItemRow>(&format!(
        r#"
        UPDATE inventory_items
        SET name = COALESCE($2, name),
            category = COALESCE($3, category),
            price_cents = COALESCE($4, price_cents),
            description = COALESCE($5, description),
            image = COALESCE($6, image),
            updated_at = NOW()
        WHERE id = $1
        RETURNING {ITEM_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(data.name)
    .bind(data.category)
    .bind(data.price_cents)
    .bind(data.description)
    .bind(data.image)
    .fetch_optional(executor)
    .await
}

pub async fn delete<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> SqlxResult<bool> {
    let result = sqlx::query("DELETE FROM inventory_items WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}
