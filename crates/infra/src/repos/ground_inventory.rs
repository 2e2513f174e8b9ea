use sqlx::{PgExecutor, Result as SqlxResult};
use uuid::Uuid;

use crate::models::{GroundInventoryRow, GroundInventoryWithItemRow};

const STOCK_COLUMNS: &str = "id, ground_id, item_id, quantity, created_at, updated_at";

pub async fn get<'e>(
    executor: impl PgExecutor<'e>,
    ground_id: Uuid,
    item_id: Uuid,
) -> SqlxResult<Option<GroundInventoryRow>> {
    sqlx::query_as::<_, GroundInventoryRow>(&format!(
        "SELECT {STOCK_COLUMNS} FROM ground_inventory WHERE ground_id = $1 AND item_id = $2"
    ))
    .bind(ground_id)
    .bind(item_id)
    .fetch_optional(executor)
    .await
}

pub async fn list_for_ground<'e>(
    executor: impl PgExecutor<'e>,
    ground_id: Uuid,
) -> SqlxResult<Vec<GroundInventoryWithItemRow>> {
    sqlx::query_as::<_, GroundInventoryWithItemRow>(
        r#"
        SELECT gi.id, gi.ground_id, gi.item_id, gi.quantity,
               ii.name AS item_name, ii.category AS item_category,
               ii.price_cents AS item_price_cents
        FROM ground_inventory gi
        JOIN inventory_items ii ON ii.id = gi.item_id
        WHERE gi.ground_id = $1
        ORDER BY ii.name ASC
        "#,
    )
    .bind(ground_id)
    .fetch_all(executor)
    .await
}

/// Add stock in a single upsert. Existing rows gain `quantity`, missing rows
/// are created with it, so two concurrent allocations both land.
pub async fn add<'e>(
    executor: impl PgExecutor<'e>,
    ground_id: Uuid,
    item_id: Uuid,
    quantity: i32,
) -> SqlxResult<GroundInventoryRow> {
    sqlx::query_as::<_, GroundInventoryRow>(&format!(
        r#"
        INSERT INTO ground_inventory (ground_id, item_id, quantity)
        VALUES ($1, $2, $3)
        ON CONFLICT (ground_id, item_id)
        DO UPDATE SET quantity = ground_inventory.quantity + EXCLUDED.quantity,
                      updated_at = NOW()
        RETURNING {STOCK_COLUMNS}
        "#
    ))
    .bind(ground_id)
    .bind(item_id)
    .bind(quantity)
    .fetch_one(executor)
    .await
}

/// Conditional decrement with a floor at zero. Returns the updated row, or
/// `None` when stock is insufficient — in that case nothing was mutated.
pub async fn consume<'e>(
    executor: impl PgExecutor<'e>,
    ground_id: Uuid,
    item_id: Uuid,
    quantity: i32,
) -> SqlxResult<Option<GroundInventoryRow>> {
    sqlx::query_as::<_, GroundInventoryRow>(&format!(
        r#"
        UPDATE ground_inventory
        SET quantity = quantity - $3, updated_at = NOW()
        WHERE ground_id = $1 AND item_id = $2 AND quantity >= $3
        RETURNING {STOCK_COLUMNS}
        "#
    ))
    .bind(ground_id)
    .bind(item_id)
    .bind(quantity)
    .fetch_optional(executor)
    .await
}
