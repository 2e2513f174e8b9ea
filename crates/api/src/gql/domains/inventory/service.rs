use thiserror::Error;
use uuid::Uuid;

use infra::models::GroundInventoryRow;
use infra::repos::{ground_inventory, grounds, inventory_items};

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Inventory item not found")]
    ItemNotFound,

    #[error("Ground not found")]
    GroundNotFound,

    #[error("Quantity must be positive")]
    NonPositiveQuantity,

    /// Stock check failed; nothing was mutated.
    #[error("Insufficient stock ({available} available, {requested} requested)")]
    InsufficientStock { available: i32, requested: i32 },

    #[error("database error")]
    Db(#[from] sqlx::Error),
}

/// Allocate stock of a catalog item to a ground.
///
/// The quantity update is a single upsert, so concurrent allocations both
/// land instead of one overwriting the other.
pub async fn allocate_inventory(
    pool: &sqlx::PgPool,
    ground_id: Uuid,
    item_id: Uuid,
    quantity: i32,
) -> Result<GroundInventoryRow, InventoryError> {
    if quantity <= 0 {
        return Err(InventoryError::NonPositiveQuantity);
    }

    inventory_items::get_by_id(pool, item_id)
        .await?
        .ok_or(InventoryError::ItemNotFound)?;
    grounds::get_by_id(pool, ground_id)
        .await?
        .ok_or(InventoryError::GroundNotFound)?;

    let row = ground_inventory::add(pool, ground_id, item_id, quantity).await?;

    tracing::info!(%ground_id, %item_id, quantity, new_total = row.quantity, "Inventory allocated");
    Ok(row)
}

/// Consume stock at a ground. A single conditional decrement enforces the
/// floor at zero: when it matches no row, the stock was insufficient and
/// nothing changed.
pub async fn use_inventory_items(
    pool: &sqlx::PgPool,
    ground_id: Uuid,
    item_id: Uuid,
    quantity: i32,
) -> Result<GroundInventoryRow, InventoryError> {
    if quantity <= 0 {
        return Err(InventoryError::NonPositiveQuantity);
    }

    match ground_inventory::consume(pool, ground_id, item_id, quantity).await? {
        Some(row) => {
            tracing::info!(%ground_id, %item_id, quantity, remaining = row.quantity, "Inventory used");
            Ok(row)
        }
        None => {
            let available = ground_inventory::get(pool, ground_id, item_id)
                .await?
                .map(|r| r.quantity)
                .unwrap_or(0);

            Err(InventoryError::InsufficientStock {
                available,
                requested: quantity,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_stock_message_names_both_sides() {
        let err = InventoryError::InsufficientStock {
            available: 2,
            requested: 5,
        };
        let msg = err.to_string();
        assert!(msg.contains("2 available"));
        assert!(msg.contains("5 requested"));
    }
}
