use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::auth::permissions::{require_admin, require_ground_owner};
use crate::gql::error::DbResultExt;
use crate::gql::types::PaginationInput;
use crate::state::AppState;
use infra::repos::inventory_items::{self, CreateInventoryItemData, UpdateInventoryItemData};

use super::service;
use super::types::{
    CreateInventoryItemInput, GroundInventory, InventoryItem, UpdateInventoryItemInput,
};

#[derive(Default)]
pub struct InventoryQuery;

#[Object]
impl InventoryQuery {
    /// The catalog of inventory items, optionally filtered by category.
    async fn inventory_items(
        &self,
        ctx: &Context<'_>,
        category: Option<String>,
        pagination: Option<PaginationInput>,
    ) -> Result<Vec<InventoryItem>> {
        let state = ctx.data::<AppState>()?;
        let limit_offset = pagination.unwrap_or_default().to_limit_offset();

        let rows = inventory_items::list(&state.db, category, limit_offset)
            .await
            .db_err()?;

        Ok(rows.into_iter().map(InventoryItem::from).collect())
    }

    /// Stock lines at a ground. Ground owner or admin.
    async fn ground_inventory(
        &self,
        ctx: &Context<'_>,
        ground_id: Uuid,
    ) -> Result<Vec<GroundInventory>> {
        require_ground_owner(ctx, ground_id).await?;

        let state = ctx.data::<AppState>()?;
        let rows = infra::repos::ground_inventory::list_for_ground(&state.db, ground_id)
            .await
            .db_err()?;

        Ok(rows
            .into_iter()
            .map(|r| GroundInventory {
                id: r.id.into(),
                ground_id: r.ground_id.into(),
                item_id: r.item_id.into(),
                quantity: r.quantity,
            })
            .collect())
    }
}

#[derive(Default)]
pub struct InventoryMutation;

#[Object]
impl InventoryMutation {
    /// Add a catalog item. Admin only.
    async fn create_inventory_item(
        &self,
        ctx: &Context<'_>,
        input: CreateInventoryItemInput,
    ) -> Result<InventoryItem> {
        require_admin(ctx).await?;

        let state = ctx.data::<AppState>()?;
        let row = inventory_items::create(
            &state.db,
            CreateInventoryItemData {
                name: input.name,
                category: input.category,
                price_cents: input.price_cents,
                description: input.description,
                image: input.image,
            },
        )
        .await
        .db_err()?;

        Ok(InventoryItem::from(row))
    }

    /// Update a catalog item. Admin only.
    async fn update_inventory_item(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        input: UpdateInventoryItemInput,
    ) -> Result<InventoryItem> {
        require_admin(ctx).await?;

        let state = ctx.data::<AppState>()?;
        let row = inventory_items::update(
            &state.db,
            id,
            UpdateInventoryItemData {
                name: input.name,
                category: input.category,
                price_cents: input.price_cents,
                description: input.description,
                image: input.image,
            },
        )
        .await
        .db_err()?
        .ok_or_else(|| async_graphql::Error::new("Inventory item not found"))?;

        Ok(InventoryItem::from(row))
    }

    /// Remove a catalog item. Admin only.
    async fn delete_inventory_item(&self, ctx: &Context<'_>, id: Uuid) -> Result<bool> {
        require_admin(ctx).await?;

        let state = ctx.data::<AppState>()?;
        inventory_items::delete(&state.db, id)
            .await
            .db_err()
    }

    /// Allocate stock of an item to a ground. Ground owner or admin.
    async fn allocate_inventory(
        &self,
        ctx: &Context<'_>,
        ground_id: Uuid,
        item_id: Uuid,
        quantity: i32,
    ) -> Result<GroundInventory> {
        require_ground_owner(ctx, ground_id).await?;

        let state = ctx.data::<AppState>()?;
        let row = service::allocate_inventory(&state.db, ground_id, item_id, quantity).await?;

        Ok(GroundInventory::from(row))
    }

    /// Consume stock at a ground. Rejected before any mutation when the
    /// requested quantity exceeds what is on hand.
    async fn use_inventory_items(
        &self,
        ctx: &Context<'_>,
        ground_id: Uuid,
        item_id: Uuid,
        quantity: i32,
    ) -> Result<GroundInventory> {
        require_ground_owner(ctx, ground_id).await?;

        let state = ctx.data::<AppState>()?;
        let row = service::use_inventory_items(&state.db, ground_id, item_id, quantity).await?;

        Ok(GroundInventory::from(row))
    }
}
