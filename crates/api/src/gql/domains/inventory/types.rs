use async_graphql::dataloader::DataLoader;
use async_graphql::{ComplexObject, Context, InputObject, Result, SimpleObject, ID};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::gql::error::{DbResultExt, ResultExt};
use crate::gql::loaders::InventoryItemLoader;

#[derive(SimpleObject, Clone, Debug)]
pub struct InventoryItem {
    pub id: ID,
    pub name: String,
    pub category: String,
    pub price_cents: i32,
    pub description: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<infra::models::InventoryItemRow> for InventoryItem {
    fn from(row: infra::models::InventoryItemRow) -> Self {
        InventoryItem {
            id: row.id.into(),
            name: row.name,
            category: row.category,
            price_cents: row.price_cents,
            description: row.description,
            image: row.image,
            created_at: row.created_at,
        }
    }
}

/// A stock line at a ground.
#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub struct GroundInventory {
    pub id: ID,
    pub ground_id: ID,
    pub item_id: ID,
    pub quantity: i32,
}

#[ComplexObject]
impl GroundInventory {
    /// Catalog item for this stock line, batch-loaded.
    async fn item(&self, ctx: &Context<'_>) -> Result<Option<InventoryItem>> {
        let item_id = Uuid::parse_str(self.item_id.as_str()).gql_err("Invalid item ID")?;
        let loader = ctx.data::<DataLoader<InventoryItemLoader>>()?;
        let row = loader.load_one(item_id).await.db_err()?;
        Ok(row.map(InventoryItem::from))
    }
}

impl From<infra::models::GroundInventoryRow> for GroundInventory {
    fn from(row: infra::models::GroundInventoryRow) -> Self {
        GroundInventory {
            id: row.id.into(),
            ground_id: row.ground_id.into(),
            item_id: row.item_id.into(),
            quantity: row.quantity,
        }
    }
}

#[derive(InputObject, Clone)]
pub struct CreateInventoryItemInput {
    pub name: String,
    pub category: String,
    pub price_cents: i32,
    pub description: Option<String>,
    pub image: Option<String>,
}

#[derive(InputObject, Clone, Default)]
pub struct UpdateInventoryItemInput {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price_cents: Option<i32>,
    pub description: Option<String>,
    pub image: Option<String>,
}
