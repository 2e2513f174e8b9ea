use async_graphql::dataloader::DataLoader;
use async_graphql::{ComplexObject, Context, InputObject, Result, SimpleObject, ID};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::gql::domains::users::types::User;
use crate::gql::error::{DbResultExt, ResultExt};
use crate::gql::loaders::UserLoader;

#[derive(SimpleObject, Clone)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Catalog entry behind the ground game filter.
#[derive(SimpleObject, Clone)]
pub struct Game {
    pub id: ID,
    pub name: String,
}

impl From<infra::models::GameRow> for Game {
    fn from(row: infra::models::GameRow) -> Self {
        Game {
            id: row.id.into(),
            name: row.name,
        }
    }
}

#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub struct Ground {
    pub id: ID,
    pub owner_id: ID,
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    pub location: Location,
    pub games: Vec<String>,
    pub facilities: Vec<String>,
    pub images: Vec<String>,
    pub rating: f64,
    pub review_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[ComplexObject]
impl Ground {
    /// The owning user, batch-loaded.
    async fn owner(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        let owner_id = Uuid::parse_str(self.owner_id.as_str()).gql_err("Invalid owner ID")?;
        let loader = ctx.data::<DataLoader<UserLoader>>()?;
        let row = loader.load_one(owner_id).await.db_err()?;
        Ok(row.map(User::from))
    }
}

impl From<infra::models::GroundRow> for Ground {
    fn from(row: infra::models::GroundRow) -> Self {
        Ground {
            id: row.id.into(),
            owner_id: row.owner_id.into(),
            name: row.name,
            description: row.description,
            address: row.address,
            location: Location {
                latitude: row.latitude,
                longitude: row.longitude,
            },
            games: row.games,
            facilities: row.facilities,
            images: row.images,
            rating: row.rating,
            review_count: row.review_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Radius filter over stored coordinates. Distance is Euclidean in
/// coordinate units, matching the original product behavior; only sensible
/// for small radii.
#[derive(InputObject, Clone, Copy, Debug)]
pub struct GeoFilterInput {
    pub latitude: f64,
    pub longitude: f64,
    pub radius: f64,
}

#[derive(InputObject, Clone)]
pub struct CreateGroundInput {
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub games: Vec<String>,
    #[graphql(default)]
    pub facilities: Vec<String>,
    #[graphql(default)]
    pub images: Vec<String>,
}

#[derive(InputObject, Clone, Default)]
pub struct UpdateGroundInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub games: Option<Vec<String>>,
    pub facilities: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
}
