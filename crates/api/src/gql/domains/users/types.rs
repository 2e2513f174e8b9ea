use async_graphql::{SimpleObject, ID};
use chrono::{DateTime, Utc};

use crate::gql::types::Role;
use infra::models::UserRow;

#[derive(SimpleObject, Clone, Debug)]
pub struct User {
    pub id: ID,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: ID(row.id.to_string()),
            email: row.email,
            name: row.name,
            phone: row.phone,
            role: Role::from(row.role),
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}
