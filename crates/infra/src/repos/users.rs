use sqlx::{PgExecutor, Result as SqlxResult, Row};
use uuid::Uuid;

use crate::models::UserRow;
use crate::pagination::LimitOffset;

#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub search: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct CreateUserData {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub phone: Option<String>,
}

/// Credentials row kept separate from `UserRow` so password hashes never
/// travel through the API layer.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
}

const USER_COLUMNS: &str = "id, email, name, phone, role, is_active, created_at, updated_at";

pub async fn get_by_id<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> SqlxResult<Option<UserRow>> {
    sqlx::query_as::<_, UserRow>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn get_credentials_by_email<'e>(
    executor: impl PgExecutor<'e>,
    email: &str,
) -> SqlxResult<Option<UserCredentials>> {
    let row = sqlx::query(
        "SELECT id, email, password_hash, role, is_active FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(executor)
    .await?;

    Ok(row.map(|r| UserCredentials {
        id: r.get("id"),
        email: r.get("email"),
        password_hash: r.get("password_hash"),
        role: r.get("role"),
        is_active: r.get("is_active"),
    }))
}

pub async fn create<'e>(executor: impl PgExecutor<'e>, data: CreateUserData) -> SqlxResult<UserRow> {
    sqlx::query_as::<_, UserRow>(&format!(
        r#"
        INSERT INTO users (email, password_hash, name, phone)
        VALUES ($1, $2, $3, $4)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(data.email)
    .bind(data.password_hash)
    .bind(data.name)
    .bind(data.phone)
    .fetch_one(executor)
    .await
}

pub async fn list<'e>(
    executor: impl PgExecutor<'e>,
    filter: UserFilter,
    page: LimitOffset,
) -> SqlxResult<Vec<UserRow>> {
    let mut query = sqlx::QueryBuilder::new(format!(
        "SELECT {USER_COLUMNS} FROM users WHERE 1=1"
    ));

    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", search.to_lowercase());
        query.push(" AND (LOWER(name) LIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR LOWER(email) LIKE ");
        query.push_bind(pattern);
        query.push(")");
    }

    if let Some(role) = &filter.role {
        query.push(" AND role = ");
        query.push_bind(role.clone());
    }

    if let Some(is_active) = filter.is_active {
        query.push(" AND is_active = ");
        query.push_bind(is_active);
    }

    query.push(" ORDER BY created_at DESC");
    query.push(" LIMIT ");
    query.push_bind(page.limit);
    query.push(" OFFSET ");
    query.push_bind(page.offset);

    query.build_query_as::<UserRow>().fetch_all(executor).await
}

pub async fn count<'e>(executor: impl PgExecutor<'e>, filter: UserFilter) -> SqlxResult<i64> {
    let mut query = sqlx::QueryBuilder::new("SELECT COUNT(*) FROM users WHERE 1=1");

    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", search.to_lowercase());
        query.push(" AND (LOWER(name) LIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR LOWER(email) LIKE ");
        query.push_bind(pattern);
        query.push(")");
    }

    if let Some(role) = &filter.role {
        query.push(" AND role = ");
        query.push_bind(role.clone());
    }

    if let Some(is_active) = filter.is_active {
        query.push(" AND is_active = ");
        query.push_bind(is_active);
    }

    query
        .build_query_scalar::<i64>()
        .fetch_one(executor)
        .await
}

pub async fn set_role<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
    role: &str,
) -> SqlxResult<Option<UserRow>> {
    sqlx::query_as::<_, UserRow>(&format!(
        r#"
        UPDATE users SET role = $2, updated_at = NOW()
        WHERE id = $1
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(role)
    .fetch_optional(executor)
    .await
}
