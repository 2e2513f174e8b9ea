use async_graphql::{Context, Error, Result};
use uuid::Uuid;

use crate::auth::Claims;
use crate::gql::types::{Role, User};
use crate::state::AppState;

/// Fetch the authenticated user, or fail with a login prompt.
pub async fn require_user(ctx: &Context<'_>) -> Result<User> {
    let claims = ctx
        .data::<Claims>()
        .map_err(|_| Error::new("You must be logged in to perform this action"))?;

    let user_id =
        Uuid::parse_str(&claims.sub).map_err(|e| Error::new(format!("Invalid user ID: {}", e)))?;

    let state = ctx.data::<AppState>()?;
    get_user_by_id(state, user_id).await
}

/// Check that the authenticated user has (at least) the required role.
pub async fn require_role(ctx: &Context<'_>, required_role: Role) -> Result<User> {
    let claims = ctx
        .data::<Claims>()
        .map_err(|_| Error::new("You must be logged in to perform this action"))?;

    // Check the role from JWT claims first (avoids a DB query on mismatch)
    let claims_role = Role::from(claims.role.clone());
    if !has_required_role(&claims_role, required_role) {
        return Err(Error::new(format!(
            "Access denied: {:?} privileges required. Your current role is {:?}",
            required_role, claims_role
        )));
    }

    let user_id =
        Uuid::parse_str(&claims.sub).map_err(|e| Error::new(format!("Invalid user ID: {}", e)))?;

    let state = ctx.data::<AppState>()?;
    get_user_by_id(state, user_id).await
}

/// Check that the authenticated user owns the given ground, or is an admin.
pub async fn require_ground_owner(ctx: &Context<'_>, ground_id: Uuid) -> Result<User> {
    let user = require_user(ctx).await?;

    if user.role == Role::Admin || user.role == Role::SuperAdmin {
        return Ok(user);
    }

    let state = ctx.data::<AppState>()?;
    let ground = infra::repos::grounds::get_by_id(&state.db, ground_id)
        .await
        .map_err(|e| Error::new(format!("Database error: {}", e)))?
        .ok_or_else(|| Error::new("Ground not found"))?;

    let user_id = Uuid::parse_str(user.id.as_str())
        .map_err(|e| Error::new(format!("Invalid user ID: {}", e)))?;

    if ground.owner_id != user_id {
        return Err(Error::new(
            "Access denied: only the ground owner or an administrator can perform this action",
        ));
    }

    Ok(user)
}

pub async fn require_admin(ctx: &Context<'_>) -> Result<User> {
    require_role(ctx, Role::Admin).await
}

async fn get_user_by_id(state: &AppState, user_id: Uuid) -> Result<User> {
    let row = infra::repos::users::get_by_id(&state.db, user_id)
        .await
        .map_err(|e| Error::new(format!("Database error: {}", e)))?
        .ok_or_else(|| Error::new("User not found"))?;

    Ok(User::from(row))
}

fn has_required_role(user_role: &Role, required_role: Role) -> bool {
    match required_role {
        Role::SuperAdmin => *user_role == Role::SuperAdmin,
        Role::Admin => matches!(user_role, Role::Admin | Role::SuperAdmin),
        Role::GroundOwner => matches!(user_role, Role::GroundOwner | Role::Admin | Role::SuperAdmin),
        Role::SportsProfessional => matches!(
            user_role,
            Role::SportsProfessional | Role::Admin | Role::SuperAdmin
        ),
        Role::User => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_satisfies_owner_checks() {
        assert!(has_required_role(&Role::Admin, Role::GroundOwner));
        assert!(has_required_role(&Role::SuperAdmin, Role::Admin));
        assert!(!has_required_role(&Role::Admin, Role::SuperAdmin));
    }

    #[test]
    fn plain_user_is_only_a_user() {
        assert!(has_required_role(&Role::User, Role::User));
        assert!(!has_required_role(&Role::User, Role::GroundOwner));
        assert!(!has_required_role(&Role::User, Role::Admin));
        assert!(!has_required_role(&Role::GroundOwner, Role::SportsProfessional));
    }
}
