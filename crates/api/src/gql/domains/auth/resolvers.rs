use async_graphql::{Context, Object, Result};

use crate::auth::permissions::require_user;
use crate::gql::types::User;

#[derive(Default)]
pub struct AuthQuery;

#[Object]
impl AuthQuery {
    /// The currently authenticated user.
    async fn me(&self, ctx: &Context<'_>) -> Result<User> {
        require_user(ctx).await
    }
}
