use async_graphql::Context;

use crate::{
    auth::CurrentUser,
    errors::{AppError, AppResult},
};

pub fn require_admin(user: &CurrentUser) -> AppResult<()> {
    if !user.is_admin() {
        return Err(AppError::Forbidden(
            "Only admins can perform this action".to_string(),
        ));
    }
    Ok(())
}

pub fn require_owner_or_admin(user: &CurrentUser, resource_owner: &str) -> AppResult<()> {
    if !user.is_admin() && user.id != resource_owner {
        return Err(AppError::Forbidden(
            "You can only access your own progress".to_string(),
        ));
    }
    Ok(())
}

pub fn extract_user_from_context(ctx: &Context<'_>) -> AppResult<CurrentUser> {
    ctx.data::<CurrentUser>()
        .cloned()
        .map_err(|_| AppError::Unauthorized("Missing user identity".to_string()))
}
