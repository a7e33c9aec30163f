//! JWT authentication middleware.
//!
//! Verifies the bearer token and re-resolves the user from storage,
//! so role changes and deletions take effect on the next request
//! rather than at token expiry.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::UserRole;
use crate::errors::AppError;

/// Authenticated user injected into request extensions
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
}

impl CurrentUser {
    /// Check if user has admin role.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// JWT authentication middleware.
///
/// Extracts the bearer token from the Authorization header, verifies
/// it and loads the current user record, then injects CurrentUser
/// into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::Unauthorized)?;

    let user = state.auth_service.authenticate(token).await?;

    let current_user = CurrentUser {
        id: user.id,
        email: user.email,
        role: user.role,
    };

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}

/// Require one of the given roles, Forbidden otherwise.
///
/// Role sets are exact: an admin is not implicitly allowed through
/// a USER-only or STORE_OWNER-only endpoint.
pub fn require_role(user: &CurrentUser, allowed: &[UserRole]) -> Result<(), AppError> {
    if allowed.contains(&user.role) {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Require admin role, returns Forbidden error if not admin.
pub fn require_admin(user: &CurrentUser) -> Result<(), AppError> {
    require_role(user, &[UserRole::Admin])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with(role: UserRole) -> CurrentUser {
        CurrentUser {
            id: Uuid::new_v4(),
            email: "someone@example.com".to_string(),
            role,
        }
    }

    #[test]
    fn role_gates_are_exact() {
        let admin = user_with(UserRole::Admin);
        let owner = user_with(UserRole::StoreOwner);
        let user = user_with(UserRole::User);

        assert!(require_admin(&admin).is_ok());
        assert!(require_admin(&user).is_err());

        // Admin does not pass a USER-only gate
        assert!(require_role(&user, &[UserRole::User]).is_ok());
        assert!(require_role(&admin, &[UserRole::User]).is_err());
        assert!(require_role(&owner, &[UserRole::StoreOwner]).is_ok());
        assert!(require_role(&admin, &[UserRole::StoreOwner]).is_err());
    }
}
