//! Bearer-token authentication extractor

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use crate::domain::{User, UserRole};
use crate::error::AppError;
use crate::service::require_role;
use crate::state::HasServices;

/// The user behind the request's bearer token
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl AuthUser {
    /// Fail with `Forbidden` unless the caller holds `role`
    pub fn require(&self, role: UserRole) -> Result<&User, AppError> {
        require_role(&self.0, role)
    }
}

impl std::ops::Deref for AuthUser {
    type Target = User;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Extract the token from `Authorization: Bearer <token>`
fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("Missing authorization token".to_string()))?
        .to_str()
        .map_err(|_| AppError::Unauthorized("Invalid authorization header".to_string()))?;

    let token = match auth_header.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => token.trim(),
        _ => {
            return Err(AppError::Unauthorized(
                "Authorization header must use Bearer scheme".to_string(),
            ))
        }
    };

    if token.is_empty() {
        return Err(AppError::Unauthorized("Missing authorization token".to_string()));
    }

    Ok(token)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: HasServices + Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)?;
        let user = state.auth_service().authenticate(token).await?;
        Ok(AuthUser(user))
    }
}
