//! Authentication: credential checks, session tokens, role guards

use crate::crypto::{generate_password, hash_password, verify_password};
use crate::domain::{normalize_email, StringUuid, User, UserRole};
use crate::error::{AppError, Result};
use crate::jwt::JwtManager;
use crate::repository::UserRepository;
use serde::Serialize;
use std::sync::{Arc, OnceLock};

const INVALID_CREDENTIALS: &str = "Incorrect email or password";
const INVALID_SESSION: &str = "Could not validate credentials";

/// Argon2 hash of a random password, checked when the email is unknown so
/// both failure paths pay for one verification
fn dummy_password_hash() -> &'static str {
    static DUMMY_HASH: OnceLock<String> = OnceLock::new();
    DUMMY_HASH.get_or_init(|| hash_password(&generate_password()).unwrap_or_default())
}

/// Successful login payload
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: User,
}

pub struct AuthService<U: UserRepository> {
    user_repo: Arc<U>,
    jwt_manager: JwtManager,
}

impl<U: UserRepository> AuthService<U> {
    pub fn new(user_repo: Arc<U>, jwt_manager: JwtManager) -> Self {
        Self {
            user_repo,
            jwt_manager,
        }
    }

    /// Exchange email and password for a bearer token.
    ///
    /// Unknown email and wrong password fail with the same message.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let email = normalize_email(email);

        let user = match self.user_repo.find_by_email(&email).await? {
            Some(user) if verify_password(password, &user.password_hash) => user,
            found => {
                if found.is_none() {
                    verify_password(password, dummy_password_hash());
                }
                metrics::counter!("meatsafe_auth_login_total", "result" => "failure").increment(1);
                tracing::info!("Rejected login attempt");
                return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
            }
        };

        let access_token = self
            .jwt_manager
            .create_session_token(user.id.into(), user.role)?;

        metrics::counter!("meatsafe_auth_login_total", "result" => "success").increment(1);
        tracing::info!(user_id = %user.id, role = %user.role, "User logged in");

        Ok(LoginResponse {
            access_token,
            token_type: "bearer".to_string(),
            user,
        })
    }

    /// Resolve a bearer token to the user it was issued for
    pub async fn authenticate(&self, token: &str) -> Result<User> {
        let claims = self
            .jwt_manager
            .verify_session_token(token)
            .map_err(|_| AppError::Unauthorized(INVALID_SESSION.to_string()))?;

        let user_id: StringUuid = claims
            .sub
            .parse()
            .map_err(|_| AppError::Unauthorized(INVALID_SESSION.to_string()))?;

        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized(INVALID_SESSION.to_string()))
    }
}

/// Fail with `Forbidden` unless the user holds `role`
pub fn require_role(user: &User, role: UserRole) -> Result<&User> {
    if user.role == role {
        return Ok(user);
    }

    let message = match role {
        UserRole::Admin => "Administrator access required",
        UserRole::Inspector => "Inspector access required",
    };
    Err(AppError::Forbidden(message.to_string()))
}
