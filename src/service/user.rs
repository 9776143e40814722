//! User directory business logic

use crate::crypto::hash_password;
use crate::domain::{normalize_email, CreateUserInput, NewUser, User, UserQuery, UserRole};
use crate::error::{AppError, Result};
use crate::repository::{SlaughterhouseRepository, UserRepository};
use std::sync::Arc;
use validator::Validate;

pub struct UserService<U: UserRepository, S: SlaughterhouseRepository> {
    repo: Arc<U>,
    slaughterhouse_repo: Arc<S>,
}

impl<U: UserRepository, S: SlaughterhouseRepository> UserService<U, S> {
    pub fn new(repo: Arc<U>, slaughterhouse_repo: Arc<S>) -> Self {
        Self {
            repo,
            slaughterhouse_repo,
        }
    }

    pub async fn create(&self, mut input: CreateUserInput) -> Result<User> {
        input.email = normalize_email(&input.email);
        input.validate()?;

        match (input.role, input.slaughterhouse_id) {
            (UserRole::Inspector, None) => {
                return Err(AppError::Validation(
                    "An inspector must be assigned to a slaughterhouse".to_string(),
                ));
            }
            (UserRole::Admin, Some(_)) => {
                return Err(AppError::Validation(
                    "An administrator cannot be assigned to a slaughterhouse".to_string(),
                ));
            }
            _ => {}
        }

        if let Some(slaughterhouse_id) = input.slaughterhouse_id {
            if self
                .slaughterhouse_repo
                .find_by_id(slaughterhouse_id)
                .await?
                .is_none()
            {
                return Err(AppError::NotFound("Slaughterhouse not found".to_string()));
            }
        }

        if self.repo.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let password_hash = hash_password(&input.password)?;
        let user = self
            .repo
            .create(&NewUser {
                email: input.email,
                password_hash,
                role: input.role,
                slaughterhouse_id: input.slaughterhouse_id,
            })
            .await?;

        tracing::info!(user_id = %user.id, role = %user.role, "Created user");
        Ok(user)
    }

    pub async fn list(&self, query: &UserQuery) -> Result<Vec<User>> {
        self.repo.list(query).await
    }
}
