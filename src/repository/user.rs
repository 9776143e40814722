//! User repository

use super::map_unique_violation;
use crate::domain::{NewUser, StringUuid, User, UserQuery};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, input: &NewUser) -> Result<User>;
    async fn find_by_id(&self, id: StringUuid) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn list(&self, query: &UserQuery) -> Result<Vec<User>>;
}

pub struct UserRepositoryImpl {
    pool: MySqlPool,
}

impl UserRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn create(&self, input: &NewUser) -> Result<User> {
        let id = StringUuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, role, slaughterhouse_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, NOW(), NOW())
            "#,
        )
        .bind(id)
        .bind(&input.email)
        .bind(&input.password_hash)
        .bind(input.role)
        .bind(input.slaughterhouse_id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Email already registered"))?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create user")))
    }

    async fn find_by_id(&self, id: StringUuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, role, slaughterhouse_id, created_at, updated_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, role, slaughterhouse_id, created_at, updated_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn list(&self, query: &UserQuery) -> Result<Vec<User>> {
        let mut sql = String::from(
            "SELECT id, email, password_hash, role, slaughterhouse_id, created_at, updated_at FROM users WHERE 1=1",
        );

        if query.role.is_some() {
            sql.push_str(" AND role = ?");
        }
        if query.slaughterhouse_id.is_some() {
            sql.push_str(" AND slaughterhouse_id = ?");
        }

        sql.push_str(" ORDER BY created_at DESC");

        let mut query_builder = sqlx::query_as::<_, User>(&sql);

        if let Some(role) = query.role {
            query_builder = query_builder.bind(role);
        }
        if let Some(slaughterhouse_id) = query.slaughterhouse_id {
            query_builder = query_builder.bind(slaughterhouse_id);
        }

        let users = query_builder.fetch_all(&self.pool).await?;
        Ok(users)
    }
}
