//! Slaughterhouse repository

use super::map_unique_violation;
use crate::domain::{
    CreateSlaughterhouseInput, Slaughterhouse, StringUuid, UpdateSlaughterhouseInput,
};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SlaughterhouseRepository: Send + Sync {
    async fn create(&self, input: &CreateSlaughterhouseInput) -> Result<Slaughterhouse>;
    async fn find_by_id(&self, id: StringUuid) -> Result<Option<Slaughterhouse>>;
    async fn find_by_code(&self, code: &str) -> Result<Option<Slaughterhouse>>;
    async fn list(&self) -> Result<Vec<Slaughterhouse>>;
    async fn update(
        &self,
        id: StringUuid,
        input: &UpdateSlaughterhouseInput,
    ) -> Result<Slaughterhouse>;
    async fn delete(&self, id: StringUuid) -> Result<()>;
}

pub struct SlaughterhouseRepositoryImpl {
    pool: MySqlPool,
}

impl SlaughterhouseRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SlaughterhouseRepository for SlaughterhouseRepositoryImpl {
    async fn create(&self, input: &CreateSlaughterhouseInput) -> Result<Slaughterhouse> {
        let id = StringUuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO slaughterhouses (id, name, code, location, created_at)
            VALUES (?, ?, ?, ?, NOW())
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.code)
        .bind(&input.location)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Slaughterhouse code already exists"))?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!("Failed to create slaughterhouse"))
        })
    }

    async fn find_by_id(&self, id: StringUuid) -> Result<Option<Slaughterhouse>> {
        let slaughterhouse = sqlx::query_as::<_, Slaughterhouse>(
            r#"
            SELECT id, name, code, location, created_at
            FROM slaughterhouses
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(slaughterhouse)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Slaughterhouse>> {
        let slaughterhouse = sqlx::query_as::<_, Slaughterhouse>(
            r#"
            SELECT id, name, code, location, created_at
            FROM slaughterhouses
            WHERE code = ?
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(slaughterhouse)
    }

    async fn list(&self) -> Result<Vec<Slaughterhouse>> {
        let slaughterhouses = sqlx::query_as::<_, Slaughterhouse>(
            r#"
            SELECT id, name, code, location, created_at
            FROM slaughterhouses
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(slaughterhouses)
    }

    async fn update(
        &self,
        id: StringUuid,
        input: &UpdateSlaughterhouseInput,
    ) -> Result<Slaughterhouse> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Slaughterhouse not found".to_string()))?;

        let name = input.name.as_ref().unwrap_or(&existing.name);
        let code = input.code.as_ref().unwrap_or(&existing.code);
        let location = input.location.as_ref().or(existing.location.as_ref());

        sqlx::query(
            r#"
            UPDATE slaughterhouses
            SET name = ?, code = ?, location = ?
            WHERE id = ?
            "#,
        )
        .bind(name)
        .bind(code)
        .bind(location)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Slaughterhouse code already exists"))?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Slaughterhouse not found".to_string()))
    }

    async fn delete(&self, id: StringUuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM slaughterhouses WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Slaughterhouse not found".to_string()));
        }

        Ok(())
    }
}
