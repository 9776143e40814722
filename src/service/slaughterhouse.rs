//! Slaughterhouse directory business logic

use crate::domain::{
    CreateSlaughterhouseInput, Slaughterhouse, StringUuid, UpdateSlaughterhouseInput,
};
use crate::error::{AppError, Result};
use crate::repository::{SeizureRepository, SlaughterhouseRepository};
use std::sync::Arc;
use validator::Validate;

pub struct SlaughterhouseService<R: SlaughterhouseRepository, SR: SeizureRepository> {
    repo: Arc<R>,
    seizure_repo: Arc<SR>,
}

impl<R: SlaughterhouseRepository, SR: SeizureRepository> SlaughterhouseService<R, SR> {
    pub fn new(repo: Arc<R>, seizure_repo: Arc<SR>) -> Self {
        Self { repo, seizure_repo }
    }

    pub async fn create(&self, input: CreateSlaughterhouseInput) -> Result<Slaughterhouse> {
        input.validate()?;

        if self.repo.find_by_code(&input.code).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Slaughterhouse with code '{}' already exists",
                input.code
            )));
        }

        let slaughterhouse = self.repo.create(&input).await?;
        tracing::info!(
            slaughterhouse_id = %slaughterhouse.id,
            code = %slaughterhouse.code,
            "Created slaughterhouse"
        );
        Ok(slaughterhouse)
    }

    pub async fn get(&self, id: StringUuid) -> Result<Slaughterhouse> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Slaughterhouse not found".to_string()))
    }

    pub async fn list(&self) -> Result<Vec<Slaughterhouse>> {
        self.repo.list().await
    }

    pub async fn update(
        &self,
        id: StringUuid,
        input: UpdateSlaughterhouseInput,
    ) -> Result<Slaughterhouse> {
        if input.is_empty() {
            return Err(AppError::Validation("No fields to update".to_string()));
        }
        input.validate()?;

        let existing = self.get(id).await?;

        if let Some(ref code) = input.code {
            if *code != existing.code {
                if let Some(other) = self.repo.find_by_code(code).await? {
                    if other.id != id {
                        return Err(AppError::Conflict(format!(
                            "Slaughterhouse with code '{}' already exists",
                            code
                        )));
                    }
                }
            }
        }

        self.repo.update(id, &input).await
    }

    /// Refuses while any seizure record still references the slaughterhouse
    pub async fn delete(&self, id: StringUuid) -> Result<()> {
        self.get(id).await?;

        let seizures = self.seizure_repo.count_by_slaughterhouse(id).await?;
        if seizures > 0 {
            return Err(AppError::Conflict(
                "Cannot delete a slaughterhouse with recorded seizures".to_string(),
            ));
        }

        self.repo.delete(id).await?;
        tracing::info!(slaughterhouse_id = %id, "Deleted slaughterhouse");
        Ok(())
    }
}
