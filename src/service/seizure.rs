//! Seizure ledger business logic

use crate::domain::{
    parse_datetime, CreateSeizureInput, NewSeizureRecord, SeizureFilter, SeizurePage,
    SeizureQuery, SeizureRecord, StringUuid, User, UserRole, MAX_REASON_LEN,
};
use crate::error::{AppError, Result};
use crate::repository::SeizureRepository;
use crate::service::auth::require_role;
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub struct SeizureService<R: SeizureRepository> {
    repo: Arc<R>,
}

fn missing(field: &str) -> AppError {
    AppError::Validation(format!("Field '{}' is required", field))
}

/// Parse an optional date bound, failing with `Validation` on bad input
pub(crate) fn parse_bound(value: Option<&str>, field: &str) -> Result<Option<DateTime<Utc>>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => parse_datetime(v)
            .map(Some)
            .map_err(|e| AppError::Validation(format!("{}: {}", field, e))),
        None => Ok(None),
    }
}

impl<R: SeizureRepository> SeizureService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Record a seizure at the inspector's own slaughterhouse
    pub async fn create(&self, inspector: &User, input: CreateSeizureInput) -> Result<SeizureRecord> {
        require_role(inspector, UserRole::Inspector)?;

        let slaughterhouse_id = inspector.slaughterhouse_id.ok_or_else(|| {
            AppError::Validation("Inspector is not assigned to a slaughterhouse".to_string())
        })?;

        let species = input.species.ok_or_else(|| missing("species"))?;
        let seized_part = input.seized_part.ok_or_else(|| missing("seized_part"))?;
        let seizure_type = input.seizure_type.ok_or_else(|| missing("seizure_type"))?;
        let unit = input.unit.ok_or_else(|| missing("unit"))?;

        let reason = input
            .reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .ok_or_else(|| missing("reason"))?;
        if reason.chars().count() > MAX_REASON_LEN {
            return Err(AppError::Validation(format!(
                "Reason must be at most {} characters",
                MAX_REASON_LEN
            )));
        }

        let quantity = input.quantity.ok_or_else(|| missing("quantity"))?;
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(AppError::Validation(
                "Quantity must be a positive number".to_string(),
            ));
        }

        let seizure_datetime =
            parse_bound(input.seizure_datetime.as_deref(), "seizure_datetime")?
                .unwrap_or_else(Utc::now);

        let record = self
            .repo
            .create(&NewSeizureRecord {
                seizure_datetime,
                species,
                seized_part,
                seizure_type,
                reason,
                quantity,
                unit,
                notes: input.notes,
                photos: input.photos.unwrap_or_default(),
                slaughterhouse_id,
                inspector_id: inspector.id,
            })
            .await?;

        metrics::counter!("meatsafe_seizures_recorded_total", "species" => species.as_str())
            .increment(1);
        tracing::info!(
            seizure_id = %record.id,
            slaughterhouse_id = %slaughterhouse_id,
            inspector_id = %inspector.id,
            "Recorded seizure"
        );

        Ok(record)
    }

    /// One page of records visible to `caller`, newest first
    pub async fn list(&self, caller: &User, query: SeizureQuery) -> Result<SeizurePage> {
        let page = query.page.max(1);
        let page_size = query.page_size.clamp(1, crate::domain::MAX_PAGE_SIZE);

        let slaughterhouse_id = match caller.role {
            UserRole::Admin => None,
            UserRole::Inspector => match caller.slaughterhouse_id {
                Some(id) => Some(id),
                None => {
                    return Ok(SeizurePage {
                        items: vec![],
                        total: 0,
                        page,
                        page_size,
                    })
                }
            },
        };

        let filter = SeizureFilter {
            slaughterhouse_id,
            start: parse_bound(query.start_date.as_deref(), "start_date")?,
            end: parse_bound(query.end_date.as_deref(), "end_date")?,
            species: query.species,
            reason: query.reason.filter(|r| !r.is_empty()),
        };

        let total = self.repo.count(&filter).await?;
        // A page too far out to address holds no records
        let items = match (page - 1).checked_mul(page_size) {
            Some(offset) => self.repo.list(&filter, offset, page_size).await?,
            None => vec![],
        };

        Ok(SeizurePage {
            items,
            total,
            page,
            page_size,
        })
    }

    pub async fn get(&self, caller: &User, id: StringUuid) -> Result<SeizureRecord> {
        let record = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Seizure record not found".to_string()))?;

        if caller.role == UserRole::Inspector
            && caller.slaughterhouse_id != Some(record.slaughterhouse_id)
        {
            return Err(AppError::Forbidden(
                "Access to this seizure record is denied".to_string(),
            ));
        }

        Ok(record)
    }

    pub async fn delete(&self, id: StringUuid) -> Result<()> {
        self.repo.delete(id).await?;
        tracing::info!(seizure_id = %id, "Deleted seizure record");
        Ok(())
    }
}
