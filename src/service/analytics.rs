//! Grouped counts over the seizure ledger

use crate::domain::{AnalyticsQuery, AnalyticsSummary, SeizureFilter};
use crate::error::Result;
use crate::repository::SeizureRepository;
use crate::service::seizure::parse_bound;
use std::sync::Arc;

pub struct AnalyticsService<R: SeizureRepository> {
    seizure_repo: Arc<R>,
}

impl<R: SeizureRepository> AnalyticsService<R> {
    pub fn new(seizure_repo: Arc<R>) -> Self {
        Self { seizure_repo }
    }

    /// Summary keyed on `seizure_datetime`; bounds are inclusive
    pub async fn summary(&self, query: AnalyticsQuery) -> Result<AnalyticsSummary> {
        let filter = SeizureFilter {
            slaughterhouse_id: query.slaughterhouse_id,
            start: parse_bound(query.start_date.as_deref(), "start_date")?,
            end: parse_bound(query.end_date.as_deref(), "end_date")?,
            ..Default::default()
        };

        let (total_cases, by_species, by_reason, by_seizure_type) = tokio::try_join!(
            self.seizure_repo.count(&filter),
            self.seizure_repo.count_by_species(&filter),
            self.seizure_repo.count_by_reason(&filter),
            self.seizure_repo.count_by_seizure_type(&filter),
        )?;

        Ok(AnalyticsSummary {
            total_cases,
            by_species,
            by_reason,
            by_seizure_type,
        })
    }
}
