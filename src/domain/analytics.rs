//! Seizure analytics domain models

use super::common::StringUuid;
use super::seizure::{SeizureType, Species};
use serde::{Deserialize, Serialize};

/// Query string accepted by the summary endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyticsQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub slaughterhouse_id: Option<StringUuid>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesCount {
    pub species: Species,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasonCount {
    pub reason: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeizureTypeCount {
    pub seizure_type: SeizureType,
    pub count: i64,
}

/// Grouped counts over the seizure ledger
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub total_cases: i64,
    pub by_species: Vec<SpeciesCount>,
    pub by_reason: Vec<ReasonCount>,
    pub by_seizure_type: Vec<SeizureTypeCount>,
}
