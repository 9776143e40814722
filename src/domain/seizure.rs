//! Seizure record domain model

use super::common::{impl_mysql_string_enum, StringUuid};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Maximum allowed page_size for seizure listings
pub const MAX_PAGE_SIZE: i64 = 100;

/// Longest accepted seizure reason, matching the `reason` column width
pub const MAX_REASON_LEN: usize = 255;

/// Animal species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Bovine,
    Ovine,
    Caprine,
    Porcine,
    Camelid,
    Other,
}

impl Species {
    pub fn as_str(&self) -> &'static str {
        match self {
            Species::Bovine => "bovine",
            Species::Ovine => "ovine",
            Species::Caprine => "caprine",
            Species::Porcine => "porcine",
            Species::Camelid => "camelid",
            Species::Other => "other",
        }
    }
}

impl std::str::FromStr for Species {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bovine" => Ok(Species::Bovine),
            "ovine" => Ok(Species::Ovine),
            "caprine" => Ok(Species::Caprine),
            "porcine" => Ok(Species::Porcine),
            "camelid" => Ok(Species::Camelid),
            "other" => Ok(Species::Other),
            _ => Err(format!("Unknown species: {}", s)),
        }
    }
}

impl_mysql_string_enum!(Species);

/// Part of the carcass that was seized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeizedPart {
    Carcass,
    Liver,
    Lung,
    Heart,
    Kidney,
    Spleen,
    Head,
    Other,
}

impl SeizedPart {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeizedPart::Carcass => "carcass",
            SeizedPart::Liver => "liver",
            SeizedPart::Lung => "lung",
            SeizedPart::Heart => "heart",
            SeizedPart::Kidney => "kidney",
            SeizedPart::Spleen => "spleen",
            SeizedPart::Head => "head",
            SeizedPart::Other => "other",
        }
    }
}

impl std::str::FromStr for SeizedPart {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "carcass" => Ok(SeizedPart::Carcass),
            "liver" => Ok(SeizedPart::Liver),
            "lung" => Ok(SeizedPart::Lung),
            "heart" => Ok(SeizedPart::Heart),
            "kidney" => Ok(SeizedPart::Kidney),
            "spleen" => Ok(SeizedPart::Spleen),
            "head" => Ok(SeizedPart::Head),
            "other" => Ok(SeizedPart::Other),
            _ => Err(format!("Unknown seized part: {}", s)),
        }
    }
}

impl_mysql_string_enum!(SeizedPart);

/// Whether the whole carcass or only part of it was condemned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeizureType {
    Partial,
    Total,
}

impl SeizureType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeizureType::Partial => "partial",
            SeizureType::Total => "total",
        }
    }
}

impl std::str::FromStr for SeizureType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "partial" => Ok(SeizureType::Partial),
            "total" => Ok(SeizureType::Total),
            _ => Err(format!("Unknown seizure type: {}", s)),
        }
    }
}

impl_mysql_string_enum!(SeizureType);

/// Unit of the seized quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Kg,
    G,
    Pieces,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Kg => "kg",
            Unit::G => "g",
            Unit::Pieces => "pieces",
        }
    }
}

impl std::str::FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kg" => Ok(Unit::Kg),
            "g" => Ok(Unit::G),
            "pieces" => Ok(Unit::Pieces),
            _ => Err(format!("Unknown unit: {}", s)),
        }
    }
}

impl_mysql_string_enum!(Unit);

/// Seizure record entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SeizureRecord {
    pub id: StringUuid,
    pub seizure_datetime: DateTime<Utc>,
    pub species: Species,
    pub seized_part: SeizedPart,
    pub seizure_type: SeizureType,
    pub reason: String,
    pub quantity: f64,
    pub unit: Unit,
    pub notes: Option<String>,
    #[sqlx(json)]
    pub photos: Vec<String>,
    pub slaughterhouse_id: StringUuid,
    pub inspector_id: StringUuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for recording a seizure.
///
/// Every field is optional at the wire level so that a missing field surfaces
/// as a validation error naming the field. `slaughterhouse_id` and
/// `inspector_id` are deliberately absent: they come from the caller.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateSeizureInput {
    pub seizure_datetime: Option<String>,
    pub species: Option<Species>,
    pub seized_part: Option<SeizedPart>,
    pub seizure_type: Option<SeizureType>,
    pub reason: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<Unit>,
    pub notes: Option<String>,
    pub photos: Option<Vec<String>>,
}

/// Fully validated seizure ready to be persisted
#[derive(Debug, Clone)]
pub struct NewSeizureRecord {
    pub seizure_datetime: DateTime<Utc>,
    pub species: Species,
    pub seized_part: SeizedPart,
    pub seizure_type: SeizureType,
    pub reason: String,
    pub quantity: f64,
    pub unit: Unit,
    pub notes: Option<String>,
    pub photos: Vec<String>,
    pub slaughterhouse_id: StringUuid,
    pub inspector_id: StringUuid,
}

/// Query string accepted by the seizure listing endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct SeizureQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub species: Option<Species>,
    pub reason: Option<String>,
    #[serde(default = "default_page", deserialize_with = "deserialize_page")]
    pub page: i64,
    #[serde(
        default = "default_page_size",
        deserialize_with = "deserialize_page_size"
    )]
    pub page_size: i64,
}

impl Default for SeizureQuery {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            species: None,
            reason: None,
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    20
}

/// Reject page values less than 1
fn deserialize_page<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = deserialize_number(deserializer)?;
    if value < 1 {
        return Err(serde::de::Error::custom(
            "page must be a positive integer (>= 1)",
        ));
    }
    Ok(value)
}

/// Reject page_size values less than 1, clamp to MAX_PAGE_SIZE
fn deserialize_page_size<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = deserialize_number(deserializer)?;
    if value < 1 {
        return Err(serde::de::Error::custom(
            "page_size must be a positive integer (>= 1)",
        ));
    }
    Ok(value.min(MAX_PAGE_SIZE))
}

/// Query strings arrive as text; JSON bodies arrive as numbers
fn deserialize_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(i64),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid integer: {}", s))),
    }
}

/// Resolved listing filter handed to the repository
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeizureFilter {
    pub slaughterhouse_id: Option<StringUuid>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub species: Option<Species>,
    pub reason: Option<String>,
}

impl SeizureFilter {
    /// Whether a record falls inside this filter
    pub fn matches(&self, record: &SeizureRecord) -> bool {
        self.slaughterhouse_id
            .is_none_or(|id| record.slaughterhouse_id == id)
            && self.start.is_none_or(|start| record.seizure_datetime >= start)
            && self.end.is_none_or(|end| record.seizure_datetime <= end)
            && self.species.is_none_or(|species| record.species == species)
            && self
                .reason
                .as_deref()
                .is_none_or(|reason| record.reason == reason)
    }
}

/// One page of seizure records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeizurePage {
    pub items: Vec<SeizureRecord>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

/// Parse a client-supplied timestamp.
///
/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.fff]` (or space separated)
/// interpreted as UTC, or a bare `YYYY-MM-DD` meaning midnight UTC.
pub fn parse_datetime(value: &str) -> Result<DateTime<Utc>, String> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }

    Err(format!("Invalid datetime: {}", value))
}
