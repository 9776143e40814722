//! Slaughterhouse domain model

use super::common::StringUuid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Slaughterhouse entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Slaughterhouse {
    pub id: StringUuid,
    pub name: String,
    pub code: String,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Default for Slaughterhouse {
    fn default() -> Self {
        Self {
            id: StringUuid::new_v4(),
            name: String::new(),
            code: String::new(),
            location: None,
            created_at: Utc::now(),
        }
    }
}

/// Input for creating a slaughterhouse
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSlaughterhouseInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 64))]
    pub code: String,
    #[validate(length(max = 255))]
    pub location: Option<String>,
}

/// Partial update; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSlaughterhouseInput {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 64))]
    pub code: Option<String>,
    #[validate(length(max = 255))]
    pub location: Option<String>,
}

impl UpdateSlaughterhouseInput {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.code.is_none() && self.location.is_none()
    }
}
