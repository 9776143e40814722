//! Analytics API handlers

use crate::domain::{AnalyticsQuery, UserRole};
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::state::HasServices;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};

/// GET /api/analytics/summary (admin)
pub async fn summary<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Query(query): Query<AnalyticsQuery>,
) -> Result<impl IntoResponse> {
    auth.require(UserRole::Admin)?;
    let summary = state.analytics_service().summary(query).await?;
    Ok(Json(summary))
}
