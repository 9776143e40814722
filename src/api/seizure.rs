//! Seizure API handlers

use crate::api::{MessageResponse, SuccessResponse};
use crate::domain::{CreateSeizureInput, SeizureQuery, StringUuid, UserRole};
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::state::HasServices;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// Record a seizure (inspector)
pub async fn create<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Json(input): Json<CreateSeizureInput>,
) -> Result<impl IntoResponse> {
    let record = state.seizure_service().create(&auth, input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(record))))
}

/// List seizures; inspectors only see their own slaughterhouse
pub async fn list<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Query(query): Query<SeizureQuery>,
) -> Result<impl IntoResponse> {
    let page = state.seizure_service().list(&auth, query).await?;
    Ok(Json(page))
}

pub async fn get<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Path(id): Path<StringUuid>,
) -> Result<impl IntoResponse> {
    let record = state.seizure_service().get(&auth, id).await?;
    Ok(Json(SuccessResponse::new(record)))
}

/// Delete a seizure (admin)
pub async fn delete<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Path(id): Path<StringUuid>,
) -> Result<impl IntoResponse> {
    auth.require(UserRole::Admin)?;
    state.seizure_service().delete(id).await?;
    Ok(Json(MessageResponse::new("Seizure record deleted")))
}
