//! Slaughterhouse API handlers (admin only)

use crate::api::{MessageResponse, SuccessResponse};
use crate::domain::{
    CreateSlaughterhouseInput, StringUuid, UpdateSlaughterhouseInput, UserRole,
};
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::state::HasServices;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

pub async fn list<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
) -> Result<impl IntoResponse> {
    auth.require(UserRole::Admin)?;
    let slaughterhouses = state.slaughterhouse_service().list().await?;
    Ok(Json(SuccessResponse::new(slaughterhouses)))
}

pub async fn get<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Path(id): Path<StringUuid>,
) -> Result<impl IntoResponse> {
    auth.require(UserRole::Admin)?;
    let slaughterhouse = state.slaughterhouse_service().get(id).await?;
    Ok(Json(SuccessResponse::new(slaughterhouse)))
}

pub async fn create<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Json(input): Json<CreateSlaughterhouseInput>,
) -> Result<impl IntoResponse> {
    auth.require(UserRole::Admin)?;
    let slaughterhouse = state.slaughterhouse_service().create(input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(slaughterhouse))))
}

pub async fn update<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Path(id): Path<StringUuid>,
    Json(input): Json<UpdateSlaughterhouseInput>,
) -> Result<impl IntoResponse> {
    auth.require(UserRole::Admin)?;
    let slaughterhouse = state.slaughterhouse_service().update(id, input).await?;
    Ok(Json(SuccessResponse::new(slaughterhouse)))
}

pub async fn delete<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Path(id): Path<StringUuid>,
) -> Result<impl IntoResponse> {
    auth.require(UserRole::Admin)?;
    state.slaughterhouse_service().delete(id).await?;
    Ok(Json(MessageResponse::new("Slaughterhouse deleted")))
}
