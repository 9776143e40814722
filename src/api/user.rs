//! User API handlers

use crate::api::SuccessResponse;
use crate::domain::{CreateUserInput, UserQuery, UserRole};
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::state::HasServices;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// Create user (admin)
pub async fn create<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Json(input): Json<CreateUserInput>,
) -> Result<impl IntoResponse> {
    auth.require(UserRole::Admin)?;
    let user = state.user_service().create(input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(user))))
}

/// List users (admin)
pub async fn list<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Query(query): Query<UserQuery>,
) -> Result<impl IntoResponse> {
    auth.require(UserRole::Admin)?;
    let users = state.user_service().list(&query).await?;
    Ok(Json(SuccessResponse::new(users)))
}

/// Current user
pub async fn me(auth: AuthUser) -> Result<impl IntoResponse> {
    Ok(Json(SuccessResponse::new(auth.0)))
}
