//! Login endpoint

use crate::error::{AppError, Result};
use crate::state::HasServices;
use axum::{extract::State, response::IntoResponse, Form, Json};
use serde::Deserialize;

/// OAuth2 password-style login form
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(alias = "email")]
    pub username: Option<String>,
    pub password: Option<String>,
}

/// POST /api/auth/login
pub async fn login<S: HasServices>(
    State(state): State<S>,
    Form(form): Form<LoginForm>,
) -> Result<impl IntoResponse> {
    let (Some(username), Some(password)) = (form.username, form.password) else {
        return Err(AppError::Validation(
            "Both username and password are required".to_string(),
        ));
    };

    let response = state.auth_service().login(&username, &password).await?;
    Ok(Json(response))
}
