//! Error response normalization middleware
//!
//! Framework-level rejections (malformed JSON, bad query strings, unknown
//! routes) come back as text/plain. This rewrites them into the same
//! `{"error", "message"}` body that `AppError` produces.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Rewrite non-JSON 4xx/5xx responses into the uniform JSON error body
pub async fn normalize_error_response(request: Request<Body>, next: Next) -> Response {
    let uri = request.uri().path().to_string();
    let response = next.run(request).await;

    let status = response.status();

    // Health checks and the metrics endpoint answer in plain text
    if uri == "/health" || uri == "/ready" || uri == "/metrics" {
        return response;
    }

    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"));

    if is_json {
        return response;
    }

    let mut normalized = generic_error_response(status);
    // Keep the auth challenge on normalized 401s
    if status == StatusCode::UNAUTHORIZED {
        if let Some(challenge) = response.headers().get(header::WWW_AUTHENTICATE) {
            normalized
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, challenge.clone());
        }
    }
    normalized
}

fn generic_error_response(status: StatusCode) -> Response {
    let (error_type, message) = match status {
        StatusCode::BAD_REQUEST => ("bad_request", "Invalid request"),
        StatusCode::UNAUTHORIZED => ("unauthorized", "Authentication required"),
        StatusCode::FORBIDDEN => ("forbidden", "Access denied"),
        StatusCode::NOT_FOUND => ("not_found", "Not found"),
        StatusCode::METHOD_NOT_ALLOWED => ("method_not_allowed", "Method not allowed"),
        StatusCode::CONFLICT => ("conflict", "Resource conflict"),
        StatusCode::UNPROCESSABLE_ENTITY => ("validation", "Request body is invalid"),
        StatusCode::UNSUPPORTED_MEDIA_TYPE => {
            ("unsupported_media_type", "Unsupported content type")
        }
        _ if status.is_client_error() => ("client_error", "Client error"),
        _ => ("internal_error", "An internal error occurred"),
    };

    let body = json!({
        "error": error_type,
        "message": message,
    });

    (status, axum::Json(body)).into_response()
}
