//! HTTP middleware
//!
//! - `AuthUser` bearer-token extractor
//! - request-id propagation and HTTP metrics
//! - uniform JSON bodies for framework-level error responses

pub mod auth;
pub mod error_response;
pub mod metrics;

pub use auth::AuthUser;
pub use error_response::normalize_error_response;
pub use metrics::ObservabilityLayer;
