//! Business logic layer

pub mod analytics;
pub mod auth;
pub mod seizure;
pub mod slaughterhouse;
pub mod user;

pub use analytics::AnalyticsService;
pub use auth::{require_role, AuthService, LoginResponse};
pub use seizure::SeizureService;
pub use slaughterhouse::SlaughterhouseService;
pub use user::UserService;
