//! Data access layer (Repository pattern)

pub mod seizure;
pub mod slaughterhouse;
pub mod user;

pub use seizure::SeizureRepository;
pub use slaughterhouse::SlaughterhouseRepository;
pub use user::UserRepository;

use crate::error::AppError;

/// Map a unique-key violation to `Conflict`, anything else to `Database`
pub(crate) fn map_unique_violation(err: sqlx::Error, message: impl Into<String>) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::Conflict(message.into())
        }
        _ => AppError::Database(err),
    }
}
