//! Domain models

pub mod analytics;
pub mod common;
pub mod seizure;
pub mod slaughterhouse;
pub mod user;

pub use analytics::*;
pub use common::*;
pub use seizure::*;
pub use slaughterhouse::*;
pub use user::*;
