//! MeatSafe Core - Seizure Ledger Backend
//!
//! This crate provides the REST API for recording meat-inspection seizures
//! at slaughterhouses: authentication, slaughterhouse and user management,
//! role-scoped seizure records, and aggregate analytics.

pub mod api;
pub mod config;
pub mod crypto;
pub mod domain;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod migration;
pub mod repository;
pub mod server;
pub mod service;
pub mod state;
pub mod telemetry;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
