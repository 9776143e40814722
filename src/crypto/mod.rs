//! Cryptographic helpers

pub mod password;

pub use password::{generate_password, hash_password, verify_password};
