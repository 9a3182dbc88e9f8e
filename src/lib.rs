// Library crate for the school transport API
// This file exposes the public API for the binary and integration tests

pub mod assignment;
pub mod config;
pub mod database;
pub mod driver;
pub mod routes;
pub mod school;
pub mod shared;

// Re-export commonly used types for easier access in tests
pub use config::{AppConfig, ConfigError};
pub use driver::{CredentialHasher, PasswordHashing};
pub use routes::router;
pub use shared::{AppError, AppState};
