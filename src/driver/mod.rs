// Public API - what other modules can use
pub use handlers::{check_login, list_drivers, register_driver};
pub use password::{CredentialHasher, PasswordHashing};

// Internal modules
mod handlers;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod types;
