// Public API - what other modules can use
pub use handlers::{list_schools, list_shifts};

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
