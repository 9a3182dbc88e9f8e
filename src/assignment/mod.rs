// Public API - what other modules can use
pub use handlers::{filter_school_names, find_route, list_assignments};

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;
