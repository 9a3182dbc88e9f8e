use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use strum_macros::AsRefStr;
use thiserror::Error;
use tracing::error;

use crate::assignment::repository::AssignmentRepository;
use crate::driver::password::PasswordHashing;
use crate::driver::repository::DriverRepository;
use crate::school::repository::SchoolRepository;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub driver_repository: Arc<dyn DriverRepository + Send + Sync>,
    pub school_repository: Arc<dyn SchoolRepository + Send + Sync>,
    pub assignment_repository: Arc<dyn AssignmentRepository + Send + Sync>,
    pub hasher: Arc<dyn PasswordHashing + Send + Sync>,
}

impl AppState {
    pub fn new(
        driver_repository: Arc<dyn DriverRepository + Send + Sync>,
        school_repository: Arc<dyn SchoolRepository + Send + Sync>,
        assignment_repository: Arc<dyn AssignmentRepository + Send + Sync>,
        hasher: Arc<dyn PasswordHashing + Send + Sync>,
    ) -> Self {
        Self {
            driver_repository,
            school_repository,
            assignment_repository,
            hasher,
        }
    }
}

/// Request-level failure. The strum tag is the `kind` clients switch on.
#[derive(Error, Debug, AsRefStr)]
pub enum AppError {
    #[error("{context}: {detail}")]
    #[strum(serialize = "database_error")]
    Database { context: String, detail: String },

    #[error("Password hashing failed: {0}")]
    #[strum(serialize = "hashing_error")]
    Hashing(String),

    #[error("Invalid request: {0}")]
    #[strum(serialize = "invalid_request")]
    InvalidRequest(String),
}

impl AppError {
    /// Wraps a storage failure with the message the client will see
    pub fn database(context: &str, detail: impl std::fmt::Display) -> Self {
        AppError::Database {
            context: context.to_string(),
            detail: detail.to_string(),
        }
    }

    pub fn kind(&self) -> &str {
        self.as_ref()
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Database { .. } | AppError::Hashing(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Client-facing message; storage details stay in the logs
    fn public_message(&self) -> String {
        match self {
            AppError::Database { context, .. } => context.clone(),
            AppError::Hashing(_) => "Erro ao gerar hash da senha".to_string(),
            AppError::InvalidRequest(msg) => msg.clone(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(kind = self.kind(), error = %self, "Request failed");
        }

        let body = Json(json!({
            "kind": self.kind(),
            "error": self.public_message()
        }));

        (status, body).into_response()
    }
}
