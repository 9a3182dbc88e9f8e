use serde::{Deserialize, Serialize};

use crate::assignment::types::FailedAssignment;

/// One school/shift pair a new driver will cover
#[derive(Debug, Clone, Deserialize)]
pub struct SchoolShiftEntry {
    pub id: i64,
    pub turno: String,
    /// Display name sent by the front end; only used in logs
    #[serde(default)]
    pub nome: Option<String>,
}

/// Request payload for POST /cadastrar-motorista
#[derive(Debug, Deserialize)]
pub struct RegisterDriverRequest {
    pub nome: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub escolas: Vec<SchoolShiftEntry>,
}

/// Response for a registration. `falhas` lists assignment inserts that
/// failed; the driver row is kept either way.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct RegisterDriverResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub falhas: Vec<FailedAssignment>,
}

/// Query string for GET /check-login
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Login outcome. Always sent with 200; callers inspect `success`.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usuario: Option<String>,
}

impl LoginResponse {
    pub fn rejected(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            id: None,
            nome: None,
            usuario: None,
        }
    }
}
