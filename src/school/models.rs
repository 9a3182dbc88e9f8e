use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database model for escolas table
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct School {
    pub id: i64,
    pub nome: String,
}

/// Database model for turnos table (manha, meiodia, tarde)
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Shift {
    pub id: i64,
    pub nome: String,
}
