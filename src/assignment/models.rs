use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database model for motorista_escola table
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Assignment {
    pub motorista_id: i64,
    pub escola_id: i64,
    pub turno: String,
}

/// A driver covering a given school during a given shift
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct RouteDriver {
    pub motorista_id: i64,
    pub nome: String,
}

/// School name paired with the shift of one of its assignments
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct SchoolShift {
    pub nome: String,
    pub turno: String,
}
