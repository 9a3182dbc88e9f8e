use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Public view of a row in the motoristas table (no password digest)
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Driver {
    pub id: i64,
    pub nome: String,
    pub usuario: String,
}

/// Full motoristas row, digest included. Only used for the login check
/// and deliberately not `Serialize`.
#[derive(Debug, Clone, FromRow)]
pub struct DriverCredentials {
    pub id: i64,
    pub nome: String,
    pub usuario: String,
    pub senha: String,
}

impl DriverCredentials {
    /// Strips the digest
    pub fn to_driver(&self) -> Driver {
        Driver {
            id: self.id,
            nome: self.nome.clone(),
            usuario: self.usuario.clone(),
        }
    }
}
