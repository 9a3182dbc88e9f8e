use async_trait::async_trait;
use sqlx::MySqlPool;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, instrument, warn};

use super::models::{Driver, DriverCredentials};
use crate::shared::AppError;

const LIST_FAILED: &str = "Erro ao buscar motoristas";
const LOGIN_FAILED: &str = "Erro no servidor";
const CREATE_FAILED: &str = "Erro ao cadastrar motorista";

/// Trait for driver repository operations
#[async_trait]
pub trait DriverRepository {
    async fn list_drivers(&self) -> Result<Vec<Driver>, AppError>;
    async fn find_by_username(&self, usuario: &str)
        -> Result<Option<DriverCredentials>, AppError>;
    /// Inserts a driver and returns the generated id
    async fn create_driver(&self, nome: &str, usuario: &str, senha: &str)
        -> Result<i64, AppError>;
}

/// In-memory implementation of DriverRepository for development and testing
///
/// Mirrors the table constraints: ids are generated sequentially starting
/// at 1 and `usuario` is unique.
pub struct InMemoryDriverRepository {
    drivers: Mutex<Vec<DriverCredentials>>,
}

impl Default for InMemoryDriverRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDriverRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            drivers: Mutex::new(Vec::new()),
        }
    }

    fn rows(&self) -> MutexGuard<'_, Vec<DriverCredentials>> {
        self.drivers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the current number of drivers in the repository
    pub fn driver_count(&self) -> usize {
        self.rows().len()
    }

    /// Checks if a driver exists by id (stands in for the foreign key)
    pub fn has_driver(&self, id: i64) -> bool {
        self.rows().iter().any(|d| d.id == id)
    }

    pub fn driver_name(&self, id: i64) -> Option<String> {
        self.rows()
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.nome.clone())
    }
}

#[async_trait]
impl DriverRepository for InMemoryDriverRepository {
    #[instrument(skip(self))]
    async fn list_drivers(&self) -> Result<Vec<Driver>, AppError> {
        debug!("Listing all drivers in memory");
        Ok(self.rows().iter().map(DriverCredentials::to_driver).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_username(
        &self,
        usuario: &str,
    ) -> Result<Option<DriverCredentials>, AppError> {
        debug!(usuario = %usuario, "Fetching driver from memory");
        Ok(self.rows().iter().find(|d| d.usuario == usuario).cloned())
    }

    #[instrument(skip(self, senha))]
    async fn create_driver(
        &self,
        nome: &str,
        usuario: &str,
        senha: &str,
    ) -> Result<i64, AppError> {
        let mut drivers = self.rows();
        if drivers.iter().any(|d| d.usuario == usuario) {
            warn!(usuario = %usuario, "Username already taken in memory");
            return Err(AppError::database(
                CREATE_FAILED,
                format!("Duplicate entry '{}' for key 'usuario'", usuario),
            ));
        }

        let id = drivers.iter().map(|d| d.id).max().unwrap_or(0) + 1;
        drivers.push(DriverCredentials {
            id,
            nome: nome.to_string(),
            usuario: usuario.to_string(),
            senha: senha.to_string(),
        });

        debug!(driver_id = id, "Driver created successfully in memory");
        Ok(id)
    }
}

/// MySQL implementation of driver repository
pub struct MySqlDriverRepository {
    pool: MySqlPool,
}

impl MySqlDriverRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DriverRepository for MySqlDriverRepository {
    #[instrument(skip(self))]
    async fn list_drivers(&self) -> Result<Vec<Driver>, AppError> {
        sqlx::query_as::<_, Driver>("SELECT id, nome, usuario FROM motoristas")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to list drivers");
                AppError::database(LIST_FAILED, e)
            })
    }

    #[instrument(skip(self))]
    async fn find_by_username(
        &self,
        usuario: &str,
    ) -> Result<Option<DriverCredentials>, AppError> {
        sqlx::query_as::<_, DriverCredentials>(
            "SELECT id, nome, usuario, senha FROM motoristas WHERE usuario = ? LIMIT 1",
        )
        .bind(usuario)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, usuario = %usuario, "Failed to fetch driver by username");
            AppError::database(LOGIN_FAILED, e)
        })
    }

    #[instrument(skip(self, senha))]
    async fn create_driver(
        &self,
        nome: &str,
        usuario: &str,
        senha: &str,
    ) -> Result<i64, AppError> {
        let result = sqlx::query("INSERT INTO motoristas (nome, usuario, senha) VALUES (?, ?, ?)")
            .bind(nome)
            .bind(usuario)
            .bind(senha)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, usuario = %usuario, "Failed to create driver");
                AppError::database(CREATE_FAILED, e)
            })?;

        let id = i64::try_from(result.last_insert_id())
            .map_err(|e| AppError::database(CREATE_FAILED, e))?;
        debug!(driver_id = id, "Driver created successfully in database");
        Ok(id)
    }
}
