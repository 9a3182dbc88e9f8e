use async_trait::async_trait;
use sqlx::MySqlPool;
use tracing::{debug, instrument, warn};

use super::models::{School, Shift};
use crate::shared::AppError;

/// Read-only access to the escolas and turnos tables
#[async_trait]
pub trait SchoolRepository {
    async fn list_schools(&self) -> Result<Vec<School>, AppError>;
    async fn list_shifts(&self) -> Result<Vec<Shift>, AppError>;
}

/// In-memory implementation of SchoolRepository for development and testing
#[derive(Default)]
pub struct InMemorySchoolRepository {
    schools: Vec<School>,
    shifts: Vec<Shift>,
}

impl InMemorySchoolRepository {
    /// Creates a repository with pre-populated schools and shifts
    pub fn new(schools: Vec<School>, shifts: Vec<Shift>) -> Self {
        Self { schools, shifts }
    }

    /// Looks up a school by id (stands in for the foreign key)
    pub fn school(&self, id: i64) -> Option<&School> {
        self.schools.iter().find(|s| s.id == id)
    }
}

#[async_trait]
impl SchoolRepository for InMemorySchoolRepository {
    #[instrument(skip(self))]
    async fn list_schools(&self) -> Result<Vec<School>, AppError> {
        debug!(school_count = self.schools.len(), "Listing schools in memory");
        Ok(self.schools.clone())
    }

    #[instrument(skip(self))]
    async fn list_shifts(&self) -> Result<Vec<Shift>, AppError> {
        debug!(shift_count = self.shifts.len(), "Listing shifts in memory");
        Ok(self.shifts.clone())
    }
}

/// MySQL implementation of school repository
pub struct MySqlSchoolRepository {
    pool: MySqlPool,
}

impl MySqlSchoolRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SchoolRepository for MySqlSchoolRepository {
    #[instrument(skip(self))]
    async fn list_schools(&self) -> Result<Vec<School>, AppError> {
        sqlx::query_as::<_, School>("SELECT id, nome FROM escolas")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to list schools");
                AppError::database("Erro ao buscar escolas", e)
            })
    }

    #[instrument(skip(self))]
    async fn list_shifts(&self) -> Result<Vec<Shift>, AppError> {
        sqlx::query_as::<_, Shift>("SELECT id, nome FROM turnos")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to list shifts");
                AppError::database("Erro ao buscar turnos", e)
            })
    }
}
