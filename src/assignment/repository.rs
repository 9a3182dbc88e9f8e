use async_trait::async_trait;
use sqlx::MySqlPool;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, instrument, warn};

use super::models::{Assignment, RouteDriver, SchoolShift};
use crate::driver::repository::InMemoryDriverRepository;
use crate::school::repository::InMemorySchoolRepository;
use crate::shared::AppError;

const ROUTE_FAILED: &str = "Erro ao buscar linhas";
const CREATE_FAILED: &str = "Erro ao cadastrar motorista na escola";
const FILTER_FAILED: &str = "Erro ao filtrar nome da escola";

/// Trait for assignment (motorista_escola) repository operations
#[async_trait]
pub trait AssignmentRepository {
    async fn list_assignments(&self) -> Result<Vec<Assignment>, AppError>;
    async fn find_drivers_for_route(
        &self,
        escola_id: i64,
        turno: &str,
    ) -> Result<Vec<RouteDriver>, AppError>;
    async fn create_assignment(
        &self,
        motorista_id: i64,
        escola_id: i64,
        turno: &str,
    ) -> Result<(), AppError>;
    /// Schools joined to their assignments, restricted to `ids`.
    /// An empty `ids` yields an empty result.
    async fn school_names_for(&self, ids: &[i64]) -> Result<Vec<SchoolShift>, AppError>;
}

/// `?, ?, ?` for an `IN (...)` clause. Built from the count only, never the values.
pub(crate) fn in_placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

/// In-memory implementation of AssignmentRepository for development and testing
///
/// Joins against the in-memory driver and school repositories and enforces
/// their foreign keys the way the real table does.
pub struct InMemoryAssignmentRepository {
    drivers: Arc<InMemoryDriverRepository>,
    schools: Arc<InMemorySchoolRepository>,
    assignments: Mutex<Vec<Assignment>>,
}

impl InMemoryAssignmentRepository {
    pub fn new(
        drivers: Arc<InMemoryDriverRepository>,
        schools: Arc<InMemorySchoolRepository>,
    ) -> Self {
        Self {
            drivers,
            schools,
            assignments: Mutex::new(Vec::new()),
        }
    }

    fn rows(&self) -> MutexGuard<'_, Vec<Assignment>> {
        self.assignments
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the current number of assignments in the repository
    pub fn assignment_count(&self) -> usize {
        self.rows().len()
    }
}

#[async_trait]
impl AssignmentRepository for InMemoryAssignmentRepository {
    #[instrument(skip(self))]
    async fn list_assignments(&self) -> Result<Vec<Assignment>, AppError> {
        debug!("Listing all assignments in memory");
        Ok(self.rows().clone())
    }

    #[instrument(skip(self))]
    async fn find_drivers_for_route(
        &self,
        escola_id: i64,
        turno: &str,
    ) -> Result<Vec<RouteDriver>, AppError> {
        let matching: Vec<i64> = self
            .rows()
            .iter()
            .filter(|a| a.escola_id == escola_id && a.turno == turno)
            .map(|a| a.motorista_id)
            .collect();

        let drivers = matching
            .into_iter()
            .filter_map(|motorista_id| {
                self.drivers
                    .driver_name(motorista_id)
                    .map(|nome| RouteDriver { motorista_id, nome })
            })
            .collect();
        Ok(drivers)
    }

    #[instrument(skip(self))]
    async fn create_assignment(
        &self,
        motorista_id: i64,
        escola_id: i64,
        turno: &str,
    ) -> Result<(), AppError> {
        if !self.drivers.has_driver(motorista_id) {
            warn!(motorista_id, "Assignment references unknown driver");
            return Err(AppError::database(
                CREATE_FAILED,
                "foreign key constraint fails (motorista_id)",
            ));
        }
        if self.schools.school(escola_id).is_none() {
            warn!(escola_id, "Assignment references unknown school");
            return Err(AppError::database(
                CREATE_FAILED,
                "foreign key constraint fails (escola_id)",
            ));
        }

        self.rows().push(Assignment {
            motorista_id,
            escola_id,
            turno: turno.to_string(),
        });
        debug!(motorista_id, escola_id, turno = %turno, "Assignment created in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn school_names_for(&self, ids: &[i64]) -> Result<Vec<SchoolShift>, AppError> {
        let names = self
            .rows()
            .iter()
            .filter(|a| ids.contains(&a.escola_id))
            .filter_map(|a| {
                self.schools.school(a.escola_id).map(|school| SchoolShift {
                    nome: school.nome.clone(),
                    turno: a.turno.clone(),
                })
            })
            .collect();
        Ok(names)
    }
}

/// MySQL implementation of assignment repository
pub struct MySqlAssignmentRepository {
    pool: MySqlPool,
}

impl MySqlAssignmentRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssignmentRepository for MySqlAssignmentRepository {
    #[instrument(skip(self))]
    async fn list_assignments(&self) -> Result<Vec<Assignment>, AppError> {
        sqlx::query_as::<_, Assignment>(
            "SELECT motorista_id, escola_id, turno FROM motorista_escola",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to list assignments");
            AppError::database(ROUTE_FAILED, e)
        })
    }

    #[instrument(skip(self))]
    async fn find_drivers_for_route(
        &self,
        escola_id: i64,
        turno: &str,
    ) -> Result<Vec<RouteDriver>, AppError> {
        sqlx::query_as::<_, RouteDriver>(
            "SELECT me.motorista_id, m.nome FROM motorista_escola AS me \
             JOIN motoristas AS m ON me.motorista_id = m.id \
             WHERE me.escola_id = ? AND me.turno = ?",
        )
        .bind(escola_id)
        .bind(turno)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, escola_id, turno = %turno, "Failed to find drivers for route");
            AppError::database(ROUTE_FAILED, e)
        })
    }

    #[instrument(skip(self))]
    async fn create_assignment(
        &self,
        motorista_id: i64,
        escola_id: i64,
        turno: &str,
    ) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO motorista_escola (motorista_id, escola_id, turno) VALUES (?, ?, ?)",
        )
        .bind(motorista_id)
        .bind(escola_id)
        .bind(turno)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, motorista_id, escola_id, turno = %turno, "Failed to create assignment");
            AppError::database(CREATE_FAILED, e)
        })?;

        debug!(motorista_id, escola_id, "Assignment created successfully in database");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn school_names_for(&self, ids: &[i64]) -> Result<Vec<SchoolShift>, AppError> {
        if ids.is_empty() {
            debug!("No school ids given, skipping query");
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT escolas.nome, motorista_escola.turno FROM escolas \
             JOIN motorista_escola ON motorista_escola.escola_id = escolas.id \
             WHERE motorista_escola.escola_id IN ({})",
            in_placeholders(ids.len())
        );

        let mut query = sqlx::query_as::<_, SchoolShift>(&sql);
        for id in ids {
            query = query.bind(*id);
        }

        query.fetch_all(&self.pool).await.map_err(|e| {
            warn!(error = %e, id_count = ids.len(), "Failed to filter school names");
            AppError::database(FILTER_FAILED, e)
        })
    }
}
