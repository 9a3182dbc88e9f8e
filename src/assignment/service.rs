use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::{
    models::{Assignment, RouteDriver, SchoolShift},
    repository::AssignmentRepository,
    types::{FailedAssignment, SchoolFilterRequest},
};
use crate::{driver::types::SchoolShiftEntry, shared::AppError};

/// Service for route lookups and assignment creation
pub struct AssignmentService {
    repository: Arc<dyn AssignmentRepository + Send + Sync>,
}

impl AssignmentService {
    pub fn new(repository: Arc<dyn AssignmentRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self))]
    pub async fn find_route(
        &self,
        escola_id: i64,
        turno: &str,
    ) -> Result<Vec<RouteDriver>, AppError> {
        let drivers = self
            .repository
            .find_drivers_for_route(escola_id, turno)
            .await?;
        debug!(driver_count = drivers.len(), "Route drivers resolved");
        Ok(drivers)
    }

    #[instrument(skip(self))]
    pub async fn list_assignments(&self) -> Result<Vec<Assignment>, AppError> {
        self.repository.list_assignments().await
    }

    /// Resolves school names for every school id in the three period lists
    #[instrument(skip(self, request))]
    pub async fn filter_school_names(
        &self,
        request: &SchoolFilterRequest,
    ) -> Result<Vec<SchoolShift>, AppError> {
        let ids = request.school_ids();
        debug!(id_count = ids.len(), "Filtering school names");
        self.repository.school_names_for(&ids).await
    }

    /// Inserts one assignment per entry. Inserts run concurrently and
    /// independently; the ones that fail are logged and returned.
    #[instrument(skip(self, entries), fields(entry_count = entries.len()))]
    pub async fn assign_schools(
        &self,
        motorista_id: i64,
        entries: &[SchoolShiftEntry],
    ) -> Vec<FailedAssignment> {
        let inserts = entries.iter().map(|entry| async move {
            let result = self
                .repository
                .create_assignment(motorista_id, entry.id, &entry.turno)
                .await;
            (entry, result)
        });

        let failures: Vec<FailedAssignment> = join_all(inserts)
            .await
            .into_iter()
            .filter_map(|(entry, result)| match result {
                Ok(()) => None,
                Err(e) => {
                    warn!(
                        error = %e,
                        motorista_id,
                        escola_id = entry.id,
                        escola = entry.nome.as_deref().unwrap_or("-"),
                        turno = %entry.turno,
                        "Failed to assign driver to school"
                    );
                    Some(FailedAssignment {
                        escola_id: entry.id,
                        turno: entry.turno.clone(),
                    })
                }
            })
            .collect();

        info!(
            motorista_id,
            attempted = entries.len(),
            failed = failures.len(),
            "Assignments processed"
        );
        failures
    }
}
