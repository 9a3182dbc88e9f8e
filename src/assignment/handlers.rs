use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    models::{Assignment, RouteDriver, SchoolShift},
    service::AssignmentService,
    types::{RouteQuery, SchoolFilterRequest},
};
use crate::shared::{AppError, AppState};

/// HTTP handler for looking up which drivers cover a school during a shift
///
/// GET /linhas?escola=<id>&turno=<turno>
/// Returns an empty array when nobody is assigned
#[instrument(name = "find_route", skip(state, query))]
pub async fn find_route(
    State(state): State<AppState>,
    query: Result<Query<RouteQuery>, QueryRejection>,
) -> Result<Json<Vec<RouteDriver>>, AppError> {
    let Query(query) = query?;
    let (escola, turno) = query.into_parts()?;
    info!(escola, turno = %turno, "Looking up route");

    let service = AssignmentService::new(Arc::clone(&state.assignment_repository));
    let drivers = service.find_route(escola, &turno).await?;

    info!(driver_count = drivers.len(), "Route found");
    Ok(Json(drivers))
}

/// HTTP handler for listing every assignment
///
/// GET /buscar-linha
#[instrument(name = "list_assignments", skip(state))]
pub async fn list_assignments(
    State(state): State<AppState>,
) -> Result<Json<Vec<Assignment>>, AppError> {
    let service = AssignmentService::new(Arc::clone(&state.assignment_repository));
    let assignments = service.list_assignments().await?;

    info!(assignment_count = assignments.len(), "Assignments listed");
    Ok(Json(assignments))
}

/// HTTP handler resolving school names for the schools of a route
///
/// POST /filter-name-school
#[instrument(name = "filter_school_names", skip(state, payload))]
pub async fn filter_school_names(
    State(state): State<AppState>,
    payload: Result<Json<SchoolFilterRequest>, JsonRejection>,
) -> Result<Json<Vec<SchoolShift>>, AppError> {
    let Json(request) = payload?;

    let service = AssignmentService::new(Arc::clone(&state.assignment_repository));
    let names = service.filter_school_names(&request).await?;

    info!(result_count = names.len(), "School names filtered");
    Ok(Json(names))
}
