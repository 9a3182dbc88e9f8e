use axum::{extract::State, Json};
use tracing::{info, instrument};

use super::models::{School, Shift};
use crate::shared::{AppError, AppState};

/// GET /escolas
#[instrument(name = "list_schools", skip(state))]
pub async fn list_schools(State(state): State<AppState>) -> Result<Json<Vec<School>>, AppError> {
    let schools = state.school_repository.list_schools().await?;
    info!(school_count = schools.len(), "Schools listed successfully");
    Ok(Json(schools))
}

/// GET /turnos
#[instrument(name = "list_shifts", skip(state))]
pub async fn list_shifts(State(state): State<AppState>) -> Result<Json<Vec<Shift>>, AppError> {
    let shifts = state.school_repository.list_shifts().await?;
    info!(shift_count = shifts.len(), "Shifts listed successfully");
    Ok(Json(shifts))
}
