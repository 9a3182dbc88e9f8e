use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{assignment, driver, school, shared::AppState};

/// Registers every endpoint of the API
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "API de transporte escolar" }))
        .route("/motoristas", get(driver::list_drivers))
        .route("/escolas", get(school::list_schools))
        .route("/turnos", get(school::list_shifts))
        .route("/linhas", get(assignment::find_route))
        .route("/buscar-linha", get(assignment::list_assignments))
        .route("/cadastrar-motorista", post(driver::register_driver))
        .route("/filter-name-school", post(assignment::filter_school_names))
        .route("/check-login", get(driver::check_login))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
