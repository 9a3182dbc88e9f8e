use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    models::Driver,
    service::DriverService,
    types::{LoginQuery, LoginResponse, RegisterDriverRequest, RegisterDriverResponse},
};
use crate::shared::{AppError, AppState};

fn driver_service(state: &AppState) -> DriverService {
    DriverService::new(
        Arc::clone(&state.driver_repository),
        Arc::clone(&state.assignment_repository),
        Arc::clone(&state.hasher),
    )
}

/// HTTP handler for listing all drivers
///
/// GET /motoristas
#[instrument(name = "list_drivers", skip(state))]
pub async fn list_drivers(State(state): State<AppState>) -> Result<Json<Vec<Driver>>, AppError> {
    let drivers = driver_service(&state).list_drivers().await?;

    info!(driver_count = drivers.len(), "Drivers listed successfully");
    Ok(Json(drivers))
}

/// HTTP handler for registering a driver along with the schools they cover
///
/// POST /cadastrar-motorista
/// Returns 201 once the driver exists, listing any assignment that failed
#[instrument(name = "register_driver", skip(state, payload))]
pub async fn register_driver(
    State(state): State<AppState>,
    payload: Result<Json<RegisterDriverRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterDriverResponse>), AppError> {
    let Json(request) = payload?;
    info!(
        nome = %request.nome,
        usuario = %request.username,
        escolas = request.escolas.len(),
        "Registering driver"
    );

    let response = driver_service(&state).register_driver(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// HTTP handler for checking a driver's credentials
///
/// GET /check-login?username=<usuario>&password=<senha>
/// Always 200 unless something unexpected fails; see `success`
#[instrument(name = "check_login", skip(state, query))]
pub async fn check_login(
    State(state): State<AppState>,
    query: Result<Query<LoginQuery>, QueryRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Query(query) = query?;
    let (Some(username), Some(password)) = (query.username, query.password) else {
        return Err(AppError::InvalidRequest(
            "Parâmetros 'username' e 'password' são obrigatórios".to_string(),
        ));
    };

    let response = driver_service(&state)
        .check_login(&username, password)
        .await?;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::repository::InMemoryAssignmentRepository;
    use crate::driver::repository::InMemoryDriverRepository;
    use crate::school::models::School;
    use crate::school::repository::InMemorySchoolRepository;
    use crate::shared::test_utils::{AppStateBuilder, BrokenHasher, BrokenRepository};
    use axum::{
        body::Body,
        http::Request,
        routing::{get, post},
        Router,
    };
    use tower::ServiceExt; // for `oneshot`

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/motoristas", get(list_drivers))
            .route("/cadastrar-motorista", post(register_driver))
            .route("/check-login", get(check_login))
            .with_state(state)
    }

    fn in_memory_app() -> (Arc<InMemoryAssignmentRepository>, Router) {
        let drivers = Arc::new(InMemoryDriverRepository::new());
        let schools = Arc::new(InMemorySchoolRepository::new(
            vec![
                School {
                    id: 1,
                    nome: "EE Central".to_string(),
                },
                School {
                    id: 2,
                    nome: "EM Vila Nova".to_string(),
                },
            ],
            Vec::new(),
        ));
        let assignments = Arc::new(InMemoryAssignmentRepository::new(
            drivers.clone(),
            schools.clone(),
        ));
        let state = AppStateBuilder::new()
            .with_driver_repository(drivers)
            .with_school_repository(schools)
            .with_assignment_repository(assignments.clone())
            .build();
        (assignments, app(state))
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn register_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/cadastrar-motorista")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_register_driver_handler() {
        let (assignments, app) = in_memory_app();

        let response = app
            .oneshot(register_request(
                r#"{"nome":"Ana","username":"ana1","password":"pw123","escolas":[{"id":1,"turno":"manha"},{"id":2,"turno":"tarde"}]}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"message": "Motorista cadastrado com sucesso"})
        );
        assert_eq!(assignments.assignment_count(), 2);
    }

    #[tokio::test]
    async fn test_register_driver_with_unknown_school_still_created() {
        let (assignments, app) = in_memory_app();

        let response = app
            .oneshot(register_request(
                r#"{"nome":"Ana","username":"ana1","password":"pw123","escolas":[{"id":1,"turno":"manha"},{"id":9,"turno":"meiodia"},{"id":2,"turno":"tarde"}]}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["message"], "Motorista cadastrado com sucesso");
        assert_eq!(
            body["falhas"],
            serde_json::json!([{"escola_id": 9, "turno": "meiodia"}])
        );
        assert_eq!(assignments.assignment_count(), 2);
    }

    #[tokio::test]
    async fn test_register_driver_missing_field() {
        let (_, app) = in_memory_app();

        let response = app
            .oneshot(register_request(r#"{"nome":"Ana","username":"ana1"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["kind"], "invalid_request");
    }

    #[tokio::test]
    async fn test_register_driver_database_failure() {
        let app = app(AppStateBuilder::new()
            .with_driver_repository(Arc::new(BrokenRepository))
            .build());

        let response = app
            .oneshot(register_request(
                r#"{"nome":"Ana","username":"ana1","password":"pw123","escolas":[]}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["kind"], "database_error");
    }

    #[tokio::test]
    async fn test_register_driver_hashing_failure() {
        let drivers = Arc::new(InMemoryDriverRepository::new());
        let app = app(AppStateBuilder::new()
            .with_driver_repository(drivers.clone())
            .with_hasher(Arc::new(BrokenHasher))
            .build());

        let response = app
            .oneshot(register_request(
                r#"{"nome":"Ana","username":"ana1","password":"pw123","escolas":[]}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"kind": "hashing_error", "error": "Erro ao gerar hash da senha"})
        );
        assert_eq!(drivers.driver_count(), 0);
    }

    #[tokio::test]
    async fn test_list_drivers_never_exposes_digest() {
        let (_, app) = in_memory_app();

        let response = app
            .clone()
            .oneshot(register_request(
                r#"{"nome":"Ana","username":"ana1","password":"pw123"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app.oneshot(get_request("/motoristas")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8_lossy(&body);
        assert!(!text.contains("senha"));
        assert!(!text.contains("$scrypt$"));

        let drivers: Vec<Driver> = serde_json::from_slice(&body).unwrap();
        assert_eq!(drivers.len(), 1);
        assert_eq!(drivers[0].usuario, "ana1");
    }

    #[tokio::test]
    async fn test_check_login_unknown_user_is_200() {
        let (_, app) = in_memory_app();

        let response = app
            .oneshot(get_request("/check-login?username=ninguem&password=x"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Usuário não encontrado");
    }

    #[tokio::test]
    async fn test_check_login_wrong_and_right_password() {
        let (_, app) = in_memory_app();
        app.clone()
            .oneshot(register_request(
                r#"{"nome":"Ana","username":"ana1","password":"pw123"}"#,
            ))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(get_request("/check-login?username=ana1&password=pw124"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Senha incorreta");

        let response = app
            .oneshot(get_request("/check-login?username=ana1&password=pw123"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(
            body,
            serde_json::json!({
                "success": true,
                "message": "Login realizado com sucesso",
                "id": 1,
                "nome": "Ana",
                "usuario": "ana1"
            })
        );
    }

    #[tokio::test]
    async fn test_check_login_missing_password() {
        let (_, app) = in_memory_app();

        let response = app
            .oneshot(get_request("/check-login?username=ana1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_check_login_database_failure() {
        let app = app(AppStateBuilder::new()
            .with_driver_repository(Arc::new(BrokenRepository))
            .build());

        let response = app
            .oneshot(get_request("/check-login?username=ana1&password=pw123"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
