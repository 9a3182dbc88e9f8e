use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

use transporte_escolar::{
    assignment::repository::InMemoryAssignmentRepository,
    driver::repository::InMemoryDriverRepository,
    router,
    school::{
        models::{School, Shift},
        repository::InMemorySchoolRepository,
    },
    AppState, CredentialHasher,
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub app: Router,
    pub drivers: Arc<InMemoryDriverRepository>,
    pub assignments: Arc<InMemoryAssignmentRepository>,
}

pub struct TestSetupBuilder {
    schools: Vec<School>,
    shifts: Vec<Shift>,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            schools: vec![],
            shifts: vec![],
        }
    }

    /// Schools get ids 1, 2, 3... in the given order
    pub fn with_schools(mut self, names: Vec<&str>) -> Self {
        self.schools = names
            .into_iter()
            .enumerate()
            .map(|(i, nome)| School {
                id: i as i64 + 1,
                nome: nome.to_string(),
            })
            .collect();
        self
    }

    pub fn with_default_shifts(mut self) -> Self {
        self.shifts = ["manha", "meiodia", "tarde"]
            .into_iter()
            .enumerate()
            .map(|(i, nome)| Shift {
                id: i as i64 + 1,
                nome: nome.to_string(),
            })
            .collect();
        self
    }

    pub fn build(self) -> TestSetup {
        let drivers = Arc::new(InMemoryDriverRepository::new());
        let schools = Arc::new(InMemorySchoolRepository::new(self.schools, self.shifts));
        let assignments = Arc::new(InMemoryAssignmentRepository::new(
            drivers.clone(),
            schools.clone(),
        ));

        let hasher = Arc::new(CredentialHasher::with_cost(4).unwrap());
        let state = AppState::new(drivers.clone(), schools, assignments.clone(), hasher);

        TestSetup {
            app: router(state),
            drivers,
            assignments,
        }
    }
}

impl TestSetup {
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, value)
    }
}
