use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{
    models::Driver,
    password::PasswordHashing,
    repository::DriverRepository,
    types::{LoginResponse, RegisterDriverRequest, RegisterDriverResponse},
};
use crate::{
    assignment::{repository::AssignmentRepository, service::AssignmentService},
    shared::AppError,
};

pub const REGISTERED_MESSAGE: &str = "Motorista cadastrado com sucesso";
pub const LOGIN_OK_MESSAGE: &str = "Login realizado com sucesso";
pub const UNKNOWN_USER_MESSAGE: &str = "Usuário não encontrado";
pub const WRONG_PASSWORD_MESSAGE: &str = "Senha incorreta";

/// Service for driver registration, listing and login
pub struct DriverService {
    drivers: Arc<dyn DriverRepository + Send + Sync>,
    assignments: Arc<dyn AssignmentRepository + Send + Sync>,
    hasher: Arc<dyn PasswordHashing + Send + Sync>,
}

impl DriverService {
    pub fn new(
        drivers: Arc<dyn DriverRepository + Send + Sync>,
        assignments: Arc<dyn AssignmentRepository + Send + Sync>,
        hasher: Arc<dyn PasswordHashing + Send + Sync>,
    ) -> Self {
        Self {
            drivers,
            assignments,
            hasher,
        }
    }

    #[instrument(skip(self))]
    pub async fn list_drivers(&self) -> Result<Vec<Driver>, AppError> {
        self.drivers.list_drivers().await
    }

    /// Hashes the password, creates the driver, then assigns the schools.
    ///
    /// Not atomic: once the driver row exists the registration succeeds, and
    /// assignment inserts that fail are reported in `falhas`.
    #[instrument(skip(self, request), fields(usuario = %request.username))]
    pub async fn register_driver(
        &self,
        request: RegisterDriverRequest,
    ) -> Result<RegisterDriverResponse, AppError> {
        let RegisterDriverRequest {
            nome,
            username,
            password,
            escolas,
        } = request;

        let digest = self.hasher.hash_password(password).await?;
        let driver_id = self
            .drivers
            .create_driver(&nome, &username, &digest)
            .await?;
        debug!(driver_id, "Driver row created");

        let falhas = AssignmentService::new(Arc::clone(&self.assignments))
            .assign_schools(driver_id, &escolas)
            .await;

        info!(
            driver_id,
            escolas = escolas.len(),
            falhas = falhas.len(),
            "Driver registered"
        );

        Ok(RegisterDriverResponse {
            message: REGISTERED_MESSAGE.to_string(),
            falhas,
        })
    }

    /// Checks a username/password pair. Unknown users and wrong passwords
    /// are ordinary outcomes, not errors.
    #[instrument(skip(self, password))]
    pub async fn check_login(
        &self,
        username: &str,
        password: String,
    ) -> Result<LoginResponse, AppError> {
        let Some(credentials) = self.drivers.find_by_username(username).await? else {
            info!("Login rejected: unknown user");
            return Ok(LoginResponse::rejected(UNKNOWN_USER_MESSAGE));
        };

        let matches = self
            .hasher
            .verify_password(password, credentials.senha.clone())
            .await?;
        if !matches {
            info!(driver_id = credentials.id, "Login rejected: wrong password");
            return Ok(LoginResponse::rejected(WRONG_PASSWORD_MESSAGE));
        }

        info!(driver_id = credentials.id, "Login accepted");
        let driver = credentials.to_driver();
        Ok(LoginResponse {
            success: true,
            message: LOGIN_OK_MESSAGE.to_string(),
            id: Some(driver.id),
            nome: Some(driver.nome),
            usuario: Some(driver.usuario),
        })
    }
}
