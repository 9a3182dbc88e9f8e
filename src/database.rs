use sqlx::{mysql::MySqlPoolOptions, MySqlPool};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::{
    assignment::repository::MySqlAssignmentRepository,
    config::DatabaseConfig,
    driver::{repository::MySqlDriverRepository, CredentialHasher},
    school::repository::MySqlSchoolRepository,
    shared::AppState,
};

/// Opens the bounded connection pool shared by every repository
#[instrument(skip(config), fields(host = %config.host, database = %config.name))]
pub async fn connect(config: &DatabaseConfig) -> Result<MySqlPool, sqlx::Error> {
    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(config.connect_options())
        .await?;

    info!(
        max_connections = config.max_connections,
        "Connected to MySQL database"
    );
    Ok(pool)
}

/// Wires the MySQL repositories into the application state
pub fn mysql_state(pool: MySqlPool, hasher: CredentialHasher) -> AppState {
    AppState::new(
        Arc::new(MySqlDriverRepository::new(pool.clone())),
        Arc::new(MySqlSchoolRepository::new(pool.clone())),
        Arc::new(MySqlAssignmentRepository::new(pool)),
        Arc::new(hasher),
    )
}
