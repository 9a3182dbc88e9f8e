use std::error::Error;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use transporte_escolar::{database, router, AppConfig};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "transporte_escolar=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        error!(error = %e, "Server stopped");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    info!("Starting school transport API");

    let config = AppConfig::from_env()?;
    let hasher = config.hasher()?;
    let pool = database::connect(&config.database).await?;

    let app = router(database::mysql_state(pool, hasher));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!("API rodando em http://localhost:{}", config.port);
    axum::serve(listener, app).await?;
    Ok(())
}
