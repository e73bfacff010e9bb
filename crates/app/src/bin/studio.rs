// Media Studio core - local server

use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use sqlx::PgPool;
use studio_common::config::Config;
use studio_publishing::PublishingConfig;
use studio_runner::RunnerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    studio_common::telemetry::init(&config);

    info!("Starting Media Studio core");

    let runner_config = RunnerConfig::from_env().map_err(|e| {
        error!("Failed to load runner configuration: {}", e);
        e
    })?;
    let publishing_config = PublishingConfig::from_env().map_err(|e| {
        error!("Failed to load publishing configuration: {}", e);
        e
    })?;

    info!("Configuration loaded successfully");

    let pool = PgPool::connect(&config.database_url).await.map_err(|e| {
        error!("Failed to connect to database: {}", e);
        anyhow::anyhow!("Database connection failed: {}", e)
    })?;
    sqlx::migrate!("../../migrations").run(&pool).await?;

    info!("Database connection established");

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let studio = studio_app::Studio::from_pool(config, runner_config, publishing_config, pool)?;
    studio.check_runner().await.map_err(|e| {
        error!("{}", e);
        e
    })?;

    info!("Runner is reachable");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Health check available at http://{}/health", addr);

    axum::serve(listener, studio_app::create_app(studio))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }
}
