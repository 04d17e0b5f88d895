//! Serve command - Starts the HTTP server.

use std::net::SocketAddr;

use tokio::signal;

use crate::api::{create_router, AppState};
use crate::cli::ServeArgs;
use crate::config::{Config, API_PREFIX};
use crate::errors::{expose_error_stack, AppError, AppResult};
use crate::infra::Database;

/// Execute the serve command
pub async fn execute(args: ServeArgs, mut config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    if let Some(host) = args.host {
        config.server_host = host;
    }
    if let Some(port) = args.port {
        config.server_port = port;
    }

    expose_error_stack(!config.is_production());

    // Initialize database
    let db = Database::connect(&config).await?;
    if let Err(e) = db.ping().await {
        tracing::warn!(error = %e, "Database ping failed; requests will retry the connection");
    }

    let addr = config.server_addr();
    let environment = config.environment.clone();

    let app = create_router(AppState::from_database(&db, config));

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);
    tracing::info!("Health check: http://{}/health", addr);
    tracing::info!("API base: http://{}{}", addr, API_PREFIX);
    tracing::info!("Environment: {}", environment);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down gracefully");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down gracefully");
        }
    }
}
