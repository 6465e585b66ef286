use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::auth::{TokenService, ADMIN_ROLE, USER_ROLE};
use crate::config::AppConfig;
use crate::database::{BannerRepository, DatabaseManager};
use crate::router;
use crate::state::AppState;

pub async fn handle(config: AppConfig) -> anyhow::Result<()> {
    info!("Starting banner API in {:?} mode", config.environment);

    let tokens = TokenService::new(config.security.jwt_secret.as_bytes(), config.security.jwt_expiry_hours);
    if config.security.log_bootstrap_tokens {
        info!("Admin TOKEN: {}", tokens.issue(ADMIN_ROLE)?);
        info!("User TOKEN: {}", tokens.issue(USER_ROLE)?);
    }

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    if config.database.auto_migrate {
        DatabaseManager::ensure_schema(&pool)
            .await
            .context("failed to prepare database schema")?;
    }

    let repository = BannerRepository::with_config(pool.clone(), &config.database);
    let state = AppState::new(Arc::new(repository), tokens);
    let app = router::app(state, &config);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Banner API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    pool.close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
