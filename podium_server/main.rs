use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use podium_app::{
    app::AppBus,
    config::{Config, StorageBackend},
    uow::UnitOfWorkProvider,
};
use podium_db::{
    establish_connection_pool, memory::InMemoryUnitOfWorkProvider, uow::PostgresUnitOfWorkProvider,
};
use podium_types::{
    Result,
    errors::{ApplicationError, DbError},
};
use podium_web::{AppState, WebRouter};

mod logs;
use logs::setup_logging;

#[tokio::main]
#[cfg(not(tarpaulin_include))]
async fn main() -> Result<(), ApplicationError> {
    let _log_guard = setup_logging();
    let (config, app_bus) = setup_app().await?;

    let shutdown = CancellationToken::new();
    tokio::spawn(shutdown_on_ctrl_c(shutdown.clone()));

    let state = AppState::new(app_bus, shutdown.clone());
    WebRouter::serve(state, config.port, shutdown).await
}

async fn setup_app() -> Result<(Arc<Config>, Arc<AppBus>), ApplicationError> {
    let config = Arc::new(Config::from_env());
    let uow_provider = setup_store(&config).await?;
    let app_bus = Arc::new(AppBus::new(config.clone(), uow_provider));

    Ok((config, app_bus))
}

async fn setup_store(config: &Config) -> Result<Arc<dyn UnitOfWorkProvider>, ApplicationError> {
    match config.storage {
        StorageBackend::Postgres => {
            let db_pool = establish_connection_pool().await?;

            sqlx::migrate!("../migrations")
                .run(&db_pool)
                .await
                .map_err(DbError::from)?;
            tracing::info!("Database migrations applied.");

            Ok(Arc::new(PostgresUnitOfWorkProvider::new(db_pool)))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using the in-memory store: scores are lost on restart.");
            Ok(Arc::new(InMemoryUnitOfWorkProvider::new()))
        }
    }
}

async fn shutdown_on_ctrl_c(shutdown: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Unable to listen for Ctrl-C: {e}");
        return;
    }

    tracing::info!("Ctrl-C received, shutting down.");
    shutdown.cancel();
}
