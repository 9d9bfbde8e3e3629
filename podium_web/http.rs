use axum::{
    Router,
    routing::{get, post},
};
use std::{io::Error, net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

use podium_app::app::AppBus;
use podium_types::{Result, errors::ApplicationError};

use crate::{
    handlers::{create_player, get_leaderboard, not_found, stream_leaderboard, update_score},
    publisher::LeaderboardPublisher,
};

#[derive(Clone)]
pub struct AppState {
    pub app_bus: Arc<AppBus>,
    pub publisher: LeaderboardPublisher,
}

impl AppState {
    /// `shutdown` ends every live stream once cancelled.
    pub fn new(app_bus: Arc<AppBus>, shutdown: CancellationToken) -> AppState {
        let publisher = LeaderboardPublisher::new(app_bus.clone(), shutdown);

        AppState { app_bus, publisher }
    }
}

pub struct WebRouter {}

impl WebRouter {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/players", post(create_player))
            .route("/players/score", post(update_score))
            .route("/leaderboard", get(get_leaderboard))
            .route("/leaderboard/stream", get(stream_leaderboard))
            .fallback(not_found)
            .method_not_allowed_fallback(not_found)
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    pub async fn serve(
        state: AppState,
        port: u16,
        shutdown: CancellationToken,
    ) -> Result<(), ApplicationError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr).await.map_err(infra_error)?;

        Self::serve_with_listener(state, listener, shutdown).await
    }

    /// Serves on an already bound listener until `shutdown` is cancelled.
    pub async fn serve_with_listener(
        state: AppState,
        listener: TcpListener,
        shutdown: CancellationToken,
    ) -> Result<(), ApplicationError> {
        let addr = listener.local_addr().map_err(infra_error)?;
        let router = Self::router(state);

        tracing::info!("HTTP Server started, listening on http://{}", addr);
        axum::serve(listener, router)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await
            .map_err(infra_error)?;

        tracing::info!("HTTP Server stopped");
        Ok(())
    }
}

fn infra_error(e: Error) -> ApplicationError {
    let err = format!("{:#?}", e);
    ApplicationError::Infrastructure(err)
}
