//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use crate::infrastructure::object_store::inmemory::OBJECTS_ROUTE_PREFIX;

use super::{
    handler::{
        create_room, get_object, get_players, get_rooms, health_check, index, join_room,
        leave_room, upload_images, websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Maximum request body size accepted by the image upload route.
pub const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// Build the application router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // WebSocket エンドポイント
        .route("/ws", get(websocket_handler))
        // HTTP エンドポイント
        .route("/", get(index))
        .route("/api/health", get(health_check))
        .route("/games", get(get_rooms))
        .route("/games/start", post(create_room))
        .route("/games/{code}/join", get(join_room))
        .route("/games/{code}/players", get(get_players))
        .route("/games/{code}/leave", delete(leave_room))
        .route(
            "/games/{code}/upload",
            post(upload_images).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route(&format!("{}/{{*key}}", OBJECTS_ROUTE_PREFIX), get(get_object))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Imposter game server
///
/// # Example
///
/// ```ignore
/// let state = AppState::new(repository, message_pusher, object_store, random);
/// Server::new(state).run("127.0.0.1".to_string(), 3000).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Run the server until Ctrl+C or SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = build_router(self.state);

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("Imposter game server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws?name=<player>&gameId=<joinCode>", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
