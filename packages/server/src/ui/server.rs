//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    config::RelayConfig,
    usecase::{
        ConnectClientUseCase, DisconnectClientUseCase, GetHistoryUseCase, SendMessageUseCase,
    },
};

use super::{
    handler::{get_history, get_stats, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Error type returned by the server entry points
pub type ServerError = Box<dyn std::error::Error + Send + Sync>;

/// WebSocket relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_client_usecase,
///     send_message_usecase,
///     disconnect_client_usecase,
///     get_history_usecase,
///     RelayConfig::default(),
/// );
/// server.run("127.0.0.1".to_string(), 3000).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `connect_client_usecase` - UseCase for on-connect
    /// * `send_message_usecase` - UseCase for on-message
    /// * `disconnect_client_usecase` - UseCase for on-disconnect
    /// * `get_history_usecase` - UseCase backing the HTTP API
    /// * `config` - Relay configuration
    pub fn new(
        connect_client_usecase: Arc<ConnectClientUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        disconnect_client_usecase: Arc<DisconnectClientUseCase>,
        get_history_usecase: Arc<GetHistoryUseCase>,
        config: RelayConfig,
    ) -> Self {
        Self {
            state: Arc::new(AppState {
                connect_client_usecase,
                send_message_usecase,
                disconnect_client_usecase,
                get_history_usecase,
                config,
            }),
        }
    }

    /// Build the router: WebSocket endpoint plus the inspection API
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/history", get(get_history))
            .route("/api/stats", get(get_stats))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Run the relay server until Ctrl+C / SIGTERM
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 3000)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), ServerError> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    ///
    /// On shutdown every registered connection is dropped so that open
    /// WebSockets close instead of holding the server open.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        let disconnect_client_usecase = self.state.disconnect_client_usecase.clone();

        tracing::info!("Relay server listening on {}", listener.local_addr()?);

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown.await;
                disconnect_client_usecase.disconnect_all().await;
            })
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
