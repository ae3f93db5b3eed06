//! Real-time message relay server.
//!
//! Accepts WebSocket connections on `/ws`, replays recent history to each new
//! connection and broadcasts every accepted message to all connections.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin relay-server
//! cargo run --bin relay-server -- --host 0.0.0.0 --port 3000 --history-capacity 100
//! ```

use std::{sync::Arc, time::Duration};

use clap::Parser;
use relay_server::{
    config::RelayConfig,
    infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemoryMessageHistoryRepository,
    },
    ui::Server,
    usecase::{
        ConnectClientUseCase, DisconnectClientUseCase, GetHistoryUseCase, SendMessageUseCase,
        Sequencer,
    },
};
use relay_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "relay-server")]
#[command(about = "Real-time message relay over WebSocket", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "3000")]
    port: u16,

    /// Number of recent messages replayed to new connections
    #[arg(long, default_value = "100")]
    history_capacity: usize,

    /// Frames queued per connection before it is dropped as too slow
    #[arg(long, default_value = "256")]
    outbound_buffer: usize,

    /// Timeout for a single WebSocket write, in milliseconds
    #[arg(long, default_value = "5000")]
    send_timeout_ms: u64,

    /// Default log level (overridden by RUST_LOG)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn relay_config(&self) -> RelayConfig {
        RelayConfig {
            history_capacity: self.history_capacity,
            outbound_buffer: self.outbound_buffer,
            send_timeout: Duration::from_millis(self.send_timeout_ms),
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    let config = args.relay_config();
    tracing::debug!("Relay configuration: {:?}", config);

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. Create Repository (in-memory history)
    let repository = Arc::new(InMemoryMessageHistoryRepository::with_capacity(
        config.history_capacity,
    ));
    tracing::info!("History buffer created (capacity {})", config.history_capacity);

    // 2. Create MessagePusher (WebSocket connection registry)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Create UseCases
    let sequencer = Arc::new(Sequencer::new());
    let connect_client_usecase = Arc::new(ConnectClientUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        sequencer.clone(),
    ));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        sequencer,
        Arc::new(SystemClock),
    ));
    let disconnect_client_usecase =
        Arc::new(DisconnectClientUseCase::new(message_pusher.clone()));
    let get_history_usecase = Arc::new(GetHistoryUseCase::new(repository, message_pusher));

    // 4. Create and run the server
    let server = Server::new(
        connect_client_usecase,
        send_message_usecase,
        disconnect_client_usecase,
        get_history_usecase,
        config,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
