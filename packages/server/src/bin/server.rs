//! Imposter game server.
//!
//! Hosts game rooms over HTTP and runs rounds over WebSocket.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin imposter-server
//! cargo run --bin imposter-server -- --host 0.0.0.0 --port 3000 --db-path games.json
//! ```

use std::{collections::HashMap, path::PathBuf, sync::Arc};

use clap::Parser;
use imposter_server::{
    infrastructure::{
        message_pusher::WebSocketMessagePusher, object_store::InMemoryObjectStore,
        random::ThreadRandom, repository::InMemoryGameRepository,
    },
    ui::{AppState, Server},
};
use imposter_shared::logger::setup_logger;
use tokio::sync::Mutex;

#[derive(Parser, Debug)]
#[command(name = "imposter-server")]
#[command(about = "Session and connection server for the Imposter party game", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "3000")]
    port: u16,

    /// Base URL of uploaded objects (defaults to http://<host>:<port>)
    #[arg(long)]
    public_url: Option<String>,

    /// JSON snapshot file of the game directory
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. ObjectStore / RandomSource
    // 4. AppState (UseCases)
    // 5. Server

    // 1. Create Repository (in-memory game directory, optionally snapshotted)
    let repository = match &args.db_path {
        Some(path) => match InMemoryGameRepository::with_snapshot(path.clone()).await {
            Ok(repository) => repository,
            Err(e) => {
                tracing::error!("Failed to load snapshot {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => InMemoryGameRepository::new(Arc::new(Mutex::new(Vec::new()))),
    };

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = WebSocketMessagePusher::new(Arc::new(Mutex::new(HashMap::new())));

    // 3. Create ObjectStore and RandomSource
    let public_url = args
        .public_url
        .clone()
        .unwrap_or_else(|| format!("http://{}:{}", args.host, args.port));
    tracing::info!("Uploaded objects are served from {}", public_url);
    let object_store = InMemoryObjectStore::new(public_url);

    // 4. Wire UseCases
    let state = AppState::new(
        Arc::new(repository),
        Arc::new(message_pusher),
        Arc::new(object_store),
        Arc::new(ThreadRandom),
    );

    // 5. Run the server
    if let Err(e) = Server::new(state).run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
