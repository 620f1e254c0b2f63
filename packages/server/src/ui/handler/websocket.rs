//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::{infrastructure::dto::websocket::ServerMessage, ui::state::AppState};

use super::dispatcher::dispatch;

const WELCOME_MESSAGE: &str = "Connected to Imposter Game";

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub name: Option<String>,
    #[serde(rename = "gameId")]
    pub game_id: Option<String>,
}

/// Accept the upgrade; membership is validated once the socket is open so that
/// a rejection can be reported as an `error` frame.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state, query))
}

/// Spawns a task that drains the connection's outbound channel into the WebSocket sender.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn reject(mut sender: SplitSink<WebSocket, Message>, message: ServerMessage) {
    match message.to_json() {
        Ok(json) => {
            if let Err(e) = sender.send(Message::Text(json.into())).await {
                tracing::debug!("Failed to send rejection: {}", e);
            }
        }
        Err(e) => tracing::error!("Failed to serialize rejection: {}", e),
    }
    if let Err(e) = sender.send(Message::Close(None)).await {
        tracing::debug!("Failed to close rejected socket: {}", e);
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, query: ConnectQuery) {
    let (sender, mut receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel();

    let connection = match state
        .connect_player_usecase
        .execute(query.name, query.game_id, tx)
        .await
    {
        Ok(connection) => connection,
        Err(e) => {
            tracing::warn!("Rejected WebSocket connection ({}): {}", e.status(), e);
            reject(sender, ServerMessage::error(e.status(), e.to_string())).await;
            return;
        }
    };
    let connection_id = connection.id;

    let welcome = ServerMessage::Welcome {
        message: WELCOME_MESSAGE.to_string(),
    };
    if let Err(e) = state.router.send_to(&connection_id, &welcome).await {
        tracing::warn!("Failed to queue welcome for '{}': {}", connection.player_name, e);
    }

    let state_clone = state.clone();
    let player_name = connection.player_name.clone();

    // Spawn a task to receive messages from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    dispatch(&state_clone, &connection_id, text.as_str()).await;
                }
                Message::Binary(_) => {
                    tracing::warn!("Ignoring binary frame from '{}'", player_name);
                }
                Message::Close(_) => {
                    tracing::info!("Client '{}' requested close", player_name);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to push queued messages to this client
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state.disconnect_player_usecase.execute(&connection_id).await;
}
