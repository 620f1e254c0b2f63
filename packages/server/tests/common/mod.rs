//! Shared helpers for the integration tests: an in-process server on an
//! ephemeral port and a small WebSocket client.

#![allow(dead_code)]

use std::{collections::HashMap, net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use imposter_server::{
    domain::{Game, GameRepository, JoinCode, Player, PlayerName, SequenceRandom, Timestamp},
    infrastructure::{
        message_pusher::WebSocketMessagePusher, object_store::InMemoryObjectStore,
        repository::InMemoryGameRepository,
    },
    ui::{AppState, build_router},
};
use serde_json::Value;
use tokio::{net::TcpStream, sync::Mutex, task::JoinHandle};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Server running inside the test's runtime
pub struct TestServer {
    pub addr: SocketAddr,
    pub repository: Arc<InMemoryGameRepository>,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server whose random source replays `random`.
    pub async fn start(random: Vec<usize>) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let repository = Arc::new(InMemoryGameRepository::new(Arc::new(Mutex::new(Vec::new()))));
        let state = AppState::new(
            repository.clone(),
            Arc::new(WebSocketMessagePusher::new(Arc::new(Mutex::new(HashMap::new())))),
            Arc::new(InMemoryObjectStore::new(format!("http://{}", addr))),
            Arc::new(SequenceRandom::new(random)),
        );
        let app = build_router(Arc::new(state));
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            repository,
            handle,
        }
    }

    pub fn http_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Create a game directly in the directory: the first name hosts, the rest join.
    pub async fn seed_game(&self, code: &str, names: &[&str]) {
        let join_code = JoinCode::new(code.to_string()).unwrap();
        let host = PlayerName::new(names[0].to_string()).unwrap();
        self.repository
            .create_game(Game::new(join_code.clone(), host, "Test Room".into(), Timestamp::new(0)))
            .await
            .unwrap();
        for name in &names[1..] {
            let player = Player::new(PlayerName::new(name.to_string()).unwrap(), join_code.clone());
            self.repository.add_player(&join_code, player).await.unwrap();
        }
    }

    pub async fn connect(&self, query: &str) -> WsStream {
        let url = format!("ws://{}/ws?{}", self.addr, query);
        let (stream, _) = connect_async(url).await.unwrap();
        stream
    }

    /// Connect and consume the welcome frame.
    pub async fn join(&self, name: &str, code: &str) -> WsStream {
        let mut stream = self.connect(&format!("name={}&gameId={}", name, code)).await;
        let welcome = next_json(&mut stream).await;
        assert_eq!(welcome["type"], "welcome", "unexpected first frame: {}", welcome);
        stream
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Next message of any kind, failing the test after a few seconds.
pub async fn next_message(stream: &mut WsStream) -> Message {
    tokio::time::timeout(Duration::from_secs(5), stream.next())
        .await
        .expect("timed out waiting for a frame")
        .expect("stream ended")
        .expect("websocket error")
}

/// Next text frame parsed as JSON.
pub async fn next_json(stream: &mut WsStream) -> Value {
    loop {
        match next_message(stream).await {
            Message::Text(text) => return serde_json::from_str(text.as_str()).unwrap(),
            Message::Ping(_) | Message::Pong(_) => continue,
            other => panic!("expected a text frame, got {:?}", other),
        }
    }
}

pub async fn send_json(stream: &mut WsStream, value: Value) {
    stream
        .send(Message::Text(value.to_string().into()))
        .await
        .unwrap();
}

/// Assert that nothing arrives within a short window.
pub async fn assert_silent(stream: &mut WsStream) {
    let result = tokio::time::timeout(Duration::from_millis(200), stream.next()).await;
    assert!(result.is_err(), "unexpected frame: {:?}", result);
}
