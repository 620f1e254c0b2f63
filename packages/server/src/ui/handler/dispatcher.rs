//! Message Dispatcher
//!
//! 受信したテキストフレームを `type` で振り分け、対応するユースケースを呼び出します。
//!
//! - JSON として解釈できない、または文字列の `type` を持たないフレームは warn ログを出して破棄
//! - 未知の `type` には `error {status: "400"}` を返信
//! - ユースケースのエラーは送信者にだけ `error` フレームとして返信

use serde_json::Value;

use crate::{
    domain::ConnectionId,
    infrastructure::dto::websocket::{ClientMessage, ServerMessage},
    ui::state::AppState,
    usecase::GameError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Handled,
    /// Dropped without a reply
    Malformed,
    /// Answered with an `error` frame
    UnknownType(String),
    /// Answered with an `error` frame
    Failed(GameError),
}

pub async fn dispatch(state: &AppState, connection_id: &ConnectionId, text: &str) -> DispatchOutcome {
    let value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Dropping non-JSON frame from {}: {}", connection_id, e);
            return DispatchOutcome::Malformed;
        }
    };
    let Some(kind) = value.get("type").and_then(Value::as_str).map(str::to_string) else {
        tracing::warn!("Dropping frame without a type from {}", connection_id);
        return DispatchOutcome::Malformed;
    };
    let message = match serde_json::from_value::<ClientMessage>(value) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!("Dropping malformed '{}' frame from {}: {}", kind, connection_id, e);
            return DispatchOutcome::Malformed;
        }
    };
    tracing::debug!("Received '{}' from {}", kind, connection_id);

    let result = match message {
        ClientMessage::StartGame {} => state
            .start_game_usecase
            .execute(connection_id)
            .await
            .map(|_| ()),
        ClientMessage::SubmitPhoto { photo } => state
            .submit_photo_usecase
            .execute(connection_id, photo)
            .await
            .map(|_| ()),
        ClientMessage::GuessWord { guess } => state
            .guess_word_usecase
            .execute(connection_id, guess)
            .await
            .map(|_| ()),
        ClientMessage::SubmitVote { vote } => {
            state.submit_vote_usecase.execute(connection_id, vote).await
        }
        ClientMessage::Unknown => {
            tracing::warn!("Unknown message type '{}' from {}", kind, connection_id);
            reply(
                state,
                connection_id,
                ServerMessage::error(400, format!("Unknown message type: {}", kind)),
            )
            .await;
            return DispatchOutcome::UnknownType(kind);
        }
    };

    match result {
        Ok(()) => DispatchOutcome::Handled,
        Err(e) => {
            tracing::warn!("'{}' from {} failed ({}): {}", kind, connection_id, e.status(), e);
            reply(state, connection_id, ServerMessage::error(e.status(), e.to_string())).await;
            DispatchOutcome::Failed(e)
        }
    }
}

async fn reply(state: &AppState, connection_id: &ConnectionId, message: ServerMessage) {
    if let Err(e) = state.router.send_to(connection_id, &message).await {
        tracing::warn!("Failed to send {} to {}: {}", message.kind(), connection_id, e);
    }
}
