//! MessagePusher trait 定義
//!
//! クライアントへのメッセージ送信（通知）のインターフェース。
//! 接続ごとの送信チャンネルは UI 層で生成され、ここに登録されます。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{error::MessagePushError, value_object::ConnectionId};

/// Outbound channel of one connection. The receiving half is drained into the socket.
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続の送信チャンネルを登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続の送信チャンネルを登録解除（存在しなくてもエラーにしない）
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 接続のトランスポートが送信可能な状態かどうか
    async fn is_open(&self, connection_id: &ConnectionId) -> bool;

    /// 特定の接続にメッセージを送信
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError>;
}
