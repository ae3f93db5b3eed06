//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続レジストリ（`ConnectionRegistry`）を Mutex で保護して保持
//! - クライアントへのメッセージ送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket への実際の書き込みは UI 層の送信タスクが行います。
//! この実装は各接続の有界キューに `try_send` で積むだけなので、ブロックしません。
//! キューが満杯（遅いクライアント）または閉じている（切断済み）場合は送信失敗として扱い、
//! その接続を登録解除します。

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc::error::TrySendError};

use crate::domain::{
    BroadcastReport, ConnectionId, ConnectionRegistry, MessagePushError, MessagePusher,
    PusherChannel, RegistryError, Visit,
};

/// WebSocket を使った MessagePusher 実装
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの送信キュー
    registry: Mutex<ConnectionRegistry<PusherChannel>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new() -> Self {
        Self {
            registry: Mutex::new(ConnectionRegistry::new()),
        }
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new()
    }
}

fn describe(error: &TrySendError<String>) -> &'static str {
    match error {
        TrySendError::Full(_) => "outbound queue is full",
        TrySendError::Closed(_) => "connection is closed",
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) -> Result<(), RegistryError> {
        let mut registry = self.registry.lock().await;
        registry.register(connection_id.clone(), sender)?;
        tracing::debug!(
            "Connection '{}' registered ({} total)",
            connection_id,
            registry.size()
        );
        Ok(())
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) -> bool {
        let mut registry = self.registry.lock().await;
        let removed = registry.deregister(connection_id).is_some();
        if removed {
            tracing::debug!(
                "Connection '{}' unregistered ({} remaining)",
                connection_id,
                registry.size()
            );
        }
        removed
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let mut registry = self.registry.lock().await;

        let Some(sender) = registry.get(connection_id) else {
            return Err(MessagePushError::ConnectionNotFound(
                connection_id.to_string(),
            ));
        };

        if let Err(e) = sender.try_send(content.to_string()) {
            let reason = describe(&e);
            registry.deregister(connection_id);
            return Err(MessagePushError::SendFailed {
                connection_id: connection_id.to_string(),
                reason: reason.to_string(),
            });
        }

        tracing::debug!("Pushed message to connection '{}'", connection_id);
        Ok(())
    }

    async fn broadcast(&self, content: &str) -> BroadcastReport {
        let mut registry = self.registry.lock().await;

        let mut delivered = 0;
        // ブロードキャストでは一部の送信失敗を許容し、失敗した接続は登録解除する
        let dropped = registry.for_each(|id, sender| match sender.try_send(content.to_string()) {
            Ok(()) => {
                delivered += 1;
                Visit::Keep
            }
            Err(e) => {
                tracing::warn!("Failed to push message to connection '{}': {}", id, describe(&e));
                Visit::Deregister
            }
        });

        tracing::debug!(
            "Broadcasted message to {} connection(s), dropped {}",
            delivered,
            dropped.len()
        );

        BroadcastReport { delivered, dropped }
    }

    async fn count_clients(&self) -> usize {
        self.registry.lock().await.size()
    }

    async fn disconnect_all(&self) -> usize {
        self.registry.lock().await.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn id(value: &str) -> ConnectionId {
        ConnectionId::new(value.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_push_to_success() {
        // テスト項目: 特定の接続にメッセージを送信できる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx, mut rx) = mpsc::channel(8);
        pusher.register_client(id("alice"), tx).await.unwrap();

        // when (操作):
        let result = pusher.push_to(&id("alice"), "Hello").await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(rx.recv().await, Some("Hello".to_string()));
    }

    #[tokio::test]
    async fn test_push_to_connection_not_found() {
        // テスト項目: 存在しない接続への送信はエラーを返す
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();

        // when (操作):
        let result = pusher.push_to(&id("nonexistent"), "Hello").await;

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(MessagePushError::ConnectionNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_register_duplicate_connection() {
        // テスト項目: 同じ接続 ID の二重登録はエラーになる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx1, _rx1) = mpsc::channel(8);
        let (tx2, _rx2) = mpsc::channel(8);
        pusher.register_client(id("alice"), tx1).await.unwrap();

        // when (操作):
        let result = pusher.register_client(id("alice"), tx2).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RegistryError::DuplicateConnection("alice".to_string()))
        );
        assert_eq!(pusher.count_clients().await, 1);
    }

    #[tokio::test]
    async fn test_broadcast_success() {
        // テスト項目: 全ての接続にメッセージをブロードキャストできる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx1, mut rx1) = mpsc::channel(8);
        let (tx2, mut rx2) = mpsc::channel(8);
        pusher.register_client(id("alice"), tx1).await.unwrap();
        pusher.register_client(id("bob"), tx2).await.unwrap();

        // when (操作):
        let report = pusher.broadcast("Broadcast message").await;

        // then (期待する結果):
        assert_eq!(report.delivered, 2);
        assert!(report.dropped.is_empty());
        assert_eq!(rx1.recv().await, Some("Broadcast message".to_string()));
        assert_eq!(rx2.recv().await, Some("Broadcast message".to_string()));
    }

    #[tokio::test]
    async fn test_broadcast_drops_closed_connection() {
        // テスト項目: 切断済みの接続は登録解除され、他の接続への送信は続行される
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx1, mut rx1) = mpsc::channel(8);
        let (tx2, rx2) = mpsc::channel(8);
        pusher.register_client(id("alice"), tx1).await.unwrap();
        pusher.register_client(id("broken"), tx2).await.unwrap();
        drop(rx2);

        // when (操作):
        let report = pusher.broadcast("Broadcast message").await;

        // then (期待する結果):
        assert_eq!(report.delivered, 1);
        assert_eq!(report.dropped, vec![id("broken")]);
        assert_eq!(rx1.recv().await, Some("Broadcast message".to_string()));
        assert_eq!(pusher.count_clients().await, 1);
    }

    #[tokio::test]
    async fn test_broadcast_drops_slow_connection() {
        // テスト項目: キューが満杯の（遅い）接続はブロックせずに登録解除される
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (slow_tx, _slow_rx) = mpsc::channel(1);
        let (fast_tx, mut fast_rx) = mpsc::channel(8);
        pusher.register_client(id("slow"), slow_tx).await.unwrap();
        pusher.register_client(id("fast"), fast_tx).await.unwrap();

        // when (操作): 2 件送信（slow のキューは 1 件で満杯）
        pusher.broadcast("first").await;
        let report = pusher.broadcast("second").await;

        // then (期待する結果):
        assert_eq!(report.dropped, vec![id("slow")]);
        assert_eq!(fast_rx.recv().await, Some("first".to_string()));
        assert_eq!(fast_rx.recv().await, Some("second".to_string()));
        assert_eq!(pusher.count_clients().await, 1);
    }

    #[tokio::test]
    async fn test_broadcast_empty_registry() {
        // テスト項目: 接続が無くてもエラーにならない
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();

        // when (操作):
        let report = pusher.broadcast("Message").await;

        // then (期待する結果):
        assert_eq!(report, BroadcastReport::default());
    }

    #[tokio::test]
    async fn test_unregister_is_idempotent() {
        // テスト項目: 登録解除を二回呼んでも問題なく処理される
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx, _rx) = mpsc::channel(8);
        pusher.register_client(id("alice"), tx).await.unwrap();

        // when (操作):
        let first = pusher.unregister_client(&id("alice")).await;
        let second = pusher.unregister_client(&id("alice")).await;

        // then (期待する結果):
        assert!(first);
        assert!(!second);
        assert_eq!(pusher.count_clients().await, 0);
    }

    #[tokio::test]
    async fn test_disconnect_all_closes_queues() {
        // テスト項目: 全接続の登録解除で送信キューが閉じられる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx, mut rx) = mpsc::channel(8);
        pusher.register_client(id("alice"), tx).await.unwrap();

        // when (操作):
        let count = pusher.disconnect_all().await;

        // then (期待する結果):
        assert_eq!(count, 1);
        assert_eq!(rx.recv().await, None);
    }
}
