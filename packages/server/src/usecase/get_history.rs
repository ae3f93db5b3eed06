//! UseCase: 履歴と統計の取得（HTTP API 用）

use std::sync::Arc;

use crate::domain::{ChatMessage, MessageHistoryRepository, MessagePusher};

/// リレーの現在の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayStats {
    pub connections: usize,
    pub history: usize,
    pub capacity: usize,
}

/// 履歴取得のユースケース
pub struct GetHistoryUseCase {
    repository: Arc<dyn MessageHistoryRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl GetHistoryUseCase {
    pub fn new(
        repository: Arc<dyn MessageHistoryRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 現在の履歴を古い順に取得
    pub async fn execute(&self) -> Vec<ChatMessage> {
        self.repository.snapshot().await
    }

    /// 接続数と履歴の件数を取得
    pub async fn stats(&self) -> RelayStats {
        RelayStats {
            connections: self.message_pusher.count_clients().await,
            history: self.repository.count_messages().await,
            capacity: self.repository.capacity(),
        }
    }
}
