//! InMemory Message History Repository 実装
//!
//! ドメイン層が定義する MessageHistoryRepository trait の具体的な実装。
//! `MessageHistory` ドメインモデルをそのままストレージとして使用します。
//! 履歴はプロセスの生存期間のみ保持され、再起動で失われます。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChatMessage, MessageHistory, MessageHistoryRepository};

/// インメモリ Message History Repository 実装
pub struct InMemoryMessageHistoryRepository {
    /// 履歴ドメインモデル
    history: Mutex<MessageHistory>,
    /// 履歴の容量（ロック無しで参照できるようにコピーを持つ）
    capacity: usize,
}

impl InMemoryMessageHistoryRepository {
    /// 新しい InMemoryMessageHistoryRepository を作成
    pub fn new(history: MessageHistory) -> Self {
        let capacity = history.capacity();
        Self {
            history: Mutex::new(history),
            capacity,
        }
    }

    /// 指定した容量の空の履歴で作成
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(MessageHistory::new(capacity))
    }
}

#[async_trait]
impl MessageHistoryRepository for InMemoryMessageHistoryRepository {
    async fn append(&self, message: ChatMessage) -> Option<ChatMessage> {
        let mut history = self.history.lock().await;
        history.push(message)
    }

    async fn snapshot(&self) -> Vec<ChatMessage> {
        let history = self.history.lock().await;
        history.snapshot()
    }

    async fn count_messages(&self) -> usize {
        let history = self.history.lock().await;
        history.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}
