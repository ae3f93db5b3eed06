//! Repository trait 定義
//!
//! メッセージ履歴へのアクセスのインターフェース。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::entity::ChatMessage;

/// Message history repository trait
///
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
#[async_trait]
pub trait MessageHistoryRepository: Send + Sync {
    /// メッセージを末尾に追加（容量超過時は最も古いメッセージを削除して返す）
    async fn append(&self, message: ChatMessage) -> Option<ChatMessage>;

    /// 現在の履歴を古い順に取得
    async fn snapshot(&self) -> Vec<ChatMessage>;

    /// 保持しているメッセージ数を取得
    async fn count_messages(&self) -> usize;

    /// 履歴の容量
    fn capacity(&self) -> usize;
}
