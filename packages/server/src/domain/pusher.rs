//! MessagePusher trait 定義
//!
//! 接続中のクライアントへメッセージを届けるためのインターフェース。
//! 接続レジストリ（登録・登録解除・ファンアウト）の振る舞いをここで定義し、
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{
    error::{MessagePushError, RegistryError},
    value_object::ConnectionId,
};

/// 接続ごとの送信キュー（有界）
///
/// 送信側は `try_send` のみを使うため、遅いクライアントがブロードキャストを止めることはない。
pub type PusherChannel = mpsc::Sender<String>;

/// ブロードキャスト結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// キューに積めた接続の数
    pub delivered: usize,
    /// 送信に失敗し、登録解除された接続
    pub dropped: Vec<ConnectionId>,
}

/// MessagePusher trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続を登録（同じ ID の二重登録はエラー）
    async fn register_client(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) -> Result<(), RegistryError>;

    /// 接続の登録を解除（登録されていなければ何もしない）
    ///
    /// 登録されていた場合は `true` を返す
    async fn unregister_client(&self, connection_id: &ConnectionId) -> bool;

    /// 特定の接続にのみ送信
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError>;

    /// 登録中の全ての接続に送信
    ///
    /// 一部の接続への送信失敗で中断せず、失敗した接続は登録解除する
    async fn broadcast(&self, content: &str) -> BroadcastReport;

    /// 登録中の接続数（参考値）
    async fn count_clients(&self) -> usize;

    /// 全ての接続を登録解除（シャットダウン時）
    async fn disconnect_all(&self) -> usize;
}
