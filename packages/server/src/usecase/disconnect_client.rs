//! UseCase: クライアント切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectClientUseCase::execute() / disconnect_all() メソッド
//!
//! ### なぜこのテストが必要か
//! - 切断通知は重複・競合しうるため、冪等である必要がある
//!
//! ### どのような状況を想定しているか
//! - 正常系：登録中の接続の切断
//! - エッジケース：二回目の切断、未登録の接続の切断、シャットダウン時の全切断

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher};

/// クライアント切断のユースケース
pub struct DisconnectClientUseCase {
    /// MessagePusher（接続レジストリとメッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectClientUseCase {
    /// 新しい DisconnectClientUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// クライアント切断を実行
    ///
    /// # Returns
    ///
    /// 接続が登録されていた場合は `true`（二回目以降の呼び出しは `false`）
    pub async fn execute(&self, connection_id: &ConnectionId) -> bool {
        let removed = self.message_pusher.unregister_client(connection_id).await;
        if removed {
            tracing::info!(
                "Connection '{}' disconnected. Total connections: {}",
                connection_id,
                self.message_pusher.count_clients().await
            );
        } else {
            tracing::debug!(
                "Connection '{}' was already removed from the registry",
                connection_id
            );
        }
        removed
    }

    /// 全ての接続を切断（シャットダウン時）
    pub async fn disconnect_all(&self) -> usize {
        let count = self.message_pusher.disconnect_all().await;
        tracing::info!("Disconnected {} connection(s) for shutdown", count);
        count
    }
}
