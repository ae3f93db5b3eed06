//! UseCase: クライアント接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectClientUseCase::execute() メソッド
//! - 接続の登録と、その接続のみへの履歴スナップショット送信
//!
//! ### なぜこのテストが必要か
//! - 新しい接続はライブメッセージより先に履歴を受け取る必要がある
//! - 履歴は古い順で、同じメッセージが二重に含まれてはならない
//!
//! ### どのような状況を想定しているか
//! - 正常系：空の履歴、メッセージがある履歴
//! - 異常系：重複した接続 ID、受信側が既に閉じている接続

use std::sync::Arc;

use crate::{
    domain::{ConnectionId, MessageHistoryRepository, MessagePusher, PusherChannel, RegistryError},
    infrastructure::dto::conversion::encode_history_frame,
};

use super::{error::ConnectError, sequencer::Sequencer};

/// クライアント接続のユースケース
pub struct ConnectClientUseCase {
    /// Repository（メッセージ履歴の抽象化）
    repository: Arc<dyn MessageHistoryRepository>,
    /// MessagePusher（接続レジストリとメッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// メッセージ受理と共有する排他制御
    sequencer: Arc<Sequencer>,
}

impl ConnectClientUseCase {
    /// 新しい ConnectClientUseCase を作成
    pub fn new(
        repository: Arc<dyn MessageHistoryRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        sequencer: Arc<Sequencer>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            sequencer,
        }
    }

    /// クライアント接続を実行
    ///
    /// 登録と履歴スナップショットの送信は、メッセージ受理と同じ排他区間で行う。
    /// そのため履歴の各メッセージは、スナップショットかライブ配信のどちらか一方で
    /// ちょうど一度だけ届き、スナップショットは常にライブ配信より先に届く。
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 接続 ID（Domain Model）
    /// * `sender` - 接続への送信キュー
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 送信した履歴の件数
    /// * `Err(ConnectError)` - 接続失敗（接続は登録されない）
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) -> Result<usize, ConnectError> {
        let _turn = self.sequencer.enter().await;

        // 1. 履歴スナップショットを取得してエンコード
        let history = self.repository.snapshot().await;
        let frame =
            encode_history_frame(&history).map_err(|e| ConnectError::Encode(e.to_string()))?;

        // 2. MessagePusher に接続を登録
        self.message_pusher
            .register_client(connection_id.clone(), sender)
            .await
            .map_err(|e| match e {
                RegistryError::DuplicateConnection(id) => ConnectError::DuplicateConnection(id),
            })?;

        // 3. この接続のみに履歴を送信
        if let Err(e) = self.message_pusher.push_to(&connection_id, &frame).await {
            self.message_pusher.unregister_client(&connection_id).await;
            return Err(ConnectError::SnapshotFailed(e.to_string()));
        }

        tracing::info!(
            "Connection '{}' registered, sent {} history message(s)",
            connection_id,
            history.len()
        );

        Ok(history.len())
    }
}
