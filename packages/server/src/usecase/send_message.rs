//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - ペイロードの検証、タイムスタンプ付与、履歴への追加、全接続へのブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - タイムスタンプは常にサーバーが付与する（クライアントの値は使わない）
//! - 不正なペイロードは履歴にもブロードキャストにも影響しない
//! - 全ての接続が同じ受理順でメッセージを受け取る
//!
//! ### どのような状況を想定しているか
//! - 正常系：送信者を含む全接続へのブロードキャスト、ID の自動付与
//! - 異常系：content が無い、JSON でないペイロード
//! - エッジケース：履歴の容量超過、送信先の一部が切断済み

use std::sync::Arc;

use relay_shared::time::Clock;

use crate::{
    domain::{
        ChatMessage, ConnectionId, MessageDraft, MessageHistoryRepository, MessageIdFactory,
        MessagePusher,
    },
    infrastructure::dto::conversion::{encode_message_frame, parse_inbound},
};

use super::{error::SendMessageError, sequencer::Sequencer};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Repository（メッセージ履歴の抽象化）
    repository: Arc<dyn MessageHistoryRepository>,
    /// MessagePusher（接続レジストリとメッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// 接続処理と共有する排他制御
    sequencer: Arc<Sequencer>,
    /// タイムスタンプの付与に使う時計
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(
        repository: Arc<dyn MessageHistoryRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        sequencer: Arc<Sequencer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            sequencer,
            clock,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `from` - 送信元の接続 ID（ログ用）
    /// * `raw_payload` - クライアントから受信したペイロード（JSON）
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - 受理されたメッセージ（サーバーのタイムスタンプ付き）
    /// * `Err(SendMessageError)` - ペイロードが不正（何も保存・送信されない）
    pub async fn execute(
        &self,
        from: &ConnectionId,
        raw_payload: &str,
    ) -> Result<ChatMessage, SendMessageError> {
        // 1. ペイロードを検証（排他区間の外で行う）
        let draft = parse_inbound(raw_payload)?;

        // 2. 受理（タイムスタンプ付与・履歴追加・ブロードキャスト）は別タスクで行う。
        //    呼び出し元のタスクが abort されても、履歴に追加したメッセージは必ず配信される。
        let repository = self.repository.clone();
        let message_pusher = self.message_pusher.clone();
        let sequencer = self.sequencer.clone();
        let clock = self.clock.clone();
        let from = from.clone();

        tokio::spawn(async move {
            accept(
                repository.as_ref(),
                message_pusher.as_ref(),
                &sequencer,
                clock.as_ref(),
                &from,
                draft,
            )
            .await
        })
        .await
        .map_err(|e| SendMessageError::Interrupted(e.to_string()))?
    }
}

/// 受理順を確定させる排他区間
async fn accept(
    repository: &dyn MessageHistoryRepository,
    message_pusher: &dyn MessagePusher,
    sequencer: &Sequencer,
    clock: &dyn Clock,
    from: &ConnectionId,
    draft: MessageDraft,
) -> Result<ChatMessage, SendMessageError> {
    let mut turn = sequencer.enter().await;

    let timestamp = turn.stamp(clock.now_millis());
    let message = ChatMessage::accept(draft, MessageIdFactory::generate(), timestamp);
    let frame =
        encode_message_frame(&message).map_err(|e| SendMessageError::Encode(e.to_string()))?;

    // 3. Repository 経由で履歴に追加
    if let Some(evicted) = repository.append(message.clone()).await {
        tracing::debug!("Evicted message '{}' from history", evicted.id.as_str());
    }

    // 4. MessagePusher を使って全接続にブロードキャスト
    let report = message_pusher.broadcast(&frame).await;
    for dropped in &report.dropped {
        tracing::info!("Connection '{}' dropped after failed send", dropped);
    }

    tracing::debug!(
        "Accepted message '{}' from connection '{}', delivered to {} connection(s)",
        message.id.as_str(),
        from,
        report.delivered
    );

    Ok(message)
}
