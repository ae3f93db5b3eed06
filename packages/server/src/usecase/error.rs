//! UseCase errors.

use thiserror::Error;

use crate::infrastructure::dto::conversion::PayloadError;

/// 接続処理のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConnectError {
    /// 同じ接続 ID が既に登録されている
    #[error("Connection '{0}' is already registered")]
    DuplicateConnection(String),

    /// 履歴スナップショットの送信に失敗
    #[error("Failed to send history snapshot: {0}")]
    SnapshotFailed(String),

    /// 履歴フレームのエンコードに失敗
    #[error("Failed to encode history frame: {0}")]
    Encode(String),
}

/// メッセージ送信処理のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SendMessageError {
    /// 受信したペイロードが不正（ログに記録して破棄する）
    #[error("Malformed payload: {0}")]
    MalformedPayload(#[from] PayloadError),

    /// メッセージフレームのエンコードに失敗
    #[error("Failed to encode message frame: {0}")]
    Encode(String),

    /// 受理タスクが異常終了（panic など）
    #[error("Message acceptance task failed: {0}")]
    Interrupted(String),
}
