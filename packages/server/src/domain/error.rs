//! Domain errors.

use thiserror::Error;

/// 値オブジェクトの生成に失敗した場合のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValueObjectError {
    /// 空文字列（trim 後）
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
}

/// Connection registry errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The connection id is already registered
    #[error("Connection '{0}' is already registered")]
    DuplicateConnection(String),
}

/// メッセージ送信（push）のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MessagePushError {
    /// 送信先の接続が登録されていない
    #[error("Connection '{0}' not found")]
    ConnectionNotFound(String),

    /// 送信に失敗（バッファ満杯、または接続が閉じている）
    #[error("Failed to push message to '{connection_id}': {reason}")]
    SendFailed {
        connection_id: String,
        reason: String,
    },
}
