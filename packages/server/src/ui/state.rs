//! Server state shared by all handlers.

use std::sync::Arc;

use crate::{
    config::RelayConfig,
    usecase::{
        ConnectClientUseCase, DisconnectClientUseCase, GetHistoryUseCase, SendMessageUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// ConnectClientUseCase（接続時の登録と履歴送信）
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    /// SendMessageUseCase（メッセージの受理とブロードキャスト）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// DisconnectClientUseCase（切断時の登録解除）
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    /// GetHistoryUseCase（HTTP API 用の参照）
    pub get_history_usecase: Arc<GetHistoryUseCase>,
    /// Relay configuration
    pub config: RelayConfig,
}
