//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::{http::RelayStatsDto, websocket::MessageDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Current history, oldest first
pub async fn get_history(State(state): State<Arc<AppState>>) -> Json<Vec<MessageDto>> {
    let messages = state.get_history_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(messages.into_iter().map(MessageDto::from).collect())
}

/// Connection count and history usage
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<RelayStatsDto> {
    let stats = state.get_history_usecase.stats().await;

    Json(RelayStatsDto {
        connections: stats.connections,
        history: stats.history,
        capacity: stats.capacity,
    })
}
