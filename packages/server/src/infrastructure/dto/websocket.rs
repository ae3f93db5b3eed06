//! WebSocket frame DTOs.
//!
//! Server → client frames are `{"type": ..., "data": ...}` objects; the client
//! sends a bare message object.

use serde::{Deserialize, Serialize};

/// Frame type tag
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    /// History replay sent once on connect
    History,
    /// A newly accepted message
    Message,
}

/// Message as it appears on the wire
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageDto {
    pub id: String,
    pub sender: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Payload submitted by a client.
///
/// Every field is optional at this level so that a missing field is reported
/// as such instead of as a generic JSON error. Any `timestamp` or extra field
/// is ignored.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct InboundMessageDto {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// `{"type": "history", "data": [...]}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryFrame {
    pub r#type: MessageType,
    pub data: Vec<MessageDto>,
}

/// `{"type": "message", "data": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LiveMessageFrame {
    pub r#type: MessageType,
    pub data: MessageDto,
}
