//! Conversion logic between DTOs and domain entities.
//!
//! Inbound parsing returns an explicit `Result` so that a malformed payload is
//! an ordinary branch for the caller.

use thiserror::Error;

use crate::domain::{
    ChatMessage, MessageContent, MessageDraft, MessageId, SenderName, ValueObjectError,
};
use crate::infrastructure::dto::websocket::{
    HistoryFrame, InboundMessageDto, LiveMessageFrame, MessageDto, MessageType,
};

/// Reason an inbound payload was rejected
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PayloadError {
    /// Not a JSON object of the expected shape
    #[error("invalid JSON payload: {0}")]
    InvalidJson(String),

    /// A required field is missing
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    /// A field is present but fails validation
    #[error("invalid field: {0}")]
    InvalidField(#[from] ValueObjectError),
}

// ========================================
// Inbound: raw payload → Domain
// ========================================

/// Parse a raw client payload into a validated draft
pub fn parse_inbound(raw: &str) -> Result<MessageDraft, PayloadError> {
    let dto: InboundMessageDto =
        serde_json::from_str(raw).map_err(|e| PayloadError::InvalidJson(e.to_string()))?;
    MessageDraft::try_from(dto)
}

impl TryFrom<InboundMessageDto> for MessageDraft {
    type Error = PayloadError;

    fn try_from(dto: InboundMessageDto) -> Result<Self, Self::Error> {
        let sender = dto.sender.ok_or(PayloadError::MissingField("sender"))?;
        let content = dto.content.ok_or(PayloadError::MissingField("content"))?;

        // A blank id counts as absent; the server fills it in.
        let id = match dto.id {
            Some(id) if !id.trim().is_empty() => Some(MessageId::new(id)?),
            _ => None,
        };

        Ok(MessageDraft::new(
            id,
            SenderName::new(sender)?,
            MessageContent::new(content)?,
        ))
    }
}

// ========================================
// Outbound: Domain → DTO / frames
// ========================================

impl From<ChatMessage> for MessageDto {
    fn from(model: ChatMessage) -> Self {
        Self {
            timestamp: Some(model.timestamp.to_rfc3339()),
            id: model.id.into_string(),
            sender: model.sender.into_string(),
            content: model.content.into_string(),
        }
    }
}

impl From<&ChatMessage> for MessageDto {
    fn from(model: &ChatMessage) -> Self {
        model.clone().into()
    }
}

/// Encode the history replay frame (oldest first)
pub fn encode_history_frame(messages: &[ChatMessage]) -> Result<String, serde_json::Error> {
    serde_json::to_string(&HistoryFrame {
        r#type: MessageType::History,
        data: messages.iter().map(MessageDto::from).collect(),
    })
}

/// Encode a live message frame
pub fn encode_message_frame(message: &ChatMessage) -> Result<String, serde_json::Error> {
    serde_json::to_string(&LiveMessageFrame {
        r#type: MessageType::Message,
        data: message.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Timestamp;

    fn create_test_message(id: &str, content: &str, timestamp: i64) -> ChatMessage {
        ChatMessage::new(
            MessageId::new(id.to_string()).unwrap(),
            SenderName::new("alice".to_string()).unwrap(),
            MessageContent::new(content.to_string()).unwrap(),
            Timestamp::new(timestamp),
        )
    }

    #[test]
    fn test_parse_inbound_success() {
        // テスト項目: 正しいペイロードがドラフトに変換される
        // given (前提条件):
        let raw = r#"{"id":"abc","sender":"alice","content":"hi"}"#;

        // when (操作):
        let draft = parse_inbound(raw).unwrap();

        // then (期待する結果):
        assert_eq!(draft.id.unwrap().as_str(), "abc");
        assert_eq!(draft.sender.as_str(), "alice");
        assert_eq!(draft.content.as_str(), "hi");
    }

    #[test]
    fn test_parse_inbound_without_id() {
        // テスト項目: ID が無い、または空の場合はドラフトの ID が None になる
        // given (前提条件):
        let without_id = r#"{"sender":"alice","content":"hi"}"#;
        let blank_id = r#"{"id":"  ","sender":"alice","content":"hi"}"#;

        // when (操作):
        let draft1 = parse_inbound(without_id).unwrap();
        let draft2 = parse_inbound(blank_id).unwrap();

        // then (期待する結果):
        assert_eq!(draft1.id, None);
        assert_eq!(draft2.id, None);
    }

    #[test]
    fn test_parse_inbound_accepts_long_fields() {
        // テスト項目: 長い sender / content / id も長さで拒否されない
        // given (前提条件):
        let sender = "s".repeat(300);
        let content = "c".repeat(5000);
        let message_id = "i".repeat(300);
        let raw = serde_json::json!({"id": message_id, "sender": sender, "content": content})
            .to_string();

        // when (操作):
        let draft = parse_inbound(&raw).unwrap();

        // then (期待する結果):
        assert_eq!(draft.id.unwrap().as_str(), message_id);
        assert_eq!(draft.sender.as_str(), sender);
        assert_eq!(draft.content.as_str(), content);
    }

    #[test]
    fn test_parse_inbound_missing_content() {
        // テスト項目: content が無いペイロードは拒否される
        // given (前提条件):
        let raw = r#"{"sender":"alice"}"#;

        // when (操作):
        let result = parse_inbound(raw);

        // then (期待する結果):
        assert_eq!(result, Err(PayloadError::MissingField("content")));
    }

    #[test]
    fn test_parse_inbound_blank_sender() {
        // テスト項目: 空白のみの sender は拒否される
        // given (前提条件):
        let raw = r#"{"sender":"   ","content":"hi"}"#;

        // when (操作):
        let result = parse_inbound(raw);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(PayloadError::InvalidField(ValueObjectError::Empty {
                field: "sender"
            }))
        );
    }

    #[test]
    fn test_parse_inbound_invalid_json() {
        // テスト項目: JSON でない、またはオブジェクトでないペイロードは拒否される
        // given (前提条件):
        let inputs = ["not json", "42", r#""hello""#, r#"{"sender":1,"content":"x"}"#];

        for raw in inputs {
            // when (操作):
            let result = parse_inbound(raw);

            // then (期待する結果):
            assert!(
                matches!(result, Err(PayloadError::InvalidJson(_))),
                "expected InvalidJson for {raw}"
            );
        }
    }

    #[test]
    fn test_domain_message_to_dto() {
        // テスト項目: ドメインの ChatMessage が DTO に変換され、タイムスタンプが必ず付与される
        // given (前提条件):
        let message = create_test_message("m1", "Hi!", 1672531200000);

        // when (操作):
        let dto: MessageDto = message.into();

        // then (期待する結果):
        assert_eq!(dto.id, "m1");
        assert_eq!(dto.sender, "alice");
        assert_eq!(dto.content, "Hi!");
        assert_eq!(dto.timestamp.as_deref(), Some("2023-01-01T00:00:00.000Z"));
    }

    #[test]
    fn test_encode_history_frame_keeps_order() {
        // テスト項目: 履歴フレームはメッセージを古い順のまま含む
        // given (前提条件):
        let messages = vec![
            create_test_message("m1", "first", 1),
            create_test_message("m2", "second", 2),
        ];

        // when (操作):
        let json = encode_history_frame(&messages).unwrap();
        let frame: HistoryFrame = serde_json::from_str(&json).unwrap();

        // then (期待する結果):
        assert_eq!(frame.r#type, MessageType::History);
        let ids: Vec<&str> = frame.data.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "m2"]);
    }
}
