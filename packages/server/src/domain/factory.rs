//! Factories for server-generated identifiers.

use uuid::Uuid;

use super::value_object::{ConnectionId, MessageId};

/// Generates a fresh [`ConnectionId`] when a transport handshake completes
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    pub fn generate() -> ConnectionId {
        ConnectionId::from(Uuid::new_v4())
    }
}

/// Generates a [`MessageId`] for messages submitted without one
pub struct MessageIdFactory;

impl MessageIdFactory {
    pub fn generate() -> MessageId {
        MessageId::from(Uuid::new_v4())
    }
}
