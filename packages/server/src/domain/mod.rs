//! Domain layer: value objects, entities and the ports the relay depends on.

pub mod entity;
pub mod error;
pub mod factory;
pub mod pusher;
pub mod registry;
pub mod repository;
pub mod value_object;

pub use entity::{ChatMessage, DEFAULT_HISTORY_CAPACITY, MessageDraft, MessageHistory};
pub use error::{MessagePushError, RegistryError, ValueObjectError};
pub use factory::{ConnectionIdFactory, MessageIdFactory};
pub use pusher::{BroadcastReport, MessagePusher, PusherChannel};
#[cfg(test)]
pub use pusher::MockMessagePusher;
pub use registry::{ConnectionRegistry, Visit};
pub use repository::MessageHistoryRepository;
pub use value_object::{ConnectionId, MessageContent, MessageId, SenderName, Timestamp};
