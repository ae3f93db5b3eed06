//! Entities: accepted chat messages and the bounded history buffer.

use std::collections::VecDeque;

use super::value_object::{MessageContent, MessageId, SenderName, Timestamp};

/// History capacity used when nothing else is configured
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// A validated inbound message that has not been accepted yet.
///
/// It carries no timestamp: the time is assigned on acceptance only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDraft {
    pub id: Option<MessageId>,
    pub sender: SenderName,
    pub content: MessageContent,
}

impl MessageDraft {
    pub fn new(id: Option<MessageId>, sender: SenderName, content: MessageContent) -> Self {
        Self {
            id,
            sender,
            content,
        }
    }
}

/// An accepted, immutable chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub sender: SenderName,
    pub content: MessageContent,
    pub timestamp: Timestamp,
}

impl ChatMessage {
    pub fn new(
        id: MessageId,
        sender: SenderName,
        content: MessageContent,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id,
            sender,
            content,
            timestamp,
        }
    }

    /// Finalize a draft. `fallback_id` is used only when the client sent no id.
    pub fn accept(draft: MessageDraft, fallback_id: MessageId, timestamp: Timestamp) -> Self {
        Self {
            id: draft.id.unwrap_or(fallback_id),
            sender: draft.sender,
            content: draft.content,
            timestamp,
        }
    }
}

/// Bounded FIFO log of the most recently accepted messages.
///
/// Appends go to the tail; once `capacity` is reached the head is evicted.
#[derive(Debug, Clone)]
pub struct MessageHistory {
    capacity: usize,
    messages: VecDeque<ChatMessage>,
}

impl MessageHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            messages: VecDeque::with_capacity(capacity),
        }
    }

    /// Append a message, returning the evicted oldest entry if any.
    ///
    /// With a capacity of zero nothing is retained and the message itself is returned.
    pub fn push(&mut self, message: ChatMessage) -> Option<ChatMessage> {
        if self.capacity == 0 {
            return Some(message);
        }
        let evicted = if self.messages.len() >= self.capacity {
            self.messages.pop_front()
        } else {
            None
        };
        self.messages.push_back(message);
        evicted
    }

    /// Oldest-first copy of the current contents
    pub fn snapshot(&self) -> Vec<ChatMessage> {
        self.messages.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for MessageHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
