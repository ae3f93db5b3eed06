//! Single mutual-exclusion point for the hub.

use tokio::sync::{Mutex, MutexGuard};

use crate::domain::Timestamp;

/// State owned by whoever holds the sequencer
#[derive(Debug, Default)]
pub struct Turn {
    last_timestamp: Option<i64>,
}

impl Turn {
    /// Acceptance timestamp for `now_millis`, never earlier than the previous one.
    ///
    /// A clock stepping backwards would otherwise make timestamp order disagree
    /// with acceptance order.
    pub fn stamp(&mut self, now_millis: i64) -> Timestamp {
        let value = match self.last_timestamp {
            Some(last) => now_millis.max(last),
            None => now_millis,
        };
        self.last_timestamp = Some(value);
        Timestamp::new(value)
    }
}

/// Serializes message acceptance and connection registration.
///
/// Holding the guard returned by [`Sequencer::enter`] gives exclusive use of the
/// stamp → append → fan-out step. Sections held under it never await I/O:
/// fan-out only enqueues onto per-connection channels.
#[derive(Debug, Default)]
pub struct Sequencer {
    lock: Mutex<Turn>,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn enter(&self) -> MutexGuard<'_, Turn> {
        self.lock.lock().await
    }
}
