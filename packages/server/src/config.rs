//! Relay configuration.

use std::time::Duration;

use crate::domain::DEFAULT_HISTORY_CAPACITY;

/// Frames that may be queued for one connection before it is considered too slow
pub const DEFAULT_OUTBOUND_BUFFER: usize = 256;
/// Upper bound for a single WebSocket write
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(5);

/// Tunables of the hub
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayConfig {
    /// Number of recent messages kept for replay
    pub history_capacity: usize,
    /// Per-connection outbound queue size
    pub outbound_buffer: usize,
    /// Per-write timeout on the WebSocket
    pub send_timeout: Duration,
}

impl RelayConfig {
    /// Outbound queue size, at least 1 (a zero-sized channel cannot be created)
    pub fn outbound_buffer(&self) -> usize {
        self.outbound_buffer.max(1)
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            outbound_buffer: DEFAULT_OUTBOUND_BUFFER,
            send_timeout: DEFAULT_SEND_TIMEOUT,
        }
    }
}
