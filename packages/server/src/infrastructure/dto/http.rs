//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Response of `GET /api/stats`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelayStatsDto {
    /// Currently registered connections (advisory)
    pub connections: usize,
    /// Messages held in history
    pub history: usize,
    /// History capacity
    pub capacity: usize,
}
