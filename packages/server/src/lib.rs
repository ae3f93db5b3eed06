//! Real-time message relay.
//!
//! Clients connect over WebSocket, submit short text messages, and receive every
//! accepted message in acceptance order, plus a bounded history replay on connect.

pub mod config;

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
