//! UseCase layer: the hub's connection lifecycle and message acceptance.
//!
//! - `ConnectClientUseCase`: on-connect (register + history replay)
//! - `SendMessageUseCase`: on-message (validate, stamp, store, fan out)
//! - `DisconnectClientUseCase`: on-disconnect (idempotent deregistration)
//! - `GetHistoryUseCase`: read-only views for the HTTP API
//!
//! The first two share one [`Sequencer`] so that acceptance order is a single
//! total order and a history replay never interleaves with a broadcast.

mod connect_client;
mod disconnect_client;
mod error;
mod get_history;
mod send_message;
mod sequencer;

pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{ConnectError, SendMessageError};
pub use get_history::{GetHistoryUseCase, RelayStats};
pub use send_message::SendMessageUseCase;
pub use sequencer::Sequencer;
