//! Utilities shared by the relay packages: logging setup and time helpers.

pub mod logger;
pub mod time;
