//! In-memory repositories (process lifetime, never persisted).

pub mod history;

pub use history::InMemoryMessageHistoryRepository;
