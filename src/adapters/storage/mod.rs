//! Storage adapters for wizard sessions.

mod in_memory_session_store;

pub use in_memory_session_store::InMemorySessionStore;
