//! Store implementations shipped with the sync core

pub mod memory_store;

pub use memory_store::MemoryConversationStore;
