//! roomsync-core
//!
//! Reconciles a local replica of conversation metadata with an
//! authoritative remote service: local mutations propagate outward
//! (create, rename, membership, archival/mute state, join links) and
//! remote state pulls inward through full and targeted catalog sync. The
//! local store only ever reflects facts the remote has acknowledged.

pub mod config;
pub mod core_conversation;
pub mod core_sync;
pub mod logging;
pub mod test_utils;

pub use config::SyncConfig;
pub use core_sync::{ConversationSyncManager, SyncResult};
pub use logging::{init_logging, LogLevel};
