//! Conversation synchronization core
//!
//! Request/response driven reconciliation of the local conversation
//! replica against the authoritative remote service. The orchestrator in
//! [`manager`] composes the collaborator traits in [`traits`] into one
//! operation per mutation or fetch kind, each terminating in a
//! [`result::SyncResult`].

pub mod batching;
pub mod catalog;
pub mod errors;
pub mod manager;
pub mod result;
pub mod store;
pub mod traits;

pub use errors::{ErrorLabel, RemoteError, StoreError, StoreResult, TransportError};
pub use manager::ConversationSyncManager;
pub use result::{FailureCode, SyncFailure, SyncResult};
pub use traits::{
    ConversationApi, ConversationStore, DomainErrorReport, DomainErrorReporter, EventSink,
};
