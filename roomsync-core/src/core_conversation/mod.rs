//! Conversation data model
//!
//! Identifiers, remote snapshots, local records, and remote-originated
//! events shared by the sync core and its collaborators.

pub mod event;
pub mod record;
pub mod snapshot;
pub mod types;

pub use event::{EventPayload, RemoteEvent};
pub use record::ConversationRecord;
pub use snapshot::{
    AccessPolicy, CatalogPage, ConversationSnapshot, ConversationStateUpdate,
    CreateConversationRequest, JoinLink, MuteState,
};
pub use types::{ConversationId, RemoteConversationId, TeamId, Timestamp, UserId};
