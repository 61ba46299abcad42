//! Remote Conversation Client Trait
//!
//! Typed request/response contract against the authoritative conversation
//! service. Transport internals (framing, auth, low-level retries) live
//! behind this seam; the sync core only sees success payloads or structured
//! errors.

use crate::core_conversation::{
    CatalogPage, ConversationSnapshot, ConversationStateUpdate, CreateConversationRequest,
    JoinLink, RemoteConversationId, RemoteEvent, UserId,
};
use crate::core_sync::errors::{RemoteError, TransportError};
use async_trait::async_trait;

/// Remote conversation service client
///
/// In production this wraps the HTTP transport. In tests it is a recording
/// mock with scripted responses.
#[async_trait]
pub trait ConversationApi: Send + Sync {
    /// Fetch one catalog page starting after `cursor` (from the beginning
    /// when `cursor` is absent)
    async fn load_catalog_page(
        &self,
        cursor: Option<&RemoteConversationId>,
    ) -> Result<CatalogPage, TransportError>;

    /// Fetch snapshots for a specific set of remote ids (not paginated)
    async fn load_by_remote_ids(
        &self,
        ids: &[RemoteConversationId],
    ) -> Result<Vec<ConversationSnapshot>, TransportError>;

    /// Rename a conversation; the remote may return the resulting event
    async fn post_rename(
        &self,
        remote_id: &RemoteConversationId,
        name: &str,
    ) -> Result<Option<RemoteEvent>, RemoteError>;

    /// Add a batch of members; callers must respect the member batch limit
    async fn post_member_join(
        &self,
        remote_id: &RemoteConversationId,
        users: &[UserId],
    ) -> Result<Option<RemoteEvent>, RemoteError>;

    /// Remove one member; `Ok(None)` means the member was already gone
    async fn post_member_leave(
        &self,
        remote_id: &RemoteConversationId,
        user: &UserId,
    ) -> Result<Option<RemoteEvent>, RemoteError>;

    /// Post the full archival/mute state object; not event-producing
    async fn post_conversation_state(
        &self,
        remote_id: &RemoteConversationId,
        state: &ConversationStateUpdate,
    ) -> Result<(), RemoteError>;

    /// Create a conversation, returning its snapshot
    async fn post_create_conversation(
        &self,
        request: CreateConversationRequest,
    ) -> Result<ConversationSnapshot, RemoteError>;

    /// Fetch the join link, if one exists
    async fn get_join_link(
        &self,
        remote_id: &RemoteConversationId,
    ) -> Result<Option<JoinLink>, RemoteError>;
}
