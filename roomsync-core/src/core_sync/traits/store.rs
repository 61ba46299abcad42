//! Local Conversation Store Trait
//!
//! Lookup/upsert contract the sync core requires from local persistence.
//! Row storage and indexing are the implementation's concern; the store is
//! expected to serialize its own internal writes.

use crate::core_conversation::{
    ConversationId, ConversationRecord, ConversationSnapshot, JoinLink,
};
use crate::core_sync::errors::StoreResult;
use async_trait::async_trait;

/// Local conversation persistence
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Look up a conversation by its local id
    async fn get_conversation(
        &self,
        id: &ConversationId,
    ) -> StoreResult<Option<ConversationRecord>>;

    /// Insert-or-merge a batch of remote snapshots
    ///
    /// Must be idempotent: applying the same snapshot twice leaves local
    /// state identical to applying it once. For conversations not seen
    /// before, the store synthesizes a conversation-started marker.
    async fn apply_snapshots(&self, snapshots: Vec<ConversationSnapshot>) -> StoreResult<()>;

    /// Insert-or-merge a single snapshot and return the local id it landed
    /// on; used by conversation creation so follow-up member additions can
    /// target the new record
    async fn apply_new_conversation(
        &self,
        snapshot: ConversationSnapshot,
    ) -> StoreResult<ConversationId>;

    /// Persist a fetched join link on an existing record
    async fn set_join_link(&self, id: &ConversationId, link: JoinLink) -> StoreResult<()>;
}
