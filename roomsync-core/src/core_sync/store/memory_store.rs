//! In-Memory Conversation Store
//!
//! In-memory implementation of [`ConversationStore`] for tests and
//! embedders that bring no persistence engine of their own. Snapshot
//! application is idempotent insert-or-merge; newly discovered
//! conversations get a synthesized conversation-started marker.

use crate::core_conversation::{
    ConversationId, ConversationRecord, ConversationSnapshot, EventPayload, JoinLink,
    RemoteConversationId, RemoteEvent, Timestamp,
};
use crate::core_sync::errors::{StoreError, StoreResult};
use crate::core_sync::traits::ConversationStore;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Default)]
struct StoreInner {
    records: HashMap<ConversationId, ConversationRecord>,
    remote_index: HashMap<RemoteConversationId, ConversationId>,
    start_markers: Vec<RemoteEvent>,
}

/// In-memory conversation store
pub struct MemoryConversationStore {
    inner: RwLock<StoreInner>,
}

impl MemoryConversationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner::default()),
        }
    }

    /// Seed a record directly (test setup and migration paths)
    pub async fn insert_record(&self, record: ConversationRecord) {
        let mut inner = self.inner.write().await;
        if let Some(remote_id) = record.remote_id.clone() {
            inner.remote_index.insert(remote_id, record.id.clone());
        }
        inner.records.insert(record.id.clone(), record);
    }

    /// Number of records currently held
    pub async fn record_count(&self) -> usize {
        self.inner.read().await.records.len()
    }

    /// Look up a record by its remote id
    pub async fn get_by_remote(
        &self,
        remote_id: &RemoteConversationId,
    ) -> Option<ConversationRecord> {
        let inner = self.inner.read().await;
        let local_id = inner.remote_index.get(remote_id)?;
        inner.records.get(local_id).cloned()
    }

    /// Conversation-started markers synthesized so far
    pub async fn start_markers(&self) -> Vec<RemoteEvent> {
        self.inner.read().await.start_markers.clone()
    }

    fn upsert(inner: &mut StoreInner, snapshot: ConversationSnapshot) -> ConversationId {
        match inner.remote_index.get(&snapshot.remote_id).cloned() {
            Some(local_id) => {
                if let Some(record) = inner.records.get_mut(&local_id) {
                    record.merge_snapshot(&snapshot);
                }
                local_id
            }
            None => {
                let local_id = ConversationId::generate();
                debug!(
                    conversation = %local_id,
                    remote = %snapshot.remote_id,
                    "conversation discovered"
                );
                let mut marker = RemoteEvent::new(
                    snapshot.remote_id.clone(),
                    EventPayload::ConversationStarted { by: None },
                    snapshot.last_event_time,
                );
                marker.stamp_local_time(Timestamp::now());
                inner.start_markers.push(marker);

                let record = ConversationRecord::from_snapshot(local_id.clone(), &snapshot);
                inner
                    .remote_index
                    .insert(snapshot.remote_id.clone(), local_id.clone());
                inner.records.insert(local_id.clone(), record);
                local_id
            }
        }
    }
}

impl Default for MemoryConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConversationStore for MemoryConversationStore {
    async fn get_conversation(
        &self,
        id: &ConversationId,
    ) -> StoreResult<Option<ConversationRecord>> {
        let inner = self.inner.read().await;
        Ok(inner.records.get(id).cloned())
    }

    async fn apply_snapshots(&self, snapshots: Vec<ConversationSnapshot>) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        for snapshot in snapshots {
            Self::upsert(&mut inner, snapshot);
        }
        Ok(())
    }

    async fn apply_new_conversation(
        &self,
        snapshot: ConversationSnapshot,
    ) -> StoreResult<ConversationId> {
        let mut inner = self.inner.write().await;
        Ok(Self::upsert(&mut inner, snapshot))
    }

    async fn set_join_link(&self, id: &ConversationId, link: JoinLink) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let record = inner
            .records
            .get_mut(id)
            .ok_or_else(|| StoreError::Backend(format!("no record for conversation {}", id)))?;
        record.join_link = Some(link);
        Ok(())
    }
}
