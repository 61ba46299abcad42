//! Fault-injecting store decorator
//!
//! Wraps [`MemoryConversationStore`] and fails selected operations on
//! demand, for exercising the orchestrator's retry downgrades.

use crate::core_conversation::{
    ConversationId, ConversationRecord, ConversationSnapshot, JoinLink,
};
use crate::core_sync::errors::{StoreError, StoreResult};
use crate::core_sync::store::MemoryConversationStore;
use crate::core_sync::traits::ConversationStore;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Store decorator with per-operation failure switches
pub struct FaultInjectingStore {
    inner: Arc<MemoryConversationStore>,
    fail_lookup: AtomicBool,
    fail_apply: AtomicBool,
    fail_join_link: AtomicBool,
}

impl FaultInjectingStore {
    pub fn new(inner: Arc<MemoryConversationStore>) -> Self {
        Self {
            inner,
            fail_lookup: AtomicBool::new(false),
            fail_apply: AtomicBool::new(false),
            fail_join_link: AtomicBool::new(false),
        }
    }

    pub fn inner(&self) -> &Arc<MemoryConversationStore> {
        &self.inner
    }

    pub fn fail_lookups(&self, enabled: bool) {
        self.fail_lookup.store(enabled, Ordering::SeqCst);
    }

    pub fn fail_applies(&self, enabled: bool) {
        self.fail_apply.store(enabled, Ordering::SeqCst);
    }

    pub fn fail_join_links(&self, enabled: bool) {
        self.fail_join_link.store(enabled, Ordering::SeqCst);
    }

    fn injected() -> StoreError {
        StoreError::Backend("injected fault".to_string())
    }
}

#[async_trait]
impl ConversationStore for FaultInjectingStore {
    async fn get_conversation(
        &self,
        id: &ConversationId,
    ) -> StoreResult<Option<ConversationRecord>> {
        if self.fail_lookup.load(Ordering::SeqCst) {
            return Err(Self::injected());
        }
        self.inner.get_conversation(id).await
    }

    async fn apply_snapshots(&self, snapshots: Vec<ConversationSnapshot>) -> StoreResult<()> {
        if self.fail_apply.load(Ordering::SeqCst) {
            return Err(Self::injected());
        }
        self.inner.apply_snapshots(snapshots).await
    }

    async fn apply_new_conversation(
        &self,
        snapshot: ConversationSnapshot,
    ) -> StoreResult<ConversationId> {
        if self.fail_apply.load(Ordering::SeqCst) {
            return Err(Self::injected());
        }
        self.inner.apply_new_conversation(snapshot).await
    }

    async fn set_join_link(&self, id: &ConversationId, link: JoinLink) -> StoreResult<()> {
        if self.fail_join_link.load(Ordering::SeqCst) {
            return Err(Self::injected());
        }
        self.inner.set_join_link(id, link).await
    }
}
