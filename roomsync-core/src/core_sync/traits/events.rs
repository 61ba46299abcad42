//! Event Propagation Sink Trait
//!
//! Applies a single remote-originated event to local history. Events are
//! owned by the sink once handed over; the sink is responsible for
//! sequencing them in causal order.

use crate::core_conversation::RemoteEvent;
use crate::core_sync::errors::StoreResult;
use async_trait::async_trait;

/// Applies acknowledged remote events to local history
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Apply one event; the event's local time has already been stamped
    async fn apply_event(&self, event: RemoteEvent) -> StoreResult<()>;
}
