//! Domain Error Reporter Trait
//!
//! Side channel for UI-facing domain errors. Reports are emitted *in
//! addition to* the operation's `SyncResult`, never instead of it, so both
//! can be asserted independently.

use crate::core_conversation::{ConversationId, UserId};
use crate::core_sync::errors::RemoteError;
use async_trait::async_trait;

/// UI-facing domain error, decoupled from the sync outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainErrorReport {
    /// Member addition hit users with no connection to this account
    UnconnectedUsers {
        conversation: ConversationId,
        users: Vec<UserId>,
        error: RemoteError,
    },

    /// Member addition would exceed the conversation's capacity
    ConversationFull {
        conversation: ConversationId,
        users: Vec<UserId>,
        error: RemoteError,
    },

    /// Conversation creation included users with no connection
    UnconnectedUsersInNewConversation {
        users: Vec<UserId>,
        error: RemoteError,
    },
}

/// Surfaces domain errors to the interface layer
#[async_trait]
pub trait DomainErrorReporter: Send + Sync {
    async fn report(&self, report: DomainErrorReport);
}
