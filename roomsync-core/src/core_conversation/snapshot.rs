/*
    snapshot.rs - Remote-service representation of a conversation

    A ConversationSnapshot is an immutable value received from the remote
    catalog or creation endpoint. It is never mutated locally; it replaces
    or merges into the local record.
*/

use super::types::{RemoteConversationId, TeamId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Who may join a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessPolicy {
    /// Invite-only
    Private,
    /// Any member of the owning team
    Team,
    /// Anyone with the join link
    Open,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        AccessPolicy::Private
    }
}

/// Notification muting level for a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MuteState {
    /// All notifications delivered
    None,
    /// Only direct mentions delivered
    MentionsOnly,
    /// Nothing delivered
    All,
}

impl Default for MuteState {
    fn default() -> Self {
        MuteState::None
    }
}

/// Join link for open conversations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinLink(pub String);

impl JoinLink {
    pub fn new(link: String) -> Self {
        JoinLink(link)
    }
}

/// Archival/mute state posted to the remote state endpoint
///
/// The state endpoint takes the full object; reference times anchor the
/// state change to a point in conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationStateUpdate {
    pub archived: bool,
    pub archive_ref_time: Timestamp,
    pub mute_state: Option<MuteState>,
    pub mute_ref_time: Option<Timestamp>,
}

impl ConversationStateUpdate {
    /// State update marking a conversation archived as of `ref_time`
    pub fn archived(ref_time: Timestamp) -> Self {
        ConversationStateUpdate {
            archived: true,
            archive_ref_time: ref_time,
            mute_state: None,
            mute_ref_time: None,
        }
    }

}

/// Remote-service representation of a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSnapshot {
    /// Remote identifier
    pub remote_id: RemoteConversationId,

    /// Display name (1:1 conversations may have none)
    pub name: Option<String>,

    /// Current member set
    pub members: HashSet<UserId>,

    /// Access policy
    pub access: AccessPolicy,

    /// Owning team, if any
    pub team: Option<TeamId>,

    /// Archival state
    pub archived: bool,

    /// Reference time for the archival state
    pub archive_ref_time: Option<Timestamp>,

    /// Mute state
    pub mute_state: MuteState,

    /// Reference time for the mute state
    pub mute_ref_time: Option<Timestamp>,

    /// Time of the last event the remote has recorded
    pub last_event_time: Timestamp,

    /// Join link, if one has been generated
    pub join_link: Option<JoinLink>,
}

impl ConversationSnapshot {
    /// Minimal snapshot for a conversation with the given remote id
    pub fn new(remote_id: RemoteConversationId) -> Self {
        ConversationSnapshot {
            remote_id,
            name: None,
            members: HashSet::new(),
            access: AccessPolicy::default(),
            team: None,
            archived: false,
            archive_ref_time: None,
            mute_state: MuteState::default(),
            mute_ref_time: None,
            last_event_time: Timestamp::from_millis(0),
            join_link: None,
        }
    }
}

/// One page of the remote conversation catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogPage {
    /// Snapshots in this page, in catalog order
    pub conversations: Vec<ConversationSnapshot>,

    /// Whether further pages exist after this one
    pub has_more: bool,
}

impl CatalogPage {
    pub fn new(conversations: Vec<ConversationSnapshot>, has_more: bool) -> Self {
        CatalogPage {
            conversations,
            has_more,
        }
    }

    /// Cursor resuming the catalog after this page
    pub fn next_cursor(&self) -> Option<RemoteConversationId> {
        self.conversations.last().map(|s| s.remote_id.clone())
    }
}

/// Request payload for conversation creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateConversationRequest {
    /// Initial members (at most the member batch limit; overflow is added
    /// afterwards through the member-join endpoint)
    pub users: Vec<UserId>,
    pub name: Option<String>,
    pub team: Option<TeamId>,
    pub access: AccessPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_cursor_is_last_snapshot() {
        let a = ConversationSnapshot::new(RemoteConversationId::new("a".to_string()));
        let b = ConversationSnapshot::new(RemoteConversationId::new("b".to_string()));
        let page = CatalogPage::new(vec![a, b], true);
        assert_eq!(
            page.next_cursor(),
            Some(RemoteConversationId::new("b".to_string()))
        );
    }

    #[test]
    fn test_next_cursor_empty_page() {
        let page = CatalogPage::new(vec![], false);
        assert_eq!(page.next_cursor(), None);
    }

    #[test]
    fn test_archived_state_update() {
        let ts = Timestamp::from_millis(42);
        let state = ConversationStateUpdate::archived(ts);
        assert!(state.archived);
        assert_eq!(state.archive_ref_time, ts);
        assert_eq!(state.mute_state, None);
    }
}
