/*
    record.rs - Local conversation record

    The row shape the local store keeps per conversation. A record must
    exist (with a known remote id) before any remote-mutating operation
    other than creation can target the conversation.
*/

use super::snapshot::{
    AccessPolicy, ConversationSnapshot, ConversationStateUpdate, JoinLink, MuteState,
};
use super::types::{ConversationId, RemoteConversationId, TeamId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Locally persisted conversation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationRecord {
    /// Local identifier, stable for the lifetime of the row
    pub id: ConversationId,

    /// Remote identifier, once known
    pub remote_id: Option<RemoteConversationId>,

    pub name: Option<String>,
    pub members: HashSet<UserId>,
    pub access: AccessPolicy,
    pub team: Option<TeamId>,

    pub archived: bool,
    pub archive_ref_time: Option<Timestamp>,
    pub mute_state: MuteState,
    pub mute_ref_time: Option<Timestamp>,

    /// Time of the last event this replica has acknowledged
    pub last_event_time: Timestamp,

    pub join_link: Option<JoinLink>,
}

impl ConversationRecord {
    /// Record for a conversation first seen through a remote snapshot
    pub fn from_snapshot(id: ConversationId, snapshot: &ConversationSnapshot) -> Self {
        let mut record = ConversationRecord {
            id,
            remote_id: Some(snapshot.remote_id.clone()),
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
        };
        record.merge_snapshot(snapshot);
        record
    }

    /// Replace remote-owned fields with the snapshot's view
    ///
    /// Idempotent: merging the same snapshot twice leaves the record
    /// unchanged after the first merge.
    pub fn merge_snapshot(&mut self, snapshot: &ConversationSnapshot) {
        self.remote_id = Some(snapshot.remote_id.clone());
        self.name = snapshot.name.clone();
        self.members = snapshot.members.clone();
        self.access = snapshot.access;
        self.team = snapshot.team.clone();
        self.archived = snapshot.archived;
        self.archive_ref_time = snapshot.archive_ref_time;
        self.mute_state = snapshot.mute_state;
        self.mute_ref_time = snapshot.mute_ref_time;
        self.last_event_time = snapshot.last_event_time;
        if snapshot.join_link.is_some() {
            self.join_link = snapshot.join_link.clone();
        }
    }

    /// Full state update muting the conversation as of `ref_time`
    ///
    /// The state endpoint takes the full object, so the record's archival
    /// state is carried over unchanged.
    pub fn mute_update(&self, state: MuteState, ref_time: Timestamp) -> ConversationStateUpdate {
        ConversationStateUpdate {
            archived: self.archived,
            archive_ref_time: self.archive_ref_time.unwrap_or(self.last_event_time),
            mute_state: Some(state),
            mute_ref_time: Some(ref_time),
        }
    }
}
