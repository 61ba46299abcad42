//! Test fixtures for creating common test objects
//!
//! Builder patterns and factory functions for snapshots and records.

use crate::core_conversation::{
    AccessPolicy, ConversationId, ConversationRecord, ConversationSnapshot, MuteState,
    RemoteConversationId, TeamId, Timestamp, UserId,
};
use std::collections::HashSet;

/// Builder for test conversation snapshots
pub struct TestSnapshotBuilder {
    remote_id: RemoteConversationId,
    name: Option<String>,
    members: HashSet<UserId>,
    access: AccessPolicy,
    team: Option<TeamId>,
    last_event_time: Timestamp,
}

impl TestSnapshotBuilder {
    pub fn new() -> Self {
        Self {
            remote_id: RemoteConversationId::generate(),
            name: Some("Test Conversation".to_string()),
            members: HashSet::new(),
            access: AccessPolicy::Private,
            team: None,
            last_event_time: Timestamp::from_millis(1_000),
        }
    }

    pub fn with_remote_id(mut self, remote_id: RemoteConversationId) -> Self {
        self.remote_id = remote_id;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_member(mut self, user: UserId) -> Self {
        self.members.insert(user);
        self
    }

    pub fn with_access(mut self, access: AccessPolicy) -> Self {
        self.access = access;
        self
    }

    pub fn with_team(mut self, team: TeamId) -> Self {
        self.team = Some(team);
        self
    }

    pub fn with_last_event_time(mut self, ts: Timestamp) -> Self {
        self.last_event_time = ts;
        self
    }

    pub fn build(self) -> ConversationSnapshot {
        let mut snapshot = ConversationSnapshot::new(self.remote_id);
        snapshot.name = self.name;
        snapshot.members = self.members;
        snapshot.access = self.access;
        snapshot.team = self.team;
        snapshot.last_event_time = self.last_event_time;
        snapshot
    }
}

impl Default for TestSnapshotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for test conversation records
pub struct TestRecordBuilder {
    id: ConversationId,
    remote_id: Option<RemoteConversationId>,
    name: Option<String>,
    members: HashSet<UserId>,
    last_event_time: Timestamp,
}

impl TestRecordBuilder {
    pub fn new() -> Self {
        Self {
            id: ConversationId::generate(),
            remote_id: Some(RemoteConversationId::generate()),
            name: Some("Test Conversation".to_string()),
            members: HashSet::new(),
            last_event_time: Timestamp::from_millis(1_000),
        }
    }

    pub fn with_id(mut self, id: ConversationId) -> Self {
        self.id = id;
        self
    }

    pub fn with_remote_id(mut self, remote_id: Option<RemoteConversationId>) -> Self {
        self.remote_id = remote_id;
        self
    }

    pub fn with_member(mut self, user: UserId) -> Self {
        self.members.insert(user);
        self
    }

    pub fn with_last_event_time(mut self, ts: Timestamp) -> Self {
        self.last_event_time = ts;
        self
    }

    pub fn build(self) -> ConversationRecord {
        ConversationRecord {
            id: self.id,
            remote_id: self.remote_id,
            name: self.name,
            members: self.members,
            access: AccessPolicy::Private,
            team: None,
            archived: false,
            archive_ref_time: None,
            mute_state: MuteState::None,
            mute_ref_time: None,
            last_event_time: self.last_event_time,
            join_link: None,
        }
    }
}

impl Default for TestRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}
