/*
    event.rs - Remote-originated events

    A RemoteEvent is a timestamped fact describing a state change the remote
    service acknowledged (rename, member join/leave, conversation start).
    The sync core creates it from a successful mutation response, stamps its
    local time, and hands it to the event sink which sequences it into
    history.
*/

use super::types::{RemoteConversationId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

/// What happened, as reported by the remote service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventPayload {
    /// Conversation was renamed
    Renamed { name: String },

    /// Users were added to the member set
    MembersJoined { users: Vec<UserId> },

    /// A user left or was removed
    MemberLeft { user: UserId },

    /// Conversation became visible to this account
    ConversationStarted { by: Option<UserId> },
}

/// A timestamped fact acknowledged by the remote service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteEvent {
    /// Conversation the event belongs to
    pub conversation: RemoteConversationId,

    /// The change itself
    pub payload: EventPayload,

    /// Time the remote service recorded the event
    pub server_time: Timestamp,

    /// Time this replica accepted the event; stamped by the sync core
    /// before the event reaches the sink
    pub local_time: Option<Timestamp>,
}

impl RemoteEvent {
    pub fn new(
        conversation: RemoteConversationId,
        payload: EventPayload,
        server_time: Timestamp,
    ) -> Self {
        RemoteEvent {
            conversation,
            payload,
            server_time,
            local_time: None,
        }
    }

    /// Stamp the local acceptance time
    pub fn stamp_local_time(&mut self, now: Timestamp) {
        self.local_time = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_event_has_no_local_time() {
        let event = RemoteEvent::new(
            RemoteConversationId::new("c".to_string()),
            EventPayload::Renamed {
                name: "general".to_string(),
            },
            Timestamp::from_millis(10),
        );
        assert_eq!(event.local_time, None);
    }

    #[test]
    fn test_stamp_local_time() {
        let mut event = RemoteEvent::new(
            RemoteConversationId::new("c".to_string()),
            EventPayload::MemberLeft {
                user: UserId::new("u1".to_string()),
            },
            Timestamp::from_millis(10),
        );
        event.stamp_local_time(Timestamp::from_millis(99));
        assert_eq!(event.local_time, Some(Timestamp::from_millis(99)));
        assert_eq!(event.server_time, Timestamp::from_millis(10));
    }
}
