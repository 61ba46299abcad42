//! Conversation Sync Manager - orchestrator for conversation metadata sync
//!
//! This module coordinates the remote client, local store, event sink and
//! domain error reporter to reconcile the local conversation replica with
//! the authoritative remote service.
//!
//! # Responsibilities
//!
//! - **Catalog sync**: full and targeted pull of remote conversation state
//! - **Mutations**: rename, member add/remove, archival/mute state, create
//! - **Link fetch**: join-link retrieval and local persistence
//! - **Outcome mapping**: every operation terminates in exactly one
//!   [`SyncResult`]; local faults downgrade to `Retry`, remote rejections
//!   to `Failure`
//!
//! The manager holds no mutable shared state and is safe to invoke
//! concurrently for different conversations. The local store only ever
//! reflects facts the remote service has acknowledged.

use crate::{
    config::SyncConfig,
    core_conversation::{
        AccessPolicy, ConversationId, ConversationRecord, ConversationStateUpdate,
        CreateConversationRequest, RemoteConversationId, RemoteEvent, TeamId, Timestamp, UserId,
    },
    core_sync::{
        batching::{partition_members, split_at_limit},
        catalog::run_catalog_sync,
        errors::{ErrorLabel, RemoteError},
        result::SyncResult,
        traits::{
            ConversationApi, ConversationStore, DomainErrorReport, DomainErrorReporter, EventSink,
        },
    },
};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Orchestrates conversation metadata synchronization
pub struct ConversationSyncManager {
    /// Remote conversation service client
    api: Arc<dyn ConversationApi>,

    /// Local conversation store
    store: Arc<dyn ConversationStore>,

    /// Sink applying acknowledged events to local history
    events: Arc<dyn EventSink>,

    /// Side channel for UI-facing domain errors
    reporter: Arc<dyn DomainErrorReporter>,

    /// The acting account; removing this user is a self-leave
    self_user: UserId,

    /// Configuration
    config: SyncConfig,
}

impl ConversationSyncManager {
    /// Create a new sync manager
    pub fn new(
        api: Arc<dyn ConversationApi>,
        store: Arc<dyn ConversationStore>,
        events: Arc<dyn EventSink>,
        reporter: Arc<dyn DomainErrorReporter>,
        self_user: UserId,
        config: SyncConfig,
    ) -> Self {
        info!(user_id = %self_user, "Creating ConversationSyncManager");
        Self {
            api,
            store,
            events,
            reporter,
            self_user,
            config,
        }
    }

    /// The acting account's user id
    pub fn self_user(&self) -> &UserId {
        &self.self_user
    }

    /// Sync the remote conversation catalog, resuming after `cursor` when
    /// one is given
    ///
    /// Pages are fetched until the remote reports no further pages; each
    /// page's local apply runs detached so it overlaps the next fetch.
    /// A transport failure stops the sync and yields `Failure`.
    pub async fn sync_catalog(&self, cursor: Option<RemoteConversationId>) -> SyncResult {
        info!(resumed = cursor.is_some(), "Starting catalog sync");
        run_catalog_sync(&self.api, &self.store, cursor).await
    }

    /// Sync a specific set of conversations by local id
    ///
    /// Ids that do not resolve locally are logged and skipped; only a
    /// failure of the remote fetch itself fails the operation.
    pub async fn sync_conversations(&self, ids: &[ConversationId]) -> SyncResult {
        let mut remote_ids = Vec::with_capacity(ids.len());
        for id in ids {
            match self.store.get_conversation(id).await {
                Ok(Some(record)) => match record.remote_id {
                    Some(remote) => remote_ids.push(remote),
                    None => {
                        warn!(conversation = %id, "skipping conversation without remote id")
                    }
                },
                Ok(None) => {
                    warn!(conversation = %id, "skipping unknown conversation in targeted sync")
                }
                Err(err) => {
                    warn!(conversation = %id, error = %err, "conversation lookup failed")
                }
            }
        }

        if remote_ids.is_empty() {
            debug!("no conversations resolved for targeted sync");
            return SyncResult::success();
        }

        let snapshots = match self.api.load_by_remote_ids(&remote_ids).await {
            Ok(snapshots) => snapshots,
            Err(err) => {
                warn!(error = %err, "targeted catalog fetch failed");
                return SyncResult::failure(err);
            }
        };

        debug!(count = snapshots.len(), "applying targeted snapshots");
        match self.store.apply_snapshots(snapshots).await {
            Ok(()) => SyncResult::success(),
            Err(err) => SyncResult::retry(format!("snapshot apply failed: {}", err)),
        }
    }

    /// Rename a conversation
    pub async fn rename(&self, id: &ConversationId, name: &str) -> SyncResult {
        let (_, remote_id) = match self.resolve(id).await {
            Ok(resolved) => resolved,
            Err(result) => return result,
        };

        debug!(conversation = %id, name = %name, "posting rename");
        let response = self.api.post_rename(&remote_id, name).await;
        self.handle_event_response(response).await
    }

    /// Add members to a conversation
    ///
    /// Users are partitioned at the member batch limit and all batches are
    /// dispatched concurrently; every batch runs to completion regardless
    /// of sibling outcomes. The overall result is `Success` only if every
    /// batch succeeded, otherwise the first non-success in submission
    /// order.
    pub async fn add_members(&self, id: &ConversationId, users: &[UserId]) -> SyncResult {
        let (_, remote_id) = match self.resolve(id).await {
            Ok(resolved) => resolved,
            Err(result) => return result,
        };

        if users.is_empty() {
            return SyncResult::success();
        }

        let batches = partition_members(users, self.config.member_batch_limit);
        info!(
            conversation = %id,
            users = users.len(),
            batches = batches.len(),
            "adding members"
        );

        let outcomes = join_all(
            batches
                .iter()
                .map(|batch| self.add_member_batch(id, &remote_id, batch)),
        )
        .await;

        outcomes
            .into_iter()
            .find(|outcome| !outcome.is_success())
            .unwrap_or(SyncResult::Success)
    }

    /// Submit one member batch and classify its response
    async fn add_member_batch(
        &self,
        id: &ConversationId,
        remote_id: &RemoteConversationId,
        batch: &[UserId],
    ) -> SyncResult {
        match self.api.post_member_join(remote_id, batch).await {
            Ok(event) => self.handle_event_response(Ok(event)).await,
            Err(err) => {
                if err.is_forbidden() {
                    match err.label {
                        Some(ErrorLabel::NotConnected) => {
                            self.reporter
                                .report(DomainErrorReport::UnconnectedUsers {
                                    conversation: id.clone(),
                                    users: batch.to_vec(),
                                    error: err.clone(),
                                })
                                .await;
                        }
                        Some(ErrorLabel::TooManyMembers) => {
                            self.reporter
                                .report(DomainErrorReport::ConversationFull {
                                    conversation: id.clone(),
                                    users: batch.to_vec(),
                                    error: err.clone(),
                                })
                                .await;
                        }
                        _ => {}
                    }
                }
                warn!(conversation = %id, error = %err, "member batch rejected");
                SyncResult::failure(err)
            }
        }
    }

    /// Remove a member from a conversation
    ///
    /// Removing the acting account itself additionally archives the
    /// conversation; see [`Self::leave_conversation`].
    pub async fn remove_member(&self, id: &ConversationId, user: &UserId) -> SyncResult {
        let (record, remote_id) = match self.resolve(id).await {
            Ok(resolved) => resolved,
            Err(result) => return result,
        };

        if user == &self.self_user {
            return self.leave_conversation(id, &record, &remote_id).await;
        }

        debug!(conversation = %id, user = %user, "removing member");
        let response = self.api.post_member_leave(&remote_id, user).await;
        self.handle_event_response(response).await
    }

    /// Leave a conversation as the acting account
    ///
    /// On a leave event, the conversation is archived as of the event's
    /// time and the event is applied to history. When the remote reports
    /// the account already gone, only the archival state is posted, using
    /// the record's last known event time.
    async fn leave_conversation(
        &self,
        id: &ConversationId,
        record: &ConversationRecord,
        remote_id: &RemoteConversationId,
    ) -> SyncResult {
        info!(conversation = %id, "leaving conversation");
        match self.api.post_member_leave(remote_id, &self.self_user).await {
            Ok(Some(mut event)) => {
                event.stamp_local_time(Timestamp::now());
                let state = ConversationStateUpdate::archived(event.server_time);
                match self.api.post_conversation_state(remote_id, &state).await {
                    Ok(()) => match self.events.apply_event(event).await {
                        Ok(()) => SyncResult::success(),
                        Err(err) => {
                            SyncResult::retry(format!("leave event apply failed: {}", err))
                        }
                    },
                    Err(err) => SyncResult::failure(err),
                }
            }
            Ok(None) => {
                // Already left remotely; archive at the last event known to
                // this replica, no event to apply.
                let state = ConversationStateUpdate::archived(record.last_event_time);
                match self.api.post_conversation_state(remote_id, &state).await {
                    Ok(()) => SyncResult::success(),
                    Err(err) => SyncResult::failure(err),
                }
            }
            Err(err) => {
                warn!(conversation = %id, error = %err, "leave rejected");
                SyncResult::failure(err)
            }
        }
    }

    /// Update a conversation's archival/mute state
    ///
    /// The state endpoint is fire-and-forget: the raw response maps
    /// directly to the result and no event is applied.
    pub async fn update_state(
        &self,
        id: &ConversationId,
        state: &ConversationStateUpdate,
    ) -> SyncResult {
        let (_, remote_id) = match self.resolve(id).await {
            Ok(resolved) => resolved,
            Err(result) => return result,
        };

        debug!(conversation = %id, archived = state.archived, "posting conversation state");
        match self.api.post_conversation_state(&remote_id, state).await {
            Ok(()) => SyncResult::success(),
            Err(err) => SyncResult::failure(err),
        }
    }

    /// Create a conversation
    ///
    /// Members beyond the batch limit are split off and added through
    /// [`Self::add_members`] after creation; the overall result is the
    /// chained call's result when an overflow exists.
    pub async fn create_conversation(
        &self,
        users: &[UserId],
        name: Option<String>,
        team: Option<TeamId>,
        access: AccessPolicy,
    ) -> SyncResult {
        let (initial, overflow) = split_at_limit(users, self.config.member_batch_limit);
        info!(
            users = users.len(),
            overflow = overflow.len(),
            "creating conversation"
        );

        let request = CreateConversationRequest {
            users: initial,
            name,
            team,
            access,
        };

        let snapshot = match self.api.post_create_conversation(request).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                if err.is_forbidden() && err.label == Some(ErrorLabel::NotConnected) {
                    self.reporter
                        .report(DomainErrorReport::UnconnectedUsersInNewConversation {
                            users: users.to_vec(),
                            error: err.clone(),
                        })
                        .await;
                }
                warn!(error = %err, "conversation creation rejected");
                return SyncResult::failure(err);
            }
        };

        let local_id = match self.store.apply_new_conversation(snapshot).await {
            Ok(local_id) => local_id,
            Err(err) => {
                return SyncResult::retry(format!("created conversation apply failed: {}", err))
            }
        };
        debug!(conversation = %local_id, "created conversation applied locally");

        if overflow.is_empty() {
            SyncResult::success()
        } else {
            self.add_members(&local_id, &overflow).await
        }
    }

    /// Fetch a conversation's join link and persist it locally
    ///
    /// Link lookups are safe to retry; every fault in this flow, remote or
    /// local, downgrades to `Retry`.
    pub async fn fetch_join_link(&self, id: &ConversationId) -> SyncResult {
        let (_, remote_id) = match self.resolve(id).await {
            Ok(resolved) => resolved,
            Err(result) => return result,
        };

        match self.api.get_join_link(&remote_id).await {
            Ok(Some(link)) => match self.store.set_join_link(id, link).await {
                Ok(()) => SyncResult::success(),
                Err(err) => SyncResult::retry(format!("join link persist failed: {}", err)),
            },
            Ok(None) => SyncResult::success(),
            Err(err) => SyncResult::retry(format!("join link fetch failed: {}", err)),
        }
    }

    /// Resolve a local id to its record and remote id
    ///
    /// A lookup miss, a record without a remote id, or a store fault all
    /// short-circuit the operation with `Retry` before any remote call.
    async fn resolve(
        &self,
        id: &ConversationId,
    ) -> Result<(ConversationRecord, RemoteConversationId), SyncResult> {
        match self.store.get_conversation(id).await {
            Ok(Some(record)) => match record.remote_id.clone() {
                Some(remote_id) => Ok((record, remote_id)),
                None => {
                    debug!(conversation = %id, "record has no remote id yet");
                    Err(SyncResult::retry(format!(
                        "no conversation found for id {}",
                        id
                    )))
                }
            },
            Ok(None) => {
                debug!(conversation = %id, "no local record");
                Err(SyncResult::retry(format!(
                    "no conversation found for id {}",
                    id
                )))
            }
            Err(err) => {
                warn!(conversation = %id, error = %err, "conversation lookup failed");
                Err(SyncResult::retry(format!(
                    "conversation lookup failed: {}",
                    err
                )))
            }
        }
    }

    /// Shared handler for mutation responses carrying an optional event
    ///
    /// Success with an event stamps the event's local time to now and
    /// applies it through the sink; success without one is a no-op apply;
    /// a remote error becomes `Failure`.
    async fn handle_event_response(
        &self,
        response: Result<Option<RemoteEvent>, RemoteError>,
    ) -> SyncResult {
        match response {
            Ok(Some(mut event)) => {
                event.stamp_local_time(Timestamp::now());
                match self.events.apply_event(event).await {
                    Ok(()) => SyncResult::success(),
                    Err(err) => SyncResult::retry(format!("event apply failed: {}", err)),
                }
            }
            Ok(None) => SyncResult::success(),
            Err(err) => SyncResult::failure(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_conversation::{EventPayload, JoinLink};
    use crate::core_sync::store::MemoryConversationStore;
    use crate::test_utils::{
        ApiCall, MockConversationApi, MockDomainErrorReporter, MockEventSink, TestRecordBuilder,
    };

    struct TestHarness {
        manager: ConversationSyncManager,
        api: Arc<MockConversationApi>,
        store: Arc<MemoryConversationStore>,
        sink: Arc<MockEventSink>,
        reporter: Arc<MockDomainErrorReporter>,
    }

    fn create_test_manager(self_user: UserId) -> TestHarness {
        let api = Arc::new(MockConversationApi::new());
        let store = Arc::new(MemoryConversationStore::new());
        let sink = Arc::new(MockEventSink::new());
        let reporter = Arc::new(MockDomainErrorReporter::new());
        let manager = ConversationSyncManager::new(
            api.clone(),
            store.clone(),
            sink.clone(),
            reporter.clone(),
            self_user,
            SyncConfig::default(),
        );
        TestHarness {
            manager,
            api,
            store,
            sink,
            reporter,
        }
    }

    async fn seed_conversation(harness: &TestHarness) -> (ConversationId, RemoteConversationId) {
        let record = TestRecordBuilder::new().build();
        let id = record.id.clone();
        let remote_id = record.remote_id.clone().unwrap();
        harness.store.insert_record(record).await;
        (id, remote_id)
    }

    #[tokio::test]
    async fn test_rename_applies_stamped_event() {
        let harness = create_test_manager(UserId::generate());
        let (id, remote_id) = seed_conversation(&harness).await;

        harness.api.push_rename_response(Ok(Some(RemoteEvent::new(
            remote_id.clone(),
            EventPayload::Renamed {
                name: "retro".to_string(),
            },
            Timestamp::from_millis(1_000),
        ))));

        let result = harness.manager.rename(&id, "retro").await;
        assert!(result.is_success());

        let applied = harness.sink.applied_events();
        assert_eq!(applied.len(), 1);
        assert!(applied[0].local_time.is_some());
        assert_eq!(applied[0].server_time, Timestamp::from_millis(1_000));
    }

    #[tokio::test]
    async fn test_rename_unknown_conversation_issues_no_remote_calls() {
        let harness = create_test_manager(UserId::generate());
        let result = harness
            .manager
            .rename(&ConversationId::generate(), "retro")
            .await;
        assert!(result.is_retry());
        assert!(harness.api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_rename_remote_error_is_failure() {
        let harness = create_test_manager(UserId::generate());
        let (id, _) = seed_conversation(&harness).await;

        harness
            .api
            .push_rename_response(Err(RemoteError::new(400, "name too long")));
        let result = harness.manager.rename(&id, "x".repeat(300).as_str()).await;
        assert!(result.is_failure());
        assert!(harness.sink.applied_events().is_empty());
    }

    #[tokio::test]
    async fn test_add_members_splits_at_batch_limit() {
        let harness = create_test_manager(UserId::generate());
        let (id, _) = seed_conversation(&harness).await;

        let users: Vec<UserId> = (0..300).map(|i| UserId::new(format!("u{}", i))).collect();
        let result = harness.manager.add_members(&id, &users).await;
        assert!(result.is_success());

        let joins: Vec<Vec<UserId>> = harness
            .api
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                ApiCall::MemberJoin { users, .. } => Some(users),
                _ => None,
            })
            .collect();
        assert_eq!(joins.len(), 2);
        assert_eq!(joins[0].len(), 256);
        assert_eq!(joins[1].len(), 44);
    }

    #[tokio::test]
    async fn test_add_members_first_batch_failure_wins() {
        let harness = create_test_manager(UserId::generate());
        let (id, _) = seed_conversation(&harness).await;

        harness
            .api
            .push_member_join_response(Err(RemoteError::new(500, "first batch broke")));
        harness.api.push_member_join_response(Ok(None));

        let users: Vec<UserId> = (0..300).map(|i| UserId::new(format!("u{}", i))).collect();
        let result = harness.manager.add_members(&id, &users).await;

        // Both batches were still submitted.
        let join_count = harness
            .api
            .calls()
            .iter()
            .filter(|call| matches!(call, ApiCall::MemberJoin { .. }))
            .count();
        assert_eq!(join_count, 2);

        match result {
            SyncResult::Failure(failure) => assert!(failure.message.contains("first batch")),
            other => panic!("expected failure, got {}", other),
        }
    }

    #[tokio::test]
    async fn test_add_members_not_connected_reports_domain_error() {
        let harness = create_test_manager(UserId::generate());
        let (id, _) = seed_conversation(&harness).await;

        harness.api.push_member_join_response(Err(RemoteError::new(
            403,
            "unknown connection",
        )
        .with_label(ErrorLabel::NotConnected)));

        let users = vec![UserId::new("stranger".to_string())];
        let result = harness.manager.add_members(&id, &users).await;
        assert!(result.is_failure());

        let reports = harness.reporter.reports();
        assert_eq!(reports.len(), 1);
        match &reports[0] {
            DomainErrorReport::UnconnectedUsers {
                conversation,
                users: reported,
                ..
            } => {
                assert_eq!(conversation, &id);
                assert_eq!(reported, &users);
            }
            other => panic!("unexpected report: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_add_members_unclassified_403_reports_nothing() {
        let harness = create_test_manager(UserId::generate());
        let (id, _) = seed_conversation(&harness).await;

        harness.api.push_member_join_response(Err(RemoteError::new(403, "no access")
            .with_label(ErrorLabel::Other("no-team".to_string()))));

        let result = harness
            .manager
            .add_members(&id, &[UserId::generate()])
            .await;
        assert!(result.is_failure());
        assert!(harness.reporter.reports().is_empty());
    }

    #[tokio::test]
    async fn test_remove_other_member_applies_event() {
        let harness = create_test_manager(UserId::new("me".to_string()));
        let (id, remote_id) = seed_conversation(&harness).await;
        let target = UserId::new("them".to_string());

        harness
            .api
            .push_member_leave_response(Ok(Some(RemoteEvent::new(
                remote_id,
                EventPayload::MemberLeft {
                    user: target.clone(),
                },
                Timestamp::from_millis(7_000),
            ))));

        let result = harness.manager.remove_member(&id, &target).await;
        assert!(result.is_success());
        assert_eq!(harness.sink.applied_events().len(), 1);
        // No archival posted when removing someone else.
        assert!(!harness
            .api
            .calls()
            .iter()
            .any(|call| matches!(call, ApiCall::ConversationState { .. })));
    }

    #[tokio::test]
    async fn test_self_leave_archives_at_event_time() {
        let me = UserId::new("me".to_string());
        let harness = create_test_manager(me.clone());
        let (id, remote_id) = seed_conversation(&harness).await;

        harness
            .api
            .push_member_leave_response(Ok(Some(RemoteEvent::new(
                remote_id,
                EventPayload::MemberLeft { user: me.clone() },
                Timestamp::from_millis(9_000),
            ))));

        let result = harness.manager.remove_member(&id, &me).await;
        assert!(result.is_success());

        let state = harness
            .api
            .calls()
            .into_iter()
            .find_map(|call| match call {
                ApiCall::ConversationState { state, .. } => Some(state),
                _ => None,
            })
            .expect("state update posted");
        assert!(state.archived);
        assert_eq!(state.archive_ref_time, Timestamp::from_millis(9_000));
        assert_eq!(harness.sink.applied_events().len(), 1);
    }

    #[tokio::test]
    async fn test_self_leave_already_left_uses_last_event_time() {
        let me = UserId::new("me".to_string());
        let harness = create_test_manager(me.clone());

        let record = TestRecordBuilder::new()
            .with_last_event_time(Timestamp::from_millis(4_200))
            .build();
        let id = record.id.clone();
        harness.store.insert_record(record).await;

        harness.api.push_member_leave_response(Ok(None));

        let result = harness.manager.remove_member(&id, &me).await;
        assert!(result.is_success());

        let state = harness
            .api
            .calls()
            .into_iter()
            .find_map(|call| match call {
                ApiCall::ConversationState { state, .. } => Some(state),
                _ => None,
            })
            .expect("state update posted");
        assert_eq!(state.archive_ref_time, Timestamp::from_millis(4_200));
        // No event application on the already-left path.
        assert!(harness.sink.applied_events().is_empty());
    }

    #[tokio::test]
    async fn test_self_leave_state_update_failure_is_failure() {
        let me = UserId::new("me".to_string());
        let harness = create_test_manager(me.clone());
        let (id, remote_id) = seed_conversation(&harness).await;

        harness
            .api
            .push_member_leave_response(Ok(Some(RemoteEvent::new(
                remote_id,
                EventPayload::MemberLeft { user: me.clone() },
                Timestamp::from_millis(9_000),
            ))));
        harness
            .api
            .push_state_response(Err(RemoteError::new(500, "state write failed")));

        let result = harness.manager.remove_member(&id, &me).await;
        assert!(result.is_failure());
        assert!(harness.sink.applied_events().is_empty());
    }

    #[tokio::test]
    async fn test_update_state_maps_response_directly() {
        let harness = create_test_manager(UserId::generate());
        let (id, _) = seed_conversation(&harness).await;

        let state = ConversationStateUpdate::archived(Timestamp::from_millis(1));
        assert!(harness.manager.update_state(&id, &state).await.is_success());
        assert!(harness.sink.applied_events().is_empty());

        harness
            .api
            .push_state_response(Err(RemoteError::new(400, "bad state")));
        assert!(harness.manager.update_state(&id, &state).await.is_failure());
    }

    #[tokio::test]
    async fn test_create_with_overflow_chains_add_members() {
        let harness = create_test_manager(UserId::generate());

        let users: Vec<UserId> = (0..300).map(|i| UserId::new(format!("u{}", i))).collect();
        let result = harness
            .manager
            .create_conversation(&users, Some("big room".to_string()), None, AccessPolicy::Team)
            .await;
        assert!(result.is_success());

        let calls = harness.api.calls();
        let create_users = calls
            .iter()
            .find_map(|call| match call {
                ApiCall::CreateConversation { request } => Some(request.users.clone()),
                _ => None,
            })
            .expect("create call issued");
        assert_eq!(create_users.len(), 256);

        let joined: Vec<Vec<UserId>> = calls
            .into_iter()
            .filter_map(|call| match call {
                ApiCall::MemberJoin { users, .. } => Some(users),
                _ => None,
            })
            .collect();
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].len(), 44);
    }

    #[tokio::test]
    async fn test_create_overall_result_is_chained_result() {
        let harness = create_test_manager(UserId::generate());

        harness
            .api
            .push_member_join_response(Err(RemoteError::new(500, "join broke")));

        let users: Vec<UserId> = (0..300).map(|i| UserId::new(format!("u{}", i))).collect();
        let result = harness
            .manager
            .create_conversation(&users, None, None, AccessPolicy::Private)
            .await;
        assert!(result.is_failure());
    }

    #[tokio::test]
    async fn test_create_not_connected_reports_domain_error() {
        let harness = create_test_manager(UserId::generate());

        harness.api.push_create_response(Err(RemoteError::new(
            403,
            "unknown connection",
        )
        .with_label(ErrorLabel::NotConnected)));

        let users = vec![UserId::new("stranger".to_string())];
        let result = harness
            .manager
            .create_conversation(&users, None, None, AccessPolicy::Private)
            .await;
        assert!(result.is_failure());

        let reports = harness.reporter.reports();
        assert_eq!(reports.len(), 1);
        assert!(matches!(
            reports[0],
            DomainErrorReport::UnconnectedUsersInNewConversation { .. }
        ));
    }

    #[tokio::test]
    async fn test_fetch_join_link_persists_link() {
        let harness = create_test_manager(UserId::generate());
        let (id, _) = seed_conversation(&harness).await;

        harness
            .api
            .push_join_link_response(Ok(Some(JoinLink::new("https://x/j/1".to_string()))));

        let result = harness.manager.fetch_join_link(&id).await;
        assert!(result.is_success());

        let record = harness
            .store
            .get_conversation(&id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.join_link, Some(JoinLink::new("https://x/j/1".to_string())));
    }

    #[tokio::test]
    async fn test_fetch_join_link_remote_error_is_retry() {
        let harness = create_test_manager(UserId::generate());
        let (id, _) = seed_conversation(&harness).await;

        harness
            .api
            .push_join_link_response(Err(RemoteError::new(500, "link service down")));

        let result = harness.manager.fetch_join_link(&id).await;
        assert!(result.is_retry());
    }
}
