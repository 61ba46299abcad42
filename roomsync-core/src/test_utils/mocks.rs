//! Recording mock collaborators
//!
//! Mocks record every call and replay scripted responses per endpoint.
//! When an endpoint's queue is empty, a benign default is returned so
//! tests only script the responses they care about.

use crate::core_conversation::{
    CatalogPage, ConversationSnapshot, ConversationStateUpdate, CreateConversationRequest,
    JoinLink, RemoteConversationId, RemoteEvent, UserId,
};
use crate::core_sync::errors::{RemoteError, StoreError, StoreResult, TransportError};
use crate::core_sync::traits::{
    ConversationApi, DomainErrorReport, DomainErrorReporter, EventSink,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// One recorded call against the mock remote API
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    CatalogPage {
        cursor: Option<RemoteConversationId>,
    },
    LoadByRemoteIds {
        ids: Vec<RemoteConversationId>,
    },
    Rename {
        remote_id: RemoteConversationId,
        name: String,
    },
    MemberJoin {
        remote_id: RemoteConversationId,
        users: Vec<UserId>,
    },
    MemberLeave {
        remote_id: RemoteConversationId,
        user: UserId,
    },
    ConversationState {
        remote_id: RemoteConversationId,
        state: ConversationStateUpdate,
    },
    CreateConversation {
        request: CreateConversationRequest,
    },
    JoinLink {
        remote_id: RemoteConversationId,
    },
}

/// Recording mock for [`ConversationApi`]
pub struct MockConversationApi {
    calls: Mutex<Vec<ApiCall>>,
    catalog_responses: Mutex<VecDeque<Result<CatalogPage, TransportError>>>,
    by_ids_responses: Mutex<VecDeque<Result<Vec<ConversationSnapshot>, TransportError>>>,
    rename_responses: Mutex<VecDeque<Result<Option<RemoteEvent>, RemoteError>>>,
    member_join_responses: Mutex<VecDeque<Result<Option<RemoteEvent>, RemoteError>>>,
    member_leave_responses: Mutex<VecDeque<Result<Option<RemoteEvent>, RemoteError>>>,
    state_responses: Mutex<VecDeque<Result<(), RemoteError>>>,
    create_responses: Mutex<VecDeque<Result<ConversationSnapshot, RemoteError>>>,
    join_link_responses: Mutex<VecDeque<Result<Option<JoinLink>, RemoteError>>>,
}

impl MockConversationApi {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            catalog_responses: Mutex::new(VecDeque::new()),
            by_ids_responses: Mutex::new(VecDeque::new()),
            rename_responses: Mutex::new(VecDeque::new()),
            member_join_responses: Mutex::new(VecDeque::new()),
            member_leave_responses: Mutex::new(VecDeque::new()),
            state_responses: Mutex::new(VecDeque::new()),
            create_responses: Mutex::new(VecDeque::new()),
            join_link_responses: Mutex::new(VecDeque::new()),
        }
    }

    /// All calls recorded so far, in submission order
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn push_catalog_page(&self, response: Result<CatalogPage, TransportError>) {
        self.catalog_responses.lock().unwrap().push_back(response);
    }

    pub fn push_by_ids_response(
        &self,
        response: Result<Vec<ConversationSnapshot>, TransportError>,
    ) {
        self.by_ids_responses.lock().unwrap().push_back(response);
    }

    pub fn push_rename_response(&self, response: Result<Option<RemoteEvent>, RemoteError>) {
        self.rename_responses.lock().unwrap().push_back(response);
    }

    pub fn push_member_join_response(&self, response: Result<Option<RemoteEvent>, RemoteError>) {
        self.member_join_responses.lock().unwrap().push_back(response);
    }

    pub fn push_member_leave_response(&self, response: Result<Option<RemoteEvent>, RemoteError>) {
        self.member_leave_responses.lock().unwrap().push_back(response);
    }

    pub fn push_state_response(&self, response: Result<(), RemoteError>) {
        self.state_responses.lock().unwrap().push_back(response);
    }

    pub fn push_create_response(&self, response: Result<ConversationSnapshot, RemoteError>) {
        self.create_responses.lock().unwrap().push_back(response);
    }

    pub fn push_join_link_response(&self, response: Result<Option<JoinLink>, RemoteError>) {
        self.join_link_responses.lock().unwrap().push_back(response);
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Default for MockConversationApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConversationApi for MockConversationApi {
    async fn load_catalog_page(
        &self,
        cursor: Option<&RemoteConversationId>,
    ) -> Result<CatalogPage, TransportError> {
        self.record(ApiCall::CatalogPage {
            cursor: cursor.cloned(),
        });
        self.catalog_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(CatalogPage::new(vec![], false)))
    }

    async fn load_by_remote_ids(
        &self,
        ids: &[RemoteConversationId],
    ) -> Result<Vec<ConversationSnapshot>, TransportError> {
        self.record(ApiCall::LoadByRemoteIds { ids: ids.to_vec() });
        self.by_ids_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(vec![]))
    }

    async fn post_rename(
        &self,
        remote_id: &RemoteConversationId,
        name: &str,
    ) -> Result<Option<RemoteEvent>, RemoteError> {
        self.record(ApiCall::Rename {
            remote_id: remote_id.clone(),
            name: name.to_string(),
        });
        self.rename_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(None))
    }

    async fn post_member_join(
        &self,
        remote_id: &RemoteConversationId,
        users: &[UserId],
    ) -> Result<Option<RemoteEvent>, RemoteError> {
        self.record(ApiCall::MemberJoin {
            remote_id: remote_id.clone(),
            users: users.to_vec(),
        });
        self.member_join_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(None))
    }

    async fn post_member_leave(
        &self,
        remote_id: &RemoteConversationId,
        user: &UserId,
    ) -> Result<Option<RemoteEvent>, RemoteError> {
        self.record(ApiCall::MemberLeave {
            remote_id: remote_id.clone(),
            user: user.clone(),
        });
        self.member_leave_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(None))
    }

    async fn post_conversation_state(
        &self,
        remote_id: &RemoteConversationId,
        state: &ConversationStateUpdate,
    ) -> Result<(), RemoteError> {
        self.record(ApiCall::ConversationState {
            remote_id: remote_id.clone(),
            state: state.clone(),
        });
        self.state_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()))
    }

    async fn post_create_conversation(
        &self,
        request: CreateConversationRequest,
    ) -> Result<ConversationSnapshot, RemoteError> {
        self.record(ApiCall::CreateConversation {
            request: request.clone(),
        });
        self.create_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                // Default: echo the request back as a fresh snapshot.
                let mut snapshot = ConversationSnapshot::new(RemoteConversationId::generate());
                snapshot.name = request.name.clone();
                snapshot.members = request.users.iter().cloned().collect();
                snapshot.team = request.team.clone();
                snapshot.access = request.access;
                Ok(snapshot)
            })
    }

    async fn get_join_link(
        &self,
        remote_id: &RemoteConversationId,
    ) -> Result<Option<JoinLink>, RemoteError> {
        self.record(ApiCall::JoinLink {
            remote_id: remote_id.clone(),
        });
        self.join_link_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(None))
    }
}

/// Recording mock for [`EventSink`]
pub struct MockEventSink {
    applied: Mutex<Vec<RemoteEvent>>,
    failure: Mutex<Option<StoreError>>,
}

impl MockEventSink {
    pub fn new() -> Self {
        Self {
            applied: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
        }
    }

    /// Make every subsequent apply fail with `error`
    pub fn fail_with(&self, error: StoreError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    /// Events applied so far, in application order
    pub fn applied_events(&self) -> Vec<RemoteEvent> {
        self.applied.lock().unwrap().clone()
    }
}

impl Default for MockEventSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventSink for MockEventSink {
    async fn apply_event(&self, event: RemoteEvent) -> StoreResult<()> {
        if let Some(error) = self.failure.lock().unwrap().clone() {
            return Err(error);
        }
        self.applied.lock().unwrap().push(event);
        Ok(())
    }
}

/// Recording mock for [`DomainErrorReporter`]
pub struct MockDomainErrorReporter {
    reports: Mutex<Vec<DomainErrorReport>>,
}

impl MockDomainErrorReporter {
    pub fn new() -> Self {
        Self {
            reports: Mutex::new(Vec::new()),
        }
    }

    pub fn reports(&self) -> Vec<DomainErrorReport> {
        self.reports.lock().unwrap().clone()
    }
}

impl Default for MockDomainErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DomainErrorReporter for MockDomainErrorReporter {
    async fn report(&self, report: DomainErrorReport) {
        self.reports.lock().unwrap().push(report);
    }
}
