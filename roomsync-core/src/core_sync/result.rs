//! Tri-state outcome type for sync operations
//!
//! Every orchestrator operation produces exactly one `SyncResult`. Faults
//! never escape as panics or raw errors; they are mapped into the
//! `Failure` (permanent) or `Retry` (transient) variants.

use super::errors::{RemoteError, TransportError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification code carried by a permanent failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureCode {
    /// Remote service rejected the request with this HTTP status
    Remote(u16),
    /// Transport-level fault (connectivity, protocol, timeout)
    Transport,
}

/// Permanent, non-retryable failure description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncFailure {
    pub code: FailureCode,
    pub message: String,
}

impl fmt::Display for SyncFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            FailureCode::Remote(status) => write!(f, "remote error {}: {}", status, self.message),
            FailureCode::Transport => write!(f, "transport error: {}", self.message),
        }
    }
}

impl From<RemoteError> for SyncFailure {
    fn from(err: RemoteError) -> Self {
        SyncFailure {
            code: FailureCode::Remote(err.status),
            message: err.message,
        }
    }
}

impl From<TransportError> for SyncFailure {
    fn from(err: TransportError) -> Self {
        SyncFailure {
            code: FailureCode::Transport,
            message: err.to_string(),
        }
    }
}

/// Outcome of one orchestrator operation invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncResult {
    /// Operation fully applied; local state consistent with remote
    Success,

    /// Permanent outcome; the caller should not retry the same input
    Failure(SyncFailure),

    /// Transient outcome; safe to retry the whole operation later
    Retry { reason: String },
}

impl SyncResult {
    pub fn success() -> Self {
        SyncResult::Success
    }

    pub fn failure(err: impl Into<SyncFailure>) -> Self {
        SyncResult::Failure(err.into())
    }

    pub fn retry(reason: impl Into<String>) -> Self {
        SyncResult::Retry {
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SyncResult::Success)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, SyncResult::Failure(_))
    }

    pub fn is_retry(&self) -> bool {
        matches!(self, SyncResult::Retry { .. })
    }
}

impl fmt::Display for SyncResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncResult::Success => write!(f, "success"),
            SyncResult::Failure(failure) => write!(f, "failure ({})", failure),
            SyncResult::Retry { reason } => write!(f, "retry ({})", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        assert!(SyncResult::success().is_success());
        assert!(SyncResult::retry("store miss").is_retry());
        assert!(SyncResult::failure(RemoteError::new(400, "bad name")).is_failure());
    }

    #[test]
    fn test_failure_from_remote_error_keeps_status() {
        let result = SyncResult::failure(RemoteError::new(403, "denied"));
        match result {
            SyncResult::Failure(failure) => {
                assert_eq!(failure.code, FailureCode::Remote(403));
                assert_eq!(failure.message, "denied");
            }
            other => panic!("expected failure, got {}", other),
        }
    }

    #[test]
    fn test_failure_from_transport_error() {
        let result = SyncResult::failure(TransportError::Timeout);
        match result {
            SyncResult::Failure(failure) => assert_eq!(failure.code, FailureCode::Transport),
            other => panic!("expected failure, got {}", other),
        }
    }
}
