//! Error types for the sync core
//!
//! Three failure channels, kept distinct on purpose:
//! - `TransportError`: connectivity/protocol faults with no domain meaning
//! - `RemoteError`: the remote service rejected the request, optionally
//!   with a domain label
//! - `StoreError`: the local store boundary; always retryable from the
//!   orchestrator's point of view

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for local store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Connectivity or protocol-level failure, carries no domain label
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Request timed out")]
    Timeout,
}

/// Domain label the remote service attaches to some rejections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorLabel {
    /// One of the targeted users has no connection with this account
    NotConnected,
    /// The conversation is at its member capacity
    TooManyMembers,
    /// A label this client does not classify
    Other(String),
}

impl ErrorLabel {
    /// Parse the wire-level label string
    pub fn from_wire(label: &str) -> Self {
        match label {
            "not-connected" => ErrorLabel::NotConnected,
            "too-many-members" => ErrorLabel::TooManyMembers,
            other => ErrorLabel::Other(other.to_string()),
        }
    }

    pub fn as_wire(&self) -> &str {
        match self {
            ErrorLabel::NotConnected => "not-connected",
            ErrorLabel::TooManyMembers => "too-many-members",
            ErrorLabel::Other(s) => s,
        }
    }
}

/// Business rejection from the remote service
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Remote rejected request ({status}): {message}")]
pub struct RemoteError {
    /// HTTP status the transport surfaced
    pub status: u16,

    /// Human-readable message from the remote
    pub message: String,

    /// Domain classification, when the remote provided one
    pub label: Option<ErrorLabel>,
}

impl RemoteError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        RemoteError {
            status,
            message: message.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: ErrorLabel) -> Self {
        self.label = Some(label);
        self
    }

    /// Whether this is a 403 rejection
    pub fn is_forbidden(&self) -> bool {
        self.status == 403
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(e: serde_json::Error) -> Self {
        TransportError::Protocol(e.to_string())
    }
}

/// Local store boundary failure
///
/// Store faults are a designed, retryable outcome rather than a caught
/// exception: the orchestrator downgrades them to `SyncResult::Retry`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store backend error: {0}")]
    Backend(String),

    #[error("Store data corrupt: {0}")]
    Corrupt(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_from_wire() {
        assert_eq!(ErrorLabel::from_wire("not-connected"), ErrorLabel::NotConnected);
        assert_eq!(
            ErrorLabel::from_wire("too-many-members"),
            ErrorLabel::TooManyMembers
        );
        assert_eq!(
            ErrorLabel::from_wire("no-team"),
            ErrorLabel::Other("no-team".to_string())
        );
    }

    #[test]
    fn test_label_wire_roundtrip() {
        for label in ["not-connected", "too-many-members", "weird"] {
            assert_eq!(ErrorLabel::from_wire(label).as_wire(), label);
        }
    }

    #[test]
    fn test_remote_error_display() {
        let err = RemoteError::new(403, "operation denied").with_label(ErrorLabel::NotConnected);
        assert!(err.is_forbidden());
        assert_eq!(
            err.to_string(),
            "Remote rejected request (403): operation denied"
        );
    }

    #[test]
    fn test_transport_error_display() {
        let err = TransportError::Connection("socket closed".to_string());
        assert_eq!(err.to_string(), "Connection failed: socket closed");
    }

    #[test]
    fn test_decode_error_maps_to_protocol() {
        let json_err = serde_json::from_str::<String>("not json").unwrap_err();
        let err: TransportError = json_err.into();
        assert!(matches!(err, TransportError::Protocol(_)));
    }
}
