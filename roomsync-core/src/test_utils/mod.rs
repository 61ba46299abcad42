//! Test utilities and helpers
//!
//! Common fixtures and mock collaborators used by unit and integration
//! tests across the crate.

pub mod faulty_store;
pub mod fixtures;
pub mod mocks;

pub use faulty_store::FaultInjectingStore;
pub use fixtures::{TestRecordBuilder, TestSnapshotBuilder};
pub use mocks::{ApiCall, MockConversationApi, MockDomainErrorReporter, MockEventSink};
