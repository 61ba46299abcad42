//! Collaborator seams for the sync core
//!
//! One trait per external collaborator: the remote service client, the
//! local store, the event sink, and the domain error reporter. Production
//! wires real implementations; tests wire recording mocks.

pub mod events;
pub mod remote;
pub mod reporter;
pub mod store;

pub use events::EventSink;
pub use remote::ConversationApi;
pub use reporter::{DomainErrorReport, DomainErrorReporter};
pub use store::ConversationStore;
