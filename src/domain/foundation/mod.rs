//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, error types and event plumbing
//! that form the vocabulary of the analytics domain.

mod errors;
mod events;
mod ids;
mod priority;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{
    domain_event, DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent,
};
pub use ids::{EngineId, SnapshotId, UserId};
pub use priority::Priority;
pub use timestamp::Timestamp;
