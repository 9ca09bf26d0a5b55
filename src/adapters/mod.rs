//! Adapters - Implementations of port interfaces.
//!
//! - `events` - notification channel implementations

pub mod events;

pub use events::{InMemoryNotificationChannel, DEFAULT_EVENT_CAPACITY};
