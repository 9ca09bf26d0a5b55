//! Notification channel adapters.
//!
//! - `InMemoryNotificationChannel` - synchronous, in-process delivery with a
//!   bounded capture buffer

mod in_memory;

pub use in_memory::{InMemoryNotificationChannel, DEFAULT_EVENT_CAPACITY};
