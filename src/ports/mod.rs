//! Ports - Interfaces for external dependencies.
//!
//! Adapters implement these contracts; engines depend only on the traits.
//!
//! - `NotificationChannel` - publishes snapshot events to subscribers
//! - `SnapshotHandler` - receives published events

mod notification;

pub use notification::{NotificationChannel, SnapshotHandler};
