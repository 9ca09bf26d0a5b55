//! Notification ports - how engines announce new snapshots.
//!
//! Engines publish an `EventEnvelope` after every successful calculation.
//! Delivery is synchronous: every matching handler has run by the time
//! `publish` returns.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Receives snapshot events.
///
/// Implementations should be:
/// - **Quick** - they run inside the engine's calculate call
/// - **Isolated** - an error is reported but does not stop other handlers
///
/// # Example
///
/// ```ignore
/// struct DashboardRefresher;
///
/// impl SnapshotHandler for DashboardRefresher {
///     fn handle(&self, event: &EventEnvelope) -> Result<(), DomainError> {
///         let update: MetricsUpdated = event.payload_as()?;
///         // refresh read model...
///         Ok(())
///     }
///
///     fn name(&self) -> &'static str {
///         "DashboardRefresher"
///     }
/// }
/// ```
pub trait SnapshotHandler: Send + Sync {
    fn handle(&self, event: &EventEnvelope) -> Result<(), DomainError>;

    /// Handler name for logging.
    fn name(&self) -> &'static str;
}

/// Publish/subscribe channel injected into each engine.
pub trait NotificationChannel: Send + Sync {
    /// Delivers `event` to every handler subscribed to its type.
    ///
    /// All handlers are invoked even if some fail; failures are collected
    /// into a single `NotificationFailed` error.
    fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Registers `handler` for one event type.
    fn subscribe(&self, event_type: &str, handler: Arc<dyn SnapshotHandler>) -> Result<(), DomainError>;

    /// Registers the same handler for several event types.
    fn subscribe_all(
        &self,
        event_types: &[&str],
        handler: Arc<dyn SnapshotHandler>,
    ) -> Result<(), DomainError> {
        for event_type in event_types {
            self.subscribe(event_type, Arc::clone(&handler))?;
        }
        Ok(())
    }
}
