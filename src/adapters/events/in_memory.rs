//! In-memory notification channel.
//!
//! Delivers events synchronously to registered handlers and keeps a copy
//! of the most recent events so callers can inspect them.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::{NotificationChannel, SnapshotHandler};

/// Captured events kept by `InMemoryNotificationChannel::new`.
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

fn poisoned(what: &str) -> DomainError {
    DomainError::new(
        ErrorCode::InternalError,
        format!("InMemoryNotificationChannel: {} lock poisoned", what),
    )
}

/// Synchronous, in-process notification channel.
///
/// Features:
/// - Delivery completes before `publish` returns
/// - Capture of the last `capacity` events for inspection; older events
///   are dropped, delivery is unaffected
/// - Handler failures are isolated and reported together
///
/// # Example
///
/// ```ignore
/// let channel = Arc::new(InMemoryNotificationChannel::new());
/// channel.subscribe("metrics.updated.v1", Arc::new(DashboardRefresher))?;
///
/// let mut engine = EffectivenessEngine::new(benchmarks, channel.clone());
/// engine.calculate(&recommendations, &interactions);
///
/// assert!(channel.has_event("metrics.updated.v1"));
/// ```
pub struct InMemoryNotificationChannel {
    handlers: RwLock<HashMap<String, Vec<Arc<dyn SnapshotHandler>>>>,
    published: RwLock<VecDeque<EventEnvelope>>,
    capacity: usize,
}

impl InMemoryNotificationChannel {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_EVENT_CAPACITY)
    }

    /// Keeps at most `capacity` captured events. Zero disables capture.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
            published: RwLock::new(VecDeque::new()),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // === Inspection ===

    /// Captured events, oldest first.
    pub fn published_events(&self) -> Vec<EventEnvelope> {
        self.published
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .cloned()
            .collect()
    }

    /// Published events of one type.
    pub fn events_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Published events emitted by one engine.
    pub fn events_for_aggregate(&self, aggregate_id: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.aggregate_id == aggregate_id)
            .collect()
    }

    pub fn event_count(&self) -> usize {
        self.published.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn has_event(&self, event_type: &str) -> bool {
        self.published
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .any(|e| e.event_type == event_type)
    }

    /// Forgets every captured event. Subscriptions are kept.
    pub fn clear(&self) {
        self.published
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }

    pub fn handler_count(&self, event_type: &str) -> usize {
        self.handlers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(event_type)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

impl Default for InMemoryNotificationChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationChannel for InMemoryNotificationChannel {
    fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        if self.capacity > 0 {
            let mut published = self.published.write().map_err(|_| poisoned("published"))?;
            if published.len() == self.capacity {
                published.pop_front();
            }
            published.push_back(event.clone());
        }

        // Clone handlers so none runs while the lock is held
        let type_handlers: Vec<Arc<dyn SnapshotHandler>> = {
            let handlers = self.handlers.read().map_err(|_| poisoned("handlers"))?;
            handlers
                .get(&event.event_type)
                .cloned()
                .unwrap_or_default()
        };

        let mut errors = Vec::new();
        for handler in type_handlers {
            if let Err(e) = handler.handle(&event) {
                errors.push(format!("{}: {}", handler.name(), e));
            }
        }

        if !errors.is_empty() {
            return Err(DomainError::new(
                ErrorCode::NotificationFailed,
                format!("Handler errors: {}", errors.join(", ")),
            )
            .with_detail("event_type", event.event_type.clone()));
        }

        Ok(())
    }

    fn subscribe(&self, event_type: &str, handler: Arc<dyn SnapshotHandler>) -> Result<(), DomainError> {
        self.handlers
            .write()
            .map_err(|_| poisoned("handlers"))?
            .entry(event_type.to_string())
            .or_default()
            .push(handler);
        Ok(())
    }
}
