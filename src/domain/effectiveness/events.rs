//! Effectiveness domain events.

use serde::{Deserialize, Serialize};

use super::MetricsSnapshot;
use crate::domain::foundation::{domain_event, EngineId, EventId, Timestamp};

/// Published after every successful effectiveness calculation.
///
/// Carries the full snapshot so subscribers need no call back into the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsUpdated {
    pub event_id: EventId,
    /// The engine that computed the snapshot.
    pub engine_id: EngineId,
    pub snapshot: MetricsSnapshot,
    pub computed_at: Timestamp,
}

impl MetricsUpdated {
    pub fn new(engine_id: EngineId, snapshot: MetricsSnapshot) -> Self {
        Self {
            event_id: EventId::new(),
            engine_id,
            computed_at: snapshot.timestamp,
            snapshot,
        }
    }
}

domain_event!(
    MetricsUpdated,
    event_type = "metrics.updated.v1",
    schema_version = 1,
    aggregate_id = engine_id,
    aggregate_type = "EffectivenessEngine",
    occurred_at = computed_at,
    event_id = event_id
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::effectiveness::EffectivenessCalculator;
    use crate::domain::foundation::{DomainEvent, SerializableDomainEvent};

    #[test]
    fn envelope_carries_snapshot() {
        let engine_id = EngineId::new();
        let snapshot = EffectivenessCalculator::new().compute(&[], &[], 30, Timestamp::now());
        let event = MetricsUpdated::new(engine_id, snapshot.clone());

        assert_eq!(event.event_type(), "metrics.updated.v1");
        assert_eq!(event.aggregate_id(), engine_id.to_string());
        assert_eq!(event.occurred_at(), snapshot.timestamp);

        let envelope = event.to_envelope().unwrap();
        assert_eq!(envelope.aggregate_type, "EffectivenessEngine");
        let decoded: MetricsUpdated = envelope.payload_as().unwrap();
        assert_eq!(decoded.snapshot, snapshot);
    }
}
