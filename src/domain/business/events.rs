//! Business domain events.

use serde::{Deserialize, Serialize};

use super::BusinessSnapshot;
use crate::domain::foundation::{domain_event, EngineId, EventId, Timestamp};

/// Published after every successful business calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessMetricsUpdated {
    pub event_id: EventId,
    pub engine_id: EngineId,
    pub snapshot: BusinessSnapshot,
    pub computed_at: Timestamp,
}

impl BusinessMetricsUpdated {
    pub fn new(engine_id: EngineId, snapshot: BusinessSnapshot) -> Self {
        Self {
            event_id: EventId::new(),
            engine_id,
            computed_at: snapshot.timestamp,
            snapshot,
        }
    }
}

domain_event!(
    BusinessMetricsUpdated,
    event_type = "business_metrics.updated.v1",
    schema_version = 1,
    aggregate_id = engine_id,
    aggregate_type = "BusinessEngine",
    occurred_at = computed_at,
    event_id = event_id
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::business::BusinessCalculator;
    use crate::domain::foundation::SerializableDomainEvent;

    #[test]
    fn envelope_type_and_version() {
        let snapshot = BusinessCalculator::compute(&[], &[], &[], 30, Timestamp::now());
        let envelope = BusinessMetricsUpdated::new(EngineId::new(), snapshot)
            .to_envelope()
            .unwrap();

        assert_eq!(envelope.event_type, "business_metrics.updated.v1");
        assert_eq!(envelope.aggregate_type, "BusinessEngine");
        assert!(envelope.payload.get("snapshot").is_some());
    }
}
