use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    AggregateId, EventEnvelope, EventStoreError, Result, Version,
    store::{AppendOptions, EventStore, EventStream, validate_events_for_append},
};

/// Event store that keeps every envelope in a shared in-memory log.
///
/// Clones share the same log, so a clone handed to a service and one kept by
/// the caller observe the same events.
#[derive(Clone, Default)]
pub struct InMemoryEventStore {
    events: Arc<RwLock<Vec<EventEnvelope>>>,
}

impl InMemoryEventStore {
    /// Creates a new empty in-memory event store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of events stored across all streams.
    pub async fn event_count(&self) -> usize {
        self.events.read().await.len()
    }

    /// Drops every stored event.
    pub async fn clear(&self) {
        self.events.write().await.clear();
    }
}

fn stream_version(events: &[EventEnvelope], aggregate_id: AggregateId) -> Option<Version> {
    events
        .iter()
        .filter(|e| e.aggregate_id == aggregate_id)
        .map(|e| e.version)
        .max()
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn append(&self, events: Vec<EventEnvelope>, options: AppendOptions) -> Result<Version> {
        validate_events_for_append(&events)?;

        let aggregate_id = events[0].aggregate_id;
        let first_new_version = events[0].version;

        let mut store = self.events.write().await;
        let current_version = stream_version(&store, aggregate_id).unwrap_or_default();

        if let Some(expected) = options.expected_version
            && current_version != expected
        {
            return Err(EventStoreError::ConcurrencyConflict {
                aggregate_id,
                expected,
                actual: current_version,
            });
        }

        // Versions are unique per stream and must continue the stream.
        if first_new_version != current_version.next() {
            return Err(EventStoreError::ConcurrencyConflict {
                aggregate_id,
                expected: options.expected_version.unwrap_or(current_version),
                actual: current_version,
            });
        }

        let last_version = first_new_version.as_i64() + events.len() as i64 - 1;
        tracing::debug!(
            %aggregate_id,
            count = events.len(),
            version = last_version,
            "appending events"
        );
        store.extend(events);

        Ok(Version::new(last_version))
    }

    async fn get_events_for_aggregate(
        &self,
        aggregate_id: AggregateId,
    ) -> Result<Vec<EventEnvelope>> {
        let store = self.events.read().await;
        let mut events: Vec<_> = store
            .iter()
            .filter(|e| e.aggregate_id == aggregate_id)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.version);
        Ok(events)
    }

    async fn get_aggregate_version(&self, aggregate_id: AggregateId) -> Result<Option<Version>> {
        let store = self.events.read().await;
        Ok(stream_version(&store, aggregate_id))
    }

    async fn stream_all_events(&self) -> Result<EventStream> {
        use futures_util::stream;

        let events = self.events.read().await.clone();
        let stream = stream::iter(events.into_iter().map(Ok));
        Ok(Box::pin(stream))
    }
}
