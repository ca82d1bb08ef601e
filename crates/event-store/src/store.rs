use std::pin::Pin;

use async_trait::async_trait;
use futures_core::Stream;

use crate::{AggregateId, EventEnvelope, EventStoreError, Result, Version};

/// Options for appending events to the store.
#[derive(Debug, Clone, Default)]
pub struct AppendOptions {
    /// Version the stream must be at before the append.
    /// `None` skips the check.
    pub expected_version: Option<Version>,
}

impl AppendOptions {
    /// Creates options with no version check.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires the stream to be at `version`.
    pub fn expect_version(version: Version) -> Self {
        Self {
            expected_version: Some(version),
        }
    }

    /// Requires the stream to be empty.
    pub fn expect_new() -> Self {
        Self {
            expected_version: Some(Version::initial()),
        }
    }
}

/// A stream of stored events.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<EventEnvelope>> + Send>>;

/// Append-only, versioned event storage.
///
/// Implementations must be thread-safe; callers never get to edit or remove
/// an event once it has been appended.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Appends a batch of events to a single stream.
    ///
    /// The batch is stored atomically. When `options.expected_version` is set
    /// and does not match the stream's current version, nothing is stored and
    /// `ConcurrencyConflict` is returned.
    ///
    /// Returns the stream version after the append.
    async fn append(&self, events: Vec<EventEnvelope>, options: AppendOptions) -> Result<Version>;

    /// Returns every event of a stream, oldest first.
    async fn get_events_for_aggregate(
        &self,
        aggregate_id: AggregateId,
    ) -> Result<Vec<EventEnvelope>>;

    /// Returns the current version of a stream, or `None` if it has no events.
    async fn get_aggregate_version(&self, aggregate_id: AggregateId) -> Result<Option<Version>>;

    /// Streams every stored event in append order.
    async fn stream_all_events(&self) -> Result<EventStream>;
}

/// Convenience methods available on every [`EventStore`].
#[async_trait]
pub trait EventStoreExt: EventStore {
    /// Appends a single event.
    async fn append_event(&self, event: EventEnvelope, options: AppendOptions) -> Result<Version> {
        self.append(vec![event], options).await
    }

    /// Returns true if the stream holds at least one event.
    async fn aggregate_exists(&self, aggregate_id: AggregateId) -> Result<bool> {
        Ok(self.get_aggregate_version(aggregate_id).await?.is_some())
    }
}

impl<T: EventStore + ?Sized> EventStoreExt for T {}

/// Checks that a batch is non-empty, targets one stream and carries
/// consecutive versions.
pub fn validate_events_for_append(events: &[EventEnvelope]) -> Result<()> {
    let Some(first) = events.first() else {
        return Err(EventStoreError::InvalidAppend(
            "cannot append an empty event list".to_string(),
        ));
    };

    let mut expected_version = first.version;
    for event in &events[1..] {
        if event.aggregate_id != first.aggregate_id {
            return Err(EventStoreError::InvalidAppend(
                "all events must belong to the same aggregate".to_string(),
            ));
        }
        if event.aggregate_type != first.aggregate_type {
            return Err(EventStoreError::InvalidAppend(
                "all events must have the same aggregate type".to_string(),
            ));
        }
        expected_version = expected_version.next();
        if event.version != expected_version {
            return Err(EventStoreError::InvalidAppend(format!(
                "event versions must be sequential: expected {}, got {}",
                expected_version, event.version
            )));
        }
    }

    Ok(())
}
