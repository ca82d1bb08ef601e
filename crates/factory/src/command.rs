//! Command handling infrastructure.

use std::marker::PhantomData;

use event_store::{AggregateId, AppendOptions, EventEnvelope, EventStore, Version};

use crate::aggregate::{Aggregate, DomainEvent};
use crate::error::DomainError;

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult<A: Aggregate> {
    /// The aggregate after applying the new events.
    pub aggregate: A,

    /// The events that were generated and persisted.
    pub events: Vec<A::Event>,

    /// The new version of the aggregate after the command.
    pub new_version: Version,
}

/// Trait for commands that can be executed against an aggregate.
///
/// Commands represent an intention to perform an action. They may be rejected
/// if the aggregate's current state doesn't allow the action, in which case
/// the aggregate is left untouched. The `Display` rendering describes the
/// intent in plain words.
pub trait Command: Send + Sync + std::fmt::Display {
    /// The type of aggregate this command targets.
    type Aggregate: Aggregate;

    /// Validates the command against the aggregate and records the resulting
    /// event on success.
    fn execute(
        &self,
        aggregate: &mut Self::Aggregate,
    ) -> Result<(), <Self::Aggregate as Aggregate>::Error>;
}

/// Handler for executing commands against stored aggregates.
///
/// The handler is responsible for:
/// 1. Loading the aggregate's history from the event store
/// 2. Executing the command against the rebuilt aggregate
/// 3. Persisting the recorded events with an expected-version check
pub struct CommandHandler<S, A>
where
    S: EventStore,
    A: Aggregate,
{
    store: S,
    _phantom: PhantomData<A>,
}

impl<S, A> CommandHandler<S, A>
where
    S: EventStore,
    A: Aggregate,
{
    /// Creates a new command handler with the given event store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            _phantom: PhantomData,
        }
    }

    /// Returns a reference to the underlying event store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads an aggregate from the event store.
    ///
    /// Returns the rebuilt aggregate together with the stream version. Events
    /// of a type this aggregate does not know are skipped; they still count
    /// towards the version.
    pub async fn load(&self, aggregate_id: AggregateId) -> Result<(A, Version), DomainError> {
        let envelopes = self.store.get_events_for_aggregate(aggregate_id).await?;
        let version = envelopes
            .last()
            .map(|e| e.version)
            .unwrap_or_else(Version::initial);

        let mut events = Vec::with_capacity(envelopes.len());
        for envelope in envelopes {
            if !<A::Event as DomainEvent>::is_known_type(&envelope.event_type) {
                tracing::warn!(
                    %aggregate_id,
                    event_type = %envelope.event_type,
                    version = envelope.version.as_i64(),
                    "skipping unknown event type"
                );
                continue;
            }
            let event: A::Event = serde_json::from_value(envelope.payload)?;
            events.push(event);
        }

        Ok((A::from_events(events), version))
    }

    /// Executes a command and persists the resulting events.
    pub async fn execute<C>(
        &self,
        aggregate_id: AggregateId,
        command: &C,
    ) -> Result<CommandResult<A>, DomainError>
    where
        C: Command<Aggregate = A> + ?Sized,
        DomainError: From<A::Error>,
    {
        let (mut aggregate, current_version) = self.load(aggregate_id).await?;

        if let Err(e) = command.execute(&mut aggregate) {
            metrics::counter!("commands_rejected_total", "aggregate" => A::aggregate_type())
                .increment(1);
            tracing::info!(%aggregate_id, %command, error = %e, "command rejected");
            return Err(e.into());
        }

        let events = aggregate.recorded_events().to_vec();
        if events.is_empty() {
            return Ok(CommandResult {
                aggregate,
                events,
                new_version: current_version,
            });
        }

        let new_version = self.persist(aggregate_id, current_version, &events).await?;

        metrics::counter!("commands_executed_total", "aggregate" => A::aggregate_type())
            .increment(1);
        tracing::debug!(
            %aggregate_id,
            %command,
            version = new_version.as_i64(),
            "command executed"
        );

        Ok(CommandResult {
            aggregate,
            events,
            new_version,
        })
    }

    /// Seeds an empty stream with an existing history.
    ///
    /// Fails with a concurrency conflict if the stream already has events.
    pub async fn import(
        &self,
        aggregate_id: AggregateId,
        events: &[A::Event],
    ) -> Result<Version, DomainError> {
        if events.is_empty() {
            return Ok(Version::initial());
        }

        let envelopes = self.build_envelopes(aggregate_id, Version::initial(), events)?;
        let version = self
            .store
            .append(envelopes, AppendOptions::expect_new())
            .await?;

        tracing::debug!(%aggregate_id, count = events.len(), "imported history");
        Ok(version)
    }

    /// Appends events on top of `expected_version`.
    ///
    /// The store rejects the append if the stream has moved on since.
    pub async fn persist(
        &self,
        aggregate_id: AggregateId,
        expected_version: Version,
        events: &[A::Event],
    ) -> Result<Version, DomainError> {
        let envelopes = self.build_envelopes(aggregate_id, expected_version, events)?;
        let options = if expected_version == Version::initial() {
            AppendOptions::expect_new()
        } else {
            AppendOptions::expect_version(expected_version)
        };

        Ok(self.store.append(envelopes, options).await?)
    }

    /// Builds event envelopes from domain events.
    fn build_envelopes(
        &self,
        aggregate_id: AggregateId,
        current_version: Version,
        events: &[A::Event],
    ) -> Result<Vec<EventEnvelope>, DomainError> {
        let mut envelopes = Vec::with_capacity(events.len());
        let mut version = current_version;

        for event in events {
            version = version.next();
            let envelope = EventEnvelope::builder()
                .aggregate_id(aggregate_id)
                .aggregate_type(A::aggregate_type())
                .event_type(event.event_type())
                .version(version)
                .payload(event)?
                .build()?;
            envelopes.push(envelope);
        }

        Ok(envelopes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{
        AssignEmployee, Factory, FactoryError, FactoryEvent, FactoryState, SendShipmentToCargoBay,
        Shipment,
    };
    use event_store::{EventStoreError, InMemoryEventStore};

    fn handler() -> CommandHandler<InMemoryEventStore, Factory> {
        CommandHandler::new(InMemoryEventStore::new())
    }

    #[tokio::test]
    async fn test_execute_persists_one_envelope() {
        let handler = handler();
        let aggregate_id = AggregateId::new();

        let result = handler
            .execute(aggregate_id, &AssignEmployee::new("Jeff"))
            .await
            .unwrap();

        assert_eq!(result.events, vec![FactoryEvent::employee_assigned("Jeff")]);
        assert_eq!(result.new_version, Version::first());
        assert!(result.aggregate.state().has_employee("Jeff"));

        let stored = handler
            .store()
            .get_events_for_aggregate(aggregate_id)
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].event_type, "EmployeeAssigned");
        assert_eq!(stored[0].aggregate_type, "Factory");
        assert_eq!(stored[0].version, Version::first());
    }

    #[tokio::test]
    async fn test_execute_continues_the_stream() {
        let handler = handler();
        let aggregate_id = AggregateId::new();

        handler
            .execute(aggregate_id, &AssignEmployee::new("Jeff"))
            .await
            .unwrap();
        let result = handler
            .execute(
                aggregate_id,
                &SendShipmentToCargoBay::new(Shipment::new().with_part("Engine", 1)),
            )
            .await
            .unwrap();

        assert_eq!(result.new_version, Version::new(2));
        // Only the event of this command is reported, not the history.
        assert_eq!(result.events.len(), 1);
        assert_eq!(result.aggregate.state().shipments_in_cargo_bay().len(), 1);
    }

    #[tokio::test]
    async fn test_rejected_command_persists_nothing() {
        let handler = handler();
        let aggregate_id = AggregateId::new();

        let err = handler
            .execute(aggregate_id, &AssignEmployee::new("Bender"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DomainError::Factory(FactoryError::DisallowedEmployeeName { .. })
        ));
        assert_eq!(handler.store().event_count().await, 0);
    }

    #[tokio::test]
    async fn test_load_empty_stream() {
        let handler = handler();

        let (factory, version) = handler.load(AggregateId::new()).await.unwrap();

        assert_eq!(version, Version::initial());
        assert_eq!(factory.state(), &FactoryState::default());
        assert!(factory.recorded_events().is_empty());
    }

    #[tokio::test]
    async fn test_load_replays_without_recording() {
        let handler = handler();
        let aggregate_id = AggregateId::new();
        handler
            .import(
                aggregate_id,
                &[
                    FactoryEvent::employee_assigned("Jeff"),
                    FactoryEvent::employee_assigned("Sarah"),
                ],
            )
            .await
            .unwrap();

        let (factory, version) = handler.load(aggregate_id).await.unwrap();

        assert_eq!(version, Version::new(2));
        assert_eq!(factory.state().employee_count(), 2);
        assert!(factory.recorded_events().is_empty());
    }

    #[tokio::test]
    async fn test_load_skips_unknown_event_types() {
        let handler = handler();
        let aggregate_id = AggregateId::new();
        handler
            .import(aggregate_id, &[FactoryEvent::employee_assigned("Jeff")])
            .await
            .unwrap();

        let unknown = EventEnvelope::builder()
            .aggregate_id(aggregate_id)
            .aggregate_type("Factory")
            .event_type("FactoryRepainted")
            .version(Version::new(2))
            .payload_raw(serde_json::json!({"type": "FactoryRepainted", "data": {}}))
            .build()
            .unwrap();
        handler
            .store()
            .append(vec![unknown], AppendOptions::expect_version(Version::first()))
            .await
            .unwrap();

        let (factory, version) = handler.load(aggregate_id).await.unwrap();

        assert_eq!(version, Version::new(2));
        assert!(factory.state().has_employee("Jeff"));

        // The next command lands after the skipped event.
        let result = handler
            .execute(aggregate_id, &AssignEmployee::new("Sarah"))
            .await
            .unwrap();
        assert_eq!(result.new_version, Version::new(3));
    }

    #[tokio::test]
    async fn test_load_rejects_corrupt_payload() {
        let handler = handler();
        let aggregate_id = AggregateId::new();

        let corrupt = EventEnvelope::builder()
            .aggregate_id(aggregate_id)
            .aggregate_type("Factory")
            .event_type("EmployeeAssigned")
            .version(Version::first())
            .payload_raw(serde_json::json!({"type": "EmployeeAssigned", "data": 42}))
            .build()
            .unwrap();
        handler
            .store()
            .append(vec![corrupt], AppendOptions::expect_new())
            .await
            .unwrap();

        let err = handler.load(aggregate_id).await.unwrap_err();
        assert!(matches!(err, DomainError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_import_requires_empty_stream() {
        let handler = handler();
        let aggregate_id = AggregateId::new();
        let history = [FactoryEvent::employee_assigned("Jeff")];

        handler.import(aggregate_id, &history).await.unwrap();
        let err = handler.import(aggregate_id, &history).await.unwrap_err();

        assert!(matches!(
            err,
            DomainError::EventStore(EventStoreError::ConcurrencyConflict { .. })
        ));
    }

    #[tokio::test]
    async fn test_import_empty_history_is_noop() {
        let handler = handler();

        let version = handler.import(AggregateId::new(), &[]).await.unwrap();

        assert_eq!(version, Version::initial());
        assert_eq!(handler.store().event_count().await, 0);
    }

    #[tokio::test]
    async fn test_stale_version_conflicts() {
        let handler = handler();
        let aggregate_id = AggregateId::new();

        let (mut factory, stale_version) = handler.load(aggregate_id).await.unwrap();
        factory.assign_employee("Jeff").unwrap();

        // Someone else gets there first.
        handler
            .execute(aggregate_id, &AssignEmployee::new("Sarah"))
            .await
            .unwrap();

        let err = handler
            .persist(aggregate_id, stale_version, factory.recorded_events())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DomainError::EventStore(EventStoreError::ConcurrencyConflict { .. })
        ));
        assert_eq!(handler.store().event_count().await, 1);
    }
}
