//! Core aggregate, projection and domain event traits.

use serde::{Serialize, de::DeserializeOwned};

/// Trait for domain events.
///
/// Domain events are immutable facts, named in past tense. Their `Display`
/// rendering is the human-readable description shown in logs and scenarios.
pub trait DomainEvent:
    Serialize + DeserializeOwned + Send + Sync + Clone + PartialEq + std::fmt::Display
{
    /// Every type tag this event set can carry.
    const EVENT_TYPES: &'static [&'static str];

    /// Returns the event type name.
    ///
    /// This is used as the envelope's type tag in the event store.
    fn event_type(&self) -> &'static str;

    /// Returns true if `event_type` names one of this set's variants.
    fn is_known_type(event_type: &str) -> bool {
        Self::EVENT_TYPES.contains(&event_type)
    }
}

/// A state snapshot derived by folding events.
///
/// `apply` must be pure, deterministic and total: events are facts that
/// already happened, so applying one can never fail. Consequently
/// `project(a ++ b) == project(a).fold_all(b)` for any two event sequences.
pub trait Projection: Default + Clone + PartialEq + Send + Sync {
    /// The events this projection consumes.
    type Event: DomainEvent;

    /// Applies a single event in place.
    fn apply(&mut self, event: &Self::Event);

    /// Applies a single event and returns the new state.
    fn fold(mut self, event: &Self::Event) -> Self {
        self.apply(event);
        self
    }

    /// Applies events in order, starting from `self`.
    fn fold_all<'a>(self, events: impl IntoIterator<Item = &'a Self::Event>) -> Self
    where
        Self::Event: 'a,
    {
        events
            .into_iter()
            .fold(self, |state, event| state.fold(event))
    }

    /// Folds events starting from the empty state.
    fn project<'a>(events: impl IntoIterator<Item = &'a Self::Event>) -> Self
    where
        Self::Event: 'a,
    {
        Self::default().fold_all(events)
    }
}

/// Trait for aggregates in an event-sourced system.
///
/// An aggregate owns a projection and the log of events it recorded since it
/// was constructed. The log is the source of truth: the projection is always
/// the fold of the replayed history followed by the recorded events.
pub trait Aggregate: Send + Sync + Sized {
    /// The type of events this aggregate records and replays.
    type Event: DomainEvent;

    /// The projection commands are validated against.
    type State: Projection<Event = Self::Event>;

    /// The type of errors returned when a command is rejected.
    type Error: std::error::Error + Send + Sync;

    /// Returns the aggregate type name.
    ///
    /// Used to tag the envelopes this aggregate's events are stored in.
    fn aggregate_type() -> &'static str;

    /// Rebuilds an aggregate from its history.
    ///
    /// Historical events are folded into the state but are not recorded: the
    /// returned aggregate's log starts empty.
    fn from_events(events: impl IntoIterator<Item = Self::Event>) -> Self;

    /// Returns the current projection.
    fn state(&self) -> &Self::State;

    /// Returns the events recorded since construction, oldest first.
    fn recorded_events(&self) -> &[Self::Event];
}
