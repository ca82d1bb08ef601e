//! Append-only event storage for the factory aggregate.
//!
//! The store knows nothing about factories: it keeps versioned
//! [`EventEnvelope`]s per aggregate stream and enforces optimistic
//! concurrency on append. Decoding payloads back into domain events is the
//! caller's job.

pub mod error;
pub mod event;
pub mod memory;
pub mod store;

pub use error::{EventStoreError, Result};
pub use event::{AggregateId, EventEnvelope, EventEnvelopeBuilder, EventId, Version};
pub use memory::InMemoryEventStore;
pub use store::{AppendOptions, EventStore, EventStoreExt, EventStream};
