//! Domain error types.

use event_store::EventStoreError;
use thiserror::Error;

use crate::factory::FactoryError;

/// Errors that can occur while handling commands against stored aggregates.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An error occurred in the event store.
    #[error("Event store error: {0}")]
    EventStore(#[from] EventStoreError),

    /// The factory rejected the command.
    ///
    /// Renders as the bare rejection message.
    #[error("{0}")]
    Factory(FactoryError),

    /// A stored payload could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<FactoryError> for DomainError {
    fn from(err: FactoryError) -> Self {
        DomainError::Factory(err)
    }
}

impl DomainError {
    /// Returns the factory rejection, if this error is one.
    pub fn as_factory_error(&self) -> Option<&FactoryError> {
        match self {
            DomainError::Factory(err) => Some(err),
            _ => None,
        }
    }
}
