//! Runner error types.

use event_store::EventStoreError;
use factory_domain::{DomainError, ScenarioFailure};
use thiserror::Error;

/// Errors that stop a replay.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// The scenario file could not be read, or the export could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The scenario file is not valid JSON, or an envelope could not be encoded.
    #[error("Invalid scenario: {0}")]
    Parse(#[from] serde_json::Error),

    /// Loading or persisting the factory failed.
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Reading the event stream back failed.
    #[error("Event store error: {0}")]
    EventStore(#[from] EventStoreError),

    /// The scenario ran but its expectation did not hold.
    #[error("Scenario failed: {0}")]
    Scenario(#[from] ScenarioFailure),
}
