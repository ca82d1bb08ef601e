//! Replays Given/When/Then factory scenarios through an event store.
//!
//! A scenario's history is imported into a fresh factory stream, its commands
//! run through [`FactoryService`], and its expectations are checked against
//! the events that were actually persisted. The resulting stream can be
//! exported as JSON lines.

pub mod config;
pub mod error;
pub mod scenario_file;

use std::io::Write;

use event_store::{AggregateId, EventStore, InMemoryEventStore, Version};
use factory_domain::{DomainError, FactoryEvent, FactoryService};
use futures_util::StreamExt;

pub use config::{Config, LogFormat};
pub use error::ReplayError;
pub use scenario_file::ScenarioFile;

/// What a replay left behind.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayReport {
    pub scenario: String,
    pub factory_id: AggregateId,
    /// Events persisted by the scenario's commands, excluding the history.
    pub recorded: Vec<FactoryEvent>,
    /// Rendered rejection of the last command, if it was rejected.
    pub last_error: Option<String>,
    pub final_version: Version,
}

/// Replays a scenario against a fresh factory stream.
///
/// Rejected commands do not stop the replay; only the last command's outcome
/// is kept. Store failures abort it.
#[tracing::instrument(skip_all, fields(scenario = %file.name))]
pub async fn replay<S: EventStore>(
    service: &FactoryService<S>,
    file: &ScenarioFile,
) -> Result<ReplayReport, ReplayError> {
    let factory_id = AggregateId::new();
    tracing::info!(%factory_id, "replaying scenario");

    tracing::info!("Given");
    for event in &file.given {
        tracing::info!("    {event}");
    }
    let mut version = service.import_history(factory_id, &file.given).await?;

    tracing::info!("When");
    let mut recorded = Vec::new();
    let mut last_error = None;
    for command in &file.when {
        tracing::info!("    {command}");
        match service.execute(factory_id, command.clone()).await {
            Ok(result) => {
                version = result.new_version;
                recorded.extend(result.events);
                last_error = None;
            }
            Err(DomainError::Factory(err)) => last_error = Some(err.to_string()),
            Err(err) => return Err(err.into()),
        }
    }

    for expectation in file.expectations() {
        tracing::info!("Then");
        tracing::info!("    {expectation}");
        expectation.verify(recorded.last(), last_error.as_deref())?;
    }

    Ok(ReplayReport {
        scenario: file.name.clone(),
        factory_id,
        recorded,
        last_error,
        final_version: version,
    })
}

/// Writes every stored event to `out`, one JSON envelope per line.
///
/// Returns the number of events written.
pub async fn export_events<S, W>(store: &S, mut out: W) -> Result<usize, ReplayError>
where
    S: EventStore,
    W: Write,
{
    let mut stream = store.stream_all_events().await?;
    let mut count = 0;

    while let Some(result) = stream.next().await {
        let envelope = result?;
        serde_json::to_writer(&mut out, &envelope)?;
        writeln!(out)?;
        count += 1;
    }

    out.flush()?;
    tracing::debug!(events = count, "export complete");
    Ok(count)
}

/// Loads the configured scenario, replays it against an in-memory store and,
/// if enabled, prints the stored stream to stdout.
pub async fn run(config: &Config) -> Result<ReplayReport, ReplayError> {
    let file = ScenarioFile::load(&config.scenario_path)?;
    let store = InMemoryEventStore::new();
    let service = FactoryService::new(store.clone());

    let report = replay(&service, &file).await?;

    if config.export {
        let mut buffer = Vec::new();
        export_events(&store, &mut buffer).await?;
        std::io::stdout().write_all(&buffer)?;
    }

    Ok(report)
}
