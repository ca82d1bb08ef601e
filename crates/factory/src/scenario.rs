//! Given/When/Then scenarios for the factory.
//!
//! A scenario replays a history into a fresh factory, runs commands against
//! it and then checks the last recorded event, the error returned by the last
//! command, or both.
//!
//! ```
//! use factory_domain::{AssignEmployee, FactoryEvent, Scenario};
//!
//! let outcome = Scenario::new("Assigning an employee to a factory")
//!     .when(AssignEmployee::new("Jeff"))
//!     .then(FactoryEvent::employee_assigned("Jeff"))
//!     .run()
//!     .unwrap();
//!
//! assert!(outcome.last_error().is_none());
//! ```

use thiserror::Error;

use crate::aggregate::Aggregate;
use crate::command::Command;
use crate::factory::{Factory, FactoryEvent};

/// Why a scenario did not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScenarioFailure {
    #[error("expected \"{expected}\" but no event was recorded")]
    NoEventRecorded { expected: FactoryEvent },

    #[error("expected \"{expected}\" but the last recorded event was \"{actual}\"")]
    UnexpectedEvent {
        expected: FactoryEvent,
        actual: FactoryEvent,
    },

    #[error("expected error \"{expected}\" but the last command succeeded")]
    NoErrorReturned { expected: String },

    #[error("expected error \"{expected}\" but got \"{actual}\"")]
    UnexpectedError { expected: String, actual: String },
}

/// What a scenario asserts once its commands have run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    /// The last recorded event equals this one.
    Event(FactoryEvent),
    /// The last command failed with exactly this message.
    Error(String),
}

impl Expectation {
    /// Checks the expectation against the last recorded event and the
    /// rendered error of the last command.
    pub fn verify(
        &self,
        last_event: Option<&FactoryEvent>,
        last_error: Option<&str>,
    ) -> Result<(), ScenarioFailure> {
        match self {
            Expectation::Event(expected) => match last_event {
                None => Err(ScenarioFailure::NoEventRecorded {
                    expected: expected.clone(),
                }),
                Some(actual) if actual != expected => Err(ScenarioFailure::UnexpectedEvent {
                    expected: expected.clone(),
                    actual: actual.clone(),
                }),
                Some(_) => Ok(()),
            },
            Expectation::Error(expected) => match last_error {
                None => Err(ScenarioFailure::NoErrorReturned {
                    expected: expected.clone(),
                }),
                Some(actual) if actual != expected => Err(ScenarioFailure::UnexpectedError {
                    expected: expected.clone(),
                    actual: actual.to_string(),
                }),
                Some(_) => Ok(()),
            },
        }
    }
}

impl std::fmt::Display for Expectation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expectation::Event(event) => std::fmt::Display::fmt(event, f),
            Expectation::Error(message) => f.write_str(message),
        }
    }
}

/// A Given/When/Then scenario.
pub struct Scenario {
    name: String,
    given: Vec<FactoryEvent>,
    when: Vec<Box<dyn Command<Aggregate = Factory>>>,
    expected_event: Option<FactoryEvent>,
    expected_error: Option<String>,
}

/// What was left after a scenario ran.
#[derive(Debug)]
pub struct ScenarioOutcome {
    factory: Factory,
    last_error: Option<String>,
    commands: Vec<String>,
}

impl ScenarioOutcome {
    /// The factory after every command ran.
    pub fn factory(&self) -> &Factory {
        &self.factory
    }

    /// The rendered error of the last command, if it failed.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Descriptions of the commands, in execution order.
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// Consumes the outcome, returning the factory.
    pub fn into_factory(self) -> Factory {
        self.factory
    }
}

impl Scenario {
    /// Starts a scenario with an empty history.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            given: Vec::new(),
            when: Vec::new(),
            expected_event: None,
            expected_error: None,
        }
    }

    /// Replaces the history the factory is rebuilt from.
    pub fn given(mut self, events: impl IntoIterator<Item = FactoryEvent>) -> Self {
        self.given = events.into_iter().collect();
        self
    }

    /// Queues a command. Commands run in the order they were queued.
    pub fn when<C>(mut self, command: C) -> Self
    where
        C: Command<Aggregate = Factory> + 'static,
    {
        self.when.push(Box::new(command));
        self
    }

    /// Expects the last recorded event to equal `event`.
    pub fn then(mut self, event: FactoryEvent) -> Self {
        self.expected_event = Some(event);
        self
    }

    /// Expects the last command to fail with exactly `message`.
    ///
    /// Independent of [`then`](Self::then); a scenario may set both.
    pub fn then_error(mut self, message: impl Into<String>) -> Self {
        self.expected_error = Some(message.into());
        self
    }

    /// Everything the scenario asserts, event expectation first.
    pub fn expectations(&self) -> Vec<Expectation> {
        self.expected_event
            .iter()
            .cloned()
            .map(Expectation::Event)
            .chain(self.expected_error.iter().cloned().map(Expectation::Error))
            .collect()
    }

    /// Returns the scenario name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the scenario and checks its expectations, event first.
    pub fn run(self) -> Result<ScenarioOutcome, ScenarioFailure> {
        tracing::info!(scenario = %self.name, "running scenario");
        let expectations = self.expectations();

        tracing::info!("Given");
        for event in &self.given {
            tracing::info!("    {event}");
        }
        let mut factory = Factory::from_events(self.given);

        tracing::info!("When");
        let mut last_error = None;
        let mut commands = Vec::with_capacity(self.when.len());
        for command in &self.when {
            last_error = command.execute(&mut factory).err().map(|e| e.to_string());
            tracing::info!("    {command}");
            commands.push(command.to_string());
        }

        for expectation in &expectations {
            match expectation {
                Expectation::Event(_) => tracing::info!("Then"),
                Expectation::Error(_) => tracing::info!("Then error"),
            }
            tracing::info!("    {expectation}");
            expectation.verify(factory.last_recorded_event(), last_error.as_deref())?;
        }

        Ok(ScenarioOutcome {
            factory,
            last_error,
            commands,
        })
    }
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let when: Vec<String> = self.when.iter().map(|c| c.to_string()).collect();
        f.debug_struct("Scenario")
            .field("name", &self.name)
            .field("given", &self.given)
            .field("when", &when)
            .field("expected_event", &self.expected_event)
            .field("expected_error", &self.expected_error)
            .finish()
    }
}
