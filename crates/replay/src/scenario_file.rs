//! Scenario files.
//!
//! A scenario file is a JSON document:
//!
//! ```json
//! {
//!   "name": "An employee can produce a car",
//!   "given": [{"type": "CargoBayInventorized", "data": {"employee_name": "Jeff"}}],
//!   "when": [{"type": "AssignEmployee", "data": {"name": "Jeff"}}],
//!   "then": {"type": "EmployeeAssigned", "data": {"employee_name": "Jeff"}}
//! }
//! ```
//!
//! `then_error` takes the expected error message. A file may carry `then`,
//! `then_error`, both, or neither.

use std::path::Path;

use factory_domain::{Expectation, FactoryCommand, FactoryEvent, Scenario};
use serde::{Deserialize, Serialize};

use crate::error::ReplayError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioFile {
    pub name: String,

    #[serde(default)]
    pub given: Vec<FactoryEvent>,

    #[serde(default)]
    pub when: Vec<FactoryCommand>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub then: Option<FactoryEvent>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub then_error: Option<String>,
}

impl ScenarioFile {
    /// Reads and parses a scenario file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading scenario file");
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parses a scenario from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Everything the scenario asserts, event expectation first.
    pub fn expectations(&self) -> Vec<Expectation> {
        let mut expectations = Vec::new();
        if let Some(event) = &self.then {
            expectations.push(Expectation::Event(event.clone()));
        }
        if let Some(message) = &self.then_error {
            expectations.push(Expectation::Error(message.clone()));
        }
        expectations
    }

    /// Builds the equivalent in-memory scenario, carrying every expectation.
    pub fn to_scenario(&self) -> Scenario {
        let mut scenario = Scenario::new(self.name.clone()).given(self.given.iter().cloned());
        for command in &self.when {
            scenario = scenario.when(command.clone());
        }
        for expectation in self.expectations() {
            scenario = match expectation {
                Expectation::Event(event) => scenario.then(event),
                Expectation::Error(message) => scenario.then_error(message),
            };
        }
        scenario
    }
}
