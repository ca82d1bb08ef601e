//! Event-sourced factory domain.
//!
//! This crate provides:
//! - Aggregate, Projection and DomainEvent traits for event-sourced entities
//! - Command trait and a store-backed CommandHandler
//! - The Factory aggregate with its events, commands and state projection
//! - FactoryService for running factories against an event store
//! - A Given/When/Then scenario harness

pub mod aggregate;
pub mod command;
pub mod error;
pub mod factory;
pub mod scenario;

pub use aggregate::{Aggregate, DomainEvent, Projection};
pub use command::{Command, CommandHandler, CommandResult};
pub use error::DomainError;
pub use factory::{
    AssignEmployee, CARGO_BAY_CAPACITY, CarPart, CarProducedData, CargoBayInventorizedData,
    DISALLOWED_EMPLOYEE_NAME, EmployeeAssignedData, Factory, FactoryCommand, FactoryError,
    FactoryEvent, FactoryService, FactoryState, InventorizeShipmentsInCargoBay, PolicyViolation,
    ProduceCar, Quantity, Schematic, SendShipmentToCargoBay, Shipment, ShipmentArrivedData,
    Stock,
};
pub use scenario::{Expectation, Scenario, ScenarioFailure, ScenarioOutcome};
