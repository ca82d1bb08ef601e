//! Factory service providing a simplified API for factory operations.

use event_store::{AggregateId, EventStore, Version};

use crate::command::{CommandHandler, CommandResult};
use crate::error::DomainError;

use super::{
    AssignEmployee, Factory, FactoryCommand, FactoryEvent, InventorizeShipmentsInCargoBay,
    ProduceCar, SendShipmentToCargoBay,
};

/// Service for running factories stored in an event store.
///
/// Each factory is one stream, addressed by its [`AggregateId`]. Every call
/// rebuilds the factory from its stream, runs one command and appends the
/// resulting event.
pub struct FactoryService<S: EventStore> {
    handler: CommandHandler<S, Factory>,
}

impl<S: EventStore> FactoryService<S> {
    /// Creates a new factory service with the given event store.
    pub fn new(store: S) -> Self {
        Self {
            handler: CommandHandler::new(store),
        }
    }

    /// Returns a reference to the underlying command handler.
    pub fn handler(&self) -> &CommandHandler<S, Factory> {
        &self.handler
    }

    /// Assigns an employee to a factory.
    #[tracing::instrument(skip(self))]
    pub async fn assign_employee(
        &self,
        factory_id: AggregateId,
        cmd: AssignEmployee,
    ) -> Result<CommandResult<Factory>, DomainError> {
        self.handler.execute(factory_id, &cmd).await
    }

    /// Sends a shipment to a factory's cargo bay.
    #[tracing::instrument(skip(self))]
    pub async fn send_shipment_to_cargo_bay(
        &self,
        factory_id: AggregateId,
        cmd: SendShipmentToCargoBay,
    ) -> Result<CommandResult<Factory>, DomainError> {
        self.handler.execute(factory_id, &cmd).await
    }

    /// Inventorizes a factory's cargo bay.
    #[tracing::instrument(skip(self))]
    pub async fn inventorize_shipments_in_cargo_bay(
        &self,
        factory_id: AggregateId,
        cmd: InventorizeShipmentsInCargoBay,
    ) -> Result<CommandResult<Factory>, DomainError> {
        self.handler.execute(factory_id, &cmd).await
    }

    /// Produces a car at a factory.
    #[tracing::instrument(skip(self))]
    pub async fn produce_car(
        &self,
        factory_id: AggregateId,
        cmd: ProduceCar,
    ) -> Result<CommandResult<Factory>, DomainError> {
        self.handler.execute(factory_id, &cmd).await
    }

    /// Runs any factory command.
    #[tracing::instrument(skip(self), fields(command = cmd.name()))]
    pub async fn execute(
        &self,
        factory_id: AggregateId,
        cmd: FactoryCommand,
    ) -> Result<CommandResult<Factory>, DomainError> {
        self.handler.execute(factory_id, &cmd).await
    }

    /// Loads a factory by ID.
    ///
    /// Returns None if the factory has no history.
    #[tracing::instrument(skip(self))]
    pub async fn get_factory(
        &self,
        factory_id: AggregateId,
    ) -> Result<Option<Factory>, DomainError> {
        let (factory, version) = self.handler.load(factory_id).await?;
        if version == Version::initial() {
            Ok(None)
        } else {
            Ok(Some(factory))
        }
    }

    /// Seeds a new factory with an existing history.
    #[tracing::instrument(skip(self, events), fields(count = events.len()))]
    pub async fn import_history(
        &self,
        factory_id: AggregateId,
        events: &[FactoryEvent],
    ) -> Result<Version, DomainError> {
        self.handler.import(factory_id, events).await
    }
}
