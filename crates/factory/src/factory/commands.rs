//! Factory commands.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::command::Command;

use super::{Factory, FactoryError, Schematic, Shipment};

/// Command to assign an employee to the factory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignEmployee {
    pub name: String,
}

impl AssignEmployee {
    /// Creates a new AssignEmployee command.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for AssignEmployee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Assign an employee named \"{}\" to factory", self.name)
    }
}

impl Command for AssignEmployee {
    type Aggregate = Factory;

    fn execute(&self, factory: &mut Factory) -> Result<(), FactoryError> {
        factory.assign_employee(&self.name)
    }
}

/// Command to send a shipment to the cargo bay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendShipmentToCargoBay {
    pub shipment: Shipment,
}

impl SendShipmentToCargoBay {
    /// Creates a new SendShipmentToCargoBay command.
    pub fn new(shipment: Shipment) -> Self {
        Self { shipment }
    }
}

impl fmt::Display for SendShipmentToCargoBay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Send a shipment containing {} to cargo bay",
            self.shipment
        )
    }
}

impl Command for SendShipmentToCargoBay {
    type Aggregate = Factory;

    fn execute(&self, factory: &mut Factory) -> Result<(), FactoryError> {
        factory.send_shipment_to_cargo_bay(self.shipment.clone())
    }
}

/// Command to inventorize whatever sits in the cargo bay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorizeShipmentsInCargoBay {
    pub employee_name: String,
}

impl InventorizeShipmentsInCargoBay {
    /// Creates a new InventorizeShipmentsInCargoBay command.
    pub fn new(employee_name: impl Into<String>) -> Self {
        Self {
            employee_name: employee_name.into(),
        }
    }
}

impl fmt::Display for InventorizeShipmentsInCargoBay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} inventorize the items currently in cargo bay",
            self.employee_name
        )
    }
}

impl Command for InventorizeShipmentsInCargoBay {
    type Aggregate = Factory;

    fn execute(&self, factory: &mut Factory) -> Result<(), FactoryError> {
        factory.inventorize_shipments_in_cargo_bay(&self.employee_name)
    }
}

/// Command to produce a car.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProduceCar {
    pub employee_name: String,
    pub schematic: Schematic,
}

impl ProduceCar {
    /// Creates a new ProduceCar command.
    pub fn new(employee_name: impl Into<String>, schematic: Schematic) -> Self {
        Self {
            employee_name: employee_name.into(),
            schematic,
        }
    }

    /// Creates a command to produce a Model T.
    pub fn model_t(employee_name: impl Into<String>) -> Self {
        Self::new(employee_name, Schematic::model_t())
    }
}

impl fmt::Display for ProduceCar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} produce a car named {}",
            self.employee_name, self.schematic.name
        )
    }
}

impl Command for ProduceCar {
    type Aggregate = Factory;

    fn execute(&self, factory: &mut Factory) -> Result<(), FactoryError> {
        factory.produce_car(&self.employee_name, &self.schematic)
    }
}

/// Any command the factory understands.
///
/// Serialized the same way as [`FactoryEvent`](super::FactoryEvent), which is
/// how scenario files spell out their `when` steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum FactoryCommand {
    AssignEmployee(AssignEmployee),
    SendShipmentToCargoBay(SendShipmentToCargoBay),
    InventorizeShipmentsInCargoBay(InventorizeShipmentsInCargoBay),
    ProduceCar(ProduceCar),
}

impl FactoryCommand {
    /// Returns the command name, matching its serialized tag.
    pub fn name(&self) -> &'static str {
        match self {
            FactoryCommand::AssignEmployee(_) => "AssignEmployee",
            FactoryCommand::SendShipmentToCargoBay(_) => "SendShipmentToCargoBay",
            FactoryCommand::InventorizeShipmentsInCargoBay(_) => "InventorizeShipmentsInCargoBay",
            FactoryCommand::ProduceCar(_) => "ProduceCar",
        }
    }
}

impl fmt::Display for FactoryCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactoryCommand::AssignEmployee(cmd) => fmt::Display::fmt(cmd, f),
            FactoryCommand::SendShipmentToCargoBay(cmd) => fmt::Display::fmt(cmd, f),
            FactoryCommand::InventorizeShipmentsInCargoBay(cmd) => fmt::Display::fmt(cmd, f),
            FactoryCommand::ProduceCar(cmd) => fmt::Display::fmt(cmd, f),
        }
    }
}

impl Command for FactoryCommand {
    type Aggregate = Factory;

    fn execute(&self, factory: &mut Factory) -> Result<(), FactoryError> {
        match self {
            FactoryCommand::AssignEmployee(cmd) => cmd.execute(factory),
            FactoryCommand::SendShipmentToCargoBay(cmd) => cmd.execute(factory),
            FactoryCommand::InventorizeShipmentsInCargoBay(cmd) => cmd.execute(factory),
            FactoryCommand::ProduceCar(cmd) => cmd.execute(factory),
        }
    }
}

impl From<AssignEmployee> for FactoryCommand {
    fn from(cmd: AssignEmployee) -> Self {
        FactoryCommand::AssignEmployee(cmd)
    }
}

impl From<SendShipmentToCargoBay> for FactoryCommand {
    fn from(cmd: SendShipmentToCargoBay) -> Self {
        FactoryCommand::SendShipmentToCargoBay(cmd)
    }
}

impl From<InventorizeShipmentsInCargoBay> for FactoryCommand {
    fn from(cmd: InventorizeShipmentsInCargoBay) -> Self {
        FactoryCommand::InventorizeShipmentsInCargoBay(cmd)
    }
}

impl From<ProduceCar> for FactoryCommand {
    fn from(cmd: ProduceCar) -> Self {
        FactoryCommand::ProduceCar(cmd)
    }
}
