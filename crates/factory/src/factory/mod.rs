//! Factory aggregate and related types.

mod aggregate;
mod commands;
mod events;
mod service;
mod state;
mod value_objects;

pub use aggregate::{DISALLOWED_EMPLOYEE_NAME, Factory};
pub use commands::*;
pub use events::{
    CarProducedData, CargoBayInventorizedData, EmployeeAssignedData, FactoryEvent,
    ShipmentArrivedData,
};
pub use service::FactoryService;
pub use state::{CARGO_BAY_CAPACITY, FactoryState};
pub use value_objects::{CarPart, Quantity, Schematic, Shipment, Stock};

use thiserror::Error;

/// Reasons the factory rejects a command.
///
/// The rendered messages are part of the contract: scenario fixtures compare
/// them verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FactoryError {
    #[error("Employees named \"{name}\" are trouble")]
    DisallowedEmployeeName { name: String },

    #[error("An employee named \"{name}\" was already assigned to the factory")]
    EmployeeAlreadyAssigned { name: String },

    #[error("There has to be somebody at the factory in order to accept the shipment")]
    NobodyAtFactory,

    #[error("Empty shipments are not accepted")]
    EmptyShipment,

    #[error("Cargo bay has a maximum capacity of two shipments")]
    CargoBayFull,

    #[error("There are no shipments to inventorize in the cargo bay")]
    NoShipmentsInCargoBay,

    #[error("{employee_name} has already inventorized the cargo bay today")]
    AlreadyInventorizedToday { employee_name: String },

    #[error("Only Model T's can be produced")]
    UnsupportedSchematic { schematic: String },

    #[error("The required carparts for building a {schematic} are not in the inventory")]
    MissingCarParts {
        schematic: String,
        missing: Vec<CarPart>,
    },
}

/// The policy a rejected command violated, without any detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyViolation {
    DisallowedName,
    DuplicateAssignment,
    UnattendedCargoBay,
    EmptyShipment,
    CargoBayOverflow,
    EmptyCargoBay,
    DuplicateInventorization,
    UnsupportedSchematic,
    InsufficientInventory,
}

impl FactoryError {
    /// Returns the violated policy.
    pub fn kind(&self) -> PolicyViolation {
        match self {
            FactoryError::DisallowedEmployeeName { .. } => PolicyViolation::DisallowedName,
            FactoryError::EmployeeAlreadyAssigned { .. } => PolicyViolation::DuplicateAssignment,
            FactoryError::NobodyAtFactory => PolicyViolation::UnattendedCargoBay,
            FactoryError::EmptyShipment => PolicyViolation::EmptyShipment,
            FactoryError::CargoBayFull => PolicyViolation::CargoBayOverflow,
            FactoryError::NoShipmentsInCargoBay => PolicyViolation::EmptyCargoBay,
            FactoryError::AlreadyInventorizedToday { .. } => {
                PolicyViolation::DuplicateInventorization
            }
            FactoryError::UnsupportedSchematic { .. } => PolicyViolation::UnsupportedSchematic,
            FactoryError::MissingCarParts { .. } => PolicyViolation::InsufficientInventory,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_match_fixtures() {
        let cases = [
            (
                FactoryError::DisallowedEmployeeName {
                    name: "Bender".to_string(),
                },
                "Employees named \"Bender\" are trouble",
            ),
            (
                FactoryError::EmployeeAlreadyAssigned {
                    name: "John".to_string(),
                },
                "An employee named \"John\" was already assigned to the factory",
            ),
            (
                FactoryError::NobodyAtFactory,
                "There has to be somebody at the factory in order to accept the shipment",
            ),
            (FactoryError::EmptyShipment, "Empty shipments are not accepted"),
            (
                FactoryError::CargoBayFull,
                "Cargo bay has a maximum capacity of two shipments",
            ),
            (
                FactoryError::NoShipmentsInCargoBay,
                "There are no shipments to inventorize in the cargo bay",
            ),
            (
                FactoryError::AlreadyInventorizedToday {
                    employee_name: "Jeff".to_string(),
                },
                "Jeff has already inventorized the cargo bay today",
            ),
            (
                FactoryError::UnsupportedSchematic {
                    schematic: "Opel Corsa".to_string(),
                },
                "Only Model T's can be produced",
            ),
            (
                FactoryError::MissingCarParts {
                    schematic: "Model T".to_string(),
                    missing: vec![CarPart::new("Wheel")],
                },
                "The required carparts for building a Model T are not in the inventory",
            ),
        ];

        for (error, message) in cases {
            assert_eq!(error.to_string(), message);
        }
    }

    #[test]
    fn test_kind() {
        assert_eq!(FactoryError::CargoBayFull.kind(), PolicyViolation::CargoBayOverflow);
        assert_eq!(
            FactoryError::MissingCarParts {
                schematic: "Model T".to_string(),
                missing: vec![],
            }
            .kind(),
            PolicyViolation::InsufficientInventory
        );
    }
}
