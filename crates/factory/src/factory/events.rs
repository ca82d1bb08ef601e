//! Factory domain events.

use serde::{Deserialize, Serialize};

use crate::aggregate::DomainEvent;

use super::{Schematic, Shipment};

/// Facts recorded by the factory.
///
/// Serialized adjacently tagged (`{"type": ..., "data": ...}`); the tag
/// doubles as the envelope's event type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum FactoryEvent {
    /// An employee started working at the factory.
    EmployeeAssigned(EmployeeAssignedData),

    /// A shipment was unloaded into the cargo bay.
    ShipmentArrived(ShipmentArrivedData),

    /// An employee moved the cargo bay contents into the inventory.
    CargoBayInventorized(CargoBayInventorizedData),

    /// An employee built a car.
    CarProduced(CarProducedData),
}

impl DomainEvent for FactoryEvent {
    const EVENT_TYPES: &'static [&'static str] = &[
        "EmployeeAssigned",
        "ShipmentArrived",
        "CargoBayInventorized",
        "CarProduced",
    ];

    fn event_type(&self) -> &'static str {
        match self {
            FactoryEvent::EmployeeAssigned(_) => "EmployeeAssigned",
            FactoryEvent::ShipmentArrived(_) => "ShipmentArrived",
            FactoryEvent::CargoBayInventorized(_) => "CargoBayInventorized",
            FactoryEvent::CarProduced(_) => "CarProduced",
        }
    }
}

impl std::fmt::Display for FactoryEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FactoryEvent::EmployeeAssigned(data) => {
                write!(f, "{} was assigned to factory", data.employee_name)
            }
            FactoryEvent::ShipmentArrived(data) => {
                write!(f, "Shipment containing {} arrived in cargo bay", data.shipment)
            }
            FactoryEvent::CargoBayInventorized(data) => {
                write!(f, "{} inventorized the cargo bay", data.employee_name)
            }
            FactoryEvent::CarProduced(data) => write!(
                f,
                "{} produced a car of model {}",
                data.employee_name, data.schematic.name
            ),
        }
    }
}

/// Data for EmployeeAssigned event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeAssignedData {
    pub employee_name: String,
}

/// Data for ShipmentArrived event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentArrivedData {
    /// The shipment exactly as it was sent.
    pub shipment: Shipment,
}

/// Data for CargoBayInventorized event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CargoBayInventorizedData {
    pub employee_name: String,
}

/// Data for CarProduced event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarProducedData {
    pub employee_name: String,

    /// The schematic the car was built from.
    pub schematic: Schematic,
}

// Convenience constructors for events
impl FactoryEvent {
    /// Creates an EmployeeAssigned event.
    pub fn employee_assigned(employee_name: impl Into<String>) -> Self {
        FactoryEvent::EmployeeAssigned(EmployeeAssignedData {
            employee_name: employee_name.into(),
        })
    }

    /// Creates a ShipmentArrived event.
    pub fn shipment_arrived(shipment: Shipment) -> Self {
        FactoryEvent::ShipmentArrived(ShipmentArrivedData { shipment })
    }

    /// Creates a CargoBayInventorized event.
    pub fn cargo_bay_inventorized(employee_name: impl Into<String>) -> Self {
        FactoryEvent::CargoBayInventorized(CargoBayInventorizedData {
            employee_name: employee_name.into(),
        })
    }

    /// Creates a CarProduced event.
    pub fn car_produced(employee_name: impl Into<String>, schematic: Schematic) -> Self {
        FactoryEvent::CarProduced(CarProducedData {
            employee_name: employee_name.into(),
            schematic,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_shipment() -> Shipment {
        Shipment::new().with_part("Engine", 1)
    }

    #[test]
    fn test_event_type() {
        let event = FactoryEvent::employee_assigned("Jeff");
        assert_eq!(event.event_type(), "EmployeeAssigned");

        let event = FactoryEvent::shipment_arrived(engine_shipment());
        assert_eq!(event.event_type(), "ShipmentArrived");

        let event = FactoryEvent::cargo_bay_inventorized("Jeff");
        assert_eq!(event.event_type(), "CargoBayInventorized");

        let event = FactoryEvent::car_produced("Jeff", Schematic::model_t());
        assert_eq!(event.event_type(), "CarProduced");
    }

    #[test]
    fn test_every_variant_is_a_known_type() {
        let events = [
            FactoryEvent::employee_assigned("Jeff"),
            FactoryEvent::shipment_arrived(engine_shipment()),
            FactoryEvent::cargo_bay_inventorized("Jeff"),
            FactoryEvent::car_produced("Jeff", Schematic::model_t()),
        ];
        for event in &events {
            assert!(FactoryEvent::is_known_type(event.event_type()));
        }
        assert!(!FactoryEvent::is_known_type("FactoryClosed"));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            FactoryEvent::employee_assigned("Jeff").to_string(),
            "Jeff was assigned to factory"
        );
        assert_eq!(
            FactoryEvent::shipment_arrived(engine_shipment()).to_string(),
            "Shipment containing 1 Engine arrived in cargo bay"
        );
        assert_eq!(
            FactoryEvent::cargo_bay_inventorized("Jeff").to_string(),
            "Jeff inventorized the cargo bay"
        );
        assert_eq!(
            FactoryEvent::car_produced("Jeff", Schematic::model_t()).to_string(),
            "Jeff produced a car of model Model T"
        );
    }

    #[test]
    fn test_serialized_tag_matches_event_type() {
        let event = FactoryEvent::employee_assigned("Jeff");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "EmployeeAssigned", "data": {"employee_name": "Jeff"}})
        );
    }

    #[test]
    fn test_car_produced_serialization() {
        let event = FactoryEvent::car_produced("Jeff", Schematic::model_t());

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: FactoryEvent = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized, event);
        if let FactoryEvent::CarProduced(data) = deserialized {
            assert_eq!(data.employee_name, "Jeff");
            assert!(data.schematic.is_model_t());
        } else {
            panic!("Expected CarProduced event");
        }
    }

    #[test]
    fn test_unknown_tag_fails_to_deserialize() {
        let result = serde_json::from_value::<FactoryEvent>(
            serde_json::json!({"type": "FactoryClosed", "data": {}}),
        );
        assert!(result.is_err());
    }
}
