//! Factory state projection.

use std::collections::{BTreeMap, BTreeSet};

use crate::aggregate::Projection;

use super::{CarPart, FactoryEvent, Shipment, Stock};

/// Maximum number of shipments the cargo bay holds at once.
pub const CARGO_BAY_CAPACITY: usize = 2;

/// Everything the factory needs to know to guard its invariants.
///
/// Only ever built by folding [`FactoryEvent`]s; the empty state is the
/// starting point of every replay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactoryState {
    employees: BTreeSet<String>,
    cargo_bay: Vec<Shipment>,
    inventorized_today: BTreeSet<String>,
    inventory: BTreeMap<CarPart, Stock>,
}

impl Projection for FactoryState {
    type Event = FactoryEvent;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            FactoryEvent::EmployeeAssigned(data) => {
                self.employees.insert(data.employee_name.clone());
            }
            FactoryEvent::ShipmentArrived(data) => {
                self.cargo_bay.push(data.shipment.clone());
            }
            FactoryEvent::CargoBayInventorized(data) => {
                self.apply_cargo_bay_inventorized(&data.employee_name)
            }
            FactoryEvent::CarProduced(_) => {
                // Parts are checked when the command runs, not consumed here.
            }
        }
    }
}

impl FactoryState {
    fn apply_cargo_bay_inventorized(&mut self, employee_name: &str) {
        self.inventorized_today.insert(employee_name.to_string());

        for shipment in self.cargo_bay.drain(..) {
            for (part, quantity) in shipment.parts() {
                let stock = self.inventory.entry(part.clone()).or_insert(0);
                *stock = stock.saturating_add(Stock::from(quantity));
            }
        }
    }
}

// Query methods
impl FactoryState {
    /// Returns true if `name` is currently assigned to the factory.
    pub fn has_employee(&self, name: &str) -> bool {
        self.employees.contains(name)
    }

    /// Returns the number of employees currently assigned.
    pub fn employee_count(&self) -> usize {
        self.employees.len()
    }

    /// Iterates over the assigned employees in name order.
    pub fn employees(&self) -> impl Iterator<Item = &str> {
        self.employees.iter().map(String::as_str)
    }

    /// Returns the shipments waiting in the cargo bay, oldest first.
    pub fn shipments_in_cargo_bay(&self) -> &[Shipment] {
        &self.cargo_bay
    }

    /// Returns true if the cargo bay holds no shipments.
    pub fn cargo_bay_is_empty(&self) -> bool {
        self.cargo_bay.is_empty()
    }

    /// Returns true if no further shipment fits in the cargo bay.
    pub fn cargo_bay_is_full(&self) -> bool {
        self.cargo_bay.len() >= CARGO_BAY_CAPACITY
    }

    /// Returns true if `name` already inventorized the cargo bay today.
    pub fn has_inventorized_today(&self, name: &str) -> bool {
        self.inventorized_today.contains(name)
    }

    /// Returns the number of units of `part` in the inventory.
    pub fn quantity_in_inventory(&self, part: &CarPart) -> Stock {
        self.inventory.get(part).copied().unwrap_or(0)
    }

    /// Returns the whole inventory, keyed by part.
    pub fn inventory(&self) -> &BTreeMap<CarPart, Stock> {
        &self.inventory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{Quantity, Schematic};

    fn shipment(parts: &[(&str, Quantity)]) -> Shipment {
        parts.iter().map(|(part, qty)| (*part, *qty)).collect()
    }

    #[test]
    fn test_default_state_is_empty() {
        let state = FactoryState::default();
        assert_eq!(state.employee_count(), 0);
        assert!(state.cargo_bay_is_empty());
        assert!(!state.cargo_bay_is_full());
        assert!(state.inventory().is_empty());
    }

    #[test]
    fn test_employee_assigned_adds_member() {
        let state = FactoryState::project(&[
            FactoryEvent::employee_assigned("John"),
            FactoryEvent::employee_assigned("Jeff"),
            FactoryEvent::employee_assigned("John"),
        ]);

        assert_eq!(state.employee_count(), 2);
        assert!(state.has_employee("John"));
        assert_eq!(state.employees().collect::<Vec<_>>(), vec!["Jeff", "John"]);
    }

    #[test]
    fn test_shipments_queue_up_in_cargo_bay() {
        let state = FactoryState::project(&[
            FactoryEvent::shipment_arrived(shipment(&[("Engine", 1)])),
            FactoryEvent::shipment_arrived(shipment(&[("Engine", 1)])),
        ]);

        assert_eq!(state.shipments_in_cargo_bay().len(), 2);
        assert!(state.cargo_bay_is_full());
        assert!(state.inventory().is_empty());
    }

    #[test]
    fn test_inventorize_merges_and_clears_cargo_bay() {
        let state = FactoryState::project(&[
            FactoryEvent::shipment_arrived(shipment(&[("Wheel", 3), ("Engine", 1)])),
            FactoryEvent::shipment_arrived(shipment(&[("Wheel", 3), ("Bits and pieces", 2)])),
            FactoryEvent::cargo_bay_inventorized("Jeff"),
        ]);

        assert!(state.cargo_bay_is_empty());
        assert!(state.has_inventorized_today("Jeff"));
        assert_eq!(state.quantity_in_inventory(&"Wheel".into()), 6);
        assert_eq!(state.quantity_in_inventory(&"Engine".into()), 1);
        assert_eq!(state.quantity_in_inventory(&"Bits and pieces".into()), 2);
    }

    #[test]
    fn test_inventory_accumulates_across_inventorizations() {
        let state = FactoryState::project(&[
            FactoryEvent::shipment_arrived(shipment(&[("Wheel", 2)])),
            FactoryEvent::cargo_bay_inventorized("Jeff"),
            FactoryEvent::shipment_arrived(shipment(&[("Wheel", 5)])),
            FactoryEvent::cargo_bay_inventorized("John"),
        ]);

        assert_eq!(state.quantity_in_inventory(&"Wheel".into()), 7);
        assert!(state.has_inventorized_today("Jeff"));
        assert!(state.has_inventorized_today("John"));
    }

    #[test]
    fn test_inventory_keeps_every_unit_past_a_single_shipment_limit() {
        let state = FactoryState::project(&[
            FactoryEvent::shipment_arrived(shipment(&[("Wheel", Quantity::MAX)])),
            FactoryEvent::shipment_arrived(shipment(&[("Wheel", Quantity::MAX)])),
            FactoryEvent::cargo_bay_inventorized("Jeff"),
        ]);

        assert_eq!(
            state.quantity_in_inventory(&"Wheel".into()),
            2 * Stock::from(Quantity::MAX)
        );
        assert_eq!(state.quantity_in_inventory(&"Wheel".into()), 8_589_934_590);
    }

    #[test]
    fn test_inventorizing_empty_cargo_bay_only_marks_employee() {
        let state = FactoryState::project(&[FactoryEvent::cargo_bay_inventorized("Jeff")]);

        assert!(state.has_inventorized_today("Jeff"));
        assert!(state.inventory().is_empty());
    }

    #[test]
    fn test_car_produced_leaves_state_untouched() {
        let before = FactoryState::project(&[
            FactoryEvent::shipment_arrived(shipment(&[("Wheel", 6), ("Engine", 1)])),
            FactoryEvent::cargo_bay_inventorized("Jeff"),
        ]);

        let after = before
            .clone()
            .fold(&FactoryEvent::car_produced("Jeff", Schematic::model_t()));

        assert_eq!(before, after);
    }
}
