//! Factory aggregate implementation.

use crate::aggregate::{Aggregate, DomainEvent, Projection};
use crate::command::Command;

use super::{FactoryError, FactoryEvent, FactoryState, Schematic, Shipment, Stock};

/// Employees going by this name are never let in.
pub const DISALLOWED_EMPLOYEE_NAME: &str = "Bender";

/// Factory aggregate root.
///
/// Employs people, runs a cargo bay and an inventory of car parts, and
/// produces Model T's. Each successful operation records exactly one event
/// and folds it into the state; a rejected operation leaves the factory
/// untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Factory {
    state: FactoryState,
    recorded: Vec<FactoryEvent>,
}

impl Aggregate for Factory {
    type Event = FactoryEvent;
    type State = FactoryState;
    type Error = FactoryError;

    fn aggregate_type() -> &'static str {
        "Factory"
    }

    fn from_events(events: impl IntoIterator<Item = Self::Event>) -> Self {
        let state = events
            .into_iter()
            .fold(FactoryState::default(), |state, event| state.fold(&event));

        Self {
            state,
            recorded: Vec::new(),
        }
    }

    fn state(&self) -> &Self::State {
        &self.state
    }

    fn recorded_events(&self) -> &[Self::Event] {
        &self.recorded
    }
}

// Query methods
impl Factory {
    /// Creates a factory with no history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the most recently recorded event.
    pub fn last_recorded_event(&self) -> Option<&FactoryEvent> {
        self.recorded.last()
    }

    /// Runs any factory command through its [`Command`] implementation.
    pub fn execute<C>(&mut self, command: &C) -> Result<(), FactoryError>
    where
        C: Command<Aggregate = Self> + ?Sized,
    {
        command.execute(self)
    }
}

// Command methods (record events)
impl Factory {
    /// Assigns an employee to the factory.
    pub fn assign_employee(&mut self, employee_name: &str) -> Result<(), FactoryError> {
        if employee_name == DISALLOWED_EMPLOYEE_NAME {
            return Err(FactoryError::DisallowedEmployeeName {
                name: employee_name.to_string(),
            });
        }

        if self.state.has_employee(employee_name) {
            return Err(FactoryError::EmployeeAlreadyAssigned {
                name: employee_name.to_string(),
            });
        }

        self.record_that(FactoryEvent::employee_assigned(employee_name));
        Ok(())
    }

    /// Unloads a shipment into the cargo bay.
    ///
    /// The shipment is recorded as sent; merging into the inventory only
    /// happens when the cargo bay is inventorized.
    pub fn send_shipment_to_cargo_bay(&mut self, shipment: Shipment) -> Result<(), FactoryError> {
        if self.state.employee_count() == 0 {
            return Err(FactoryError::NobodyAtFactory);
        }

        if shipment.is_empty() {
            return Err(FactoryError::EmptyShipment);
        }

        if self.state.cargo_bay_is_full() {
            return Err(FactoryError::CargoBayFull);
        }

        self.record_that(FactoryEvent::shipment_arrived(shipment));
        Ok(())
    }

    /// Moves everything in the cargo bay into the inventory.
    pub fn inventorize_shipments_in_cargo_bay(
        &mut self,
        employee_name: &str,
    ) -> Result<(), FactoryError> {
        if self.state.cargo_bay_is_empty() {
            return Err(FactoryError::NoShipmentsInCargoBay);
        }

        if self.state.has_inventorized_today(employee_name) {
            return Err(FactoryError::AlreadyInventorizedToday {
                employee_name: employee_name.to_string(),
            });
        }

        self.record_that(FactoryEvent::cargo_bay_inventorized(employee_name));
        Ok(())
    }

    /// Builds a car from `schematic`.
    ///
    /// Only checks that the inventory covers the schematic; the recorded
    /// event does not consume any parts.
    pub fn produce_car(
        &mut self,
        employee_name: &str,
        schematic: &Schematic,
    ) -> Result<(), FactoryError> {
        if !schematic.is_model_t() {
            return Err(FactoryError::UnsupportedSchematic {
                schematic: schematic.name.clone(),
            });
        }

        let missing: Vec<_> = schematic
            .required_parts()
            .filter(|(part, required)| {
                self.state
                    .quantity_in_inventory(part)
                    .checked_sub(Stock::from(*required))
                    .is_none()
            })
            .map(|(part, _)| part.clone())
            .collect();

        if !missing.is_empty() {
            return Err(FactoryError::MissingCarParts {
                schematic: schematic.name.clone(),
                missing,
            });
        }

        self.record_that(FactoryEvent::car_produced(employee_name, schematic.clone()));
        Ok(())
    }

    fn record_that(&mut self, event: FactoryEvent) {
        tracing::debug!(event_type = event.event_type(), %event, "recording event");
        self.state.apply(&event);
        self.recorded.push(event);
    }
}
