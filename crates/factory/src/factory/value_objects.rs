//! Value objects for the factory domain.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Number of units of a car part in a shipment or schematic.
pub type Quantity = u32;

/// Number of units of a car part held in the inventory.
///
/// Wider than [`Quantity`] so that merging any number of shipments keeps
/// every unit.
pub type Stock = u64;

/// Identifier of a car part (e.g. "Wheel", "Engine").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CarPart(String);

impl CarPart {
    /// Creates a car part identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the part name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CarPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CarPart {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CarPart {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for CarPart {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn fmt_parts(
    parts: &BTreeMap<CarPart, Quantity>,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    let mut first = true;
    for (part, quantity) in parts.iter().filter(|(_, q)| **q > 0) {
        if !first {
            f.write_str(", ")?;
        }
        write!(f, "{quantity} {part}")?;
        first = false;
    }
    if first {
        f.write_str("nothing")?;
    }
    Ok(())
}

/// A delivery of car parts, keyed by part.
///
/// Zero quantities carry no meaning and are never stored, whether the
/// shipment is built or deserialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<CarPart, Quantity>",
    into = "BTreeMap<CarPart, Quantity>"
)]
pub struct Shipment(BTreeMap<CarPart, Quantity>);

impl Shipment {
    /// Creates an empty shipment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` units of `part`, summing with any units already present.
    pub fn with_part(mut self, part: impl Into<CarPart>, quantity: Quantity) -> Self {
        if quantity > 0 {
            let entry = self.0.entry(part.into()).or_insert(0);
            *entry = entry.saturating_add(quantity);
        }
        self
    }

    /// Returns true if the shipment carries no units at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of units of `part` in the shipment.
    pub fn quantity_of(&self, part: &CarPart) -> Quantity {
        self.0.get(part).copied().unwrap_or(0)
    }

    /// Iterates over the parts in the shipment, ordered by part name.
    pub fn parts(&self) -> impl Iterator<Item = (&CarPart, Quantity)> {
        self.0.iter().map(|(part, quantity)| (part, *quantity))
    }
}

impl<P: Into<CarPart>> FromIterator<(P, Quantity)> for Shipment {
    fn from_iter<I: IntoIterator<Item = (P, Quantity)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |shipment, (part, quantity)| {
                shipment.with_part(part, quantity)
            })
    }
}

impl From<BTreeMap<CarPart, Quantity>> for Shipment {
    fn from(parts: BTreeMap<CarPart, Quantity>) -> Self {
        parts.into_iter().collect()
    }
}

impl From<Shipment> for BTreeMap<CarPart, Quantity> {
    fn from(shipment: Shipment) -> Self {
        shipment.0
    }
}

impl std::fmt::Display for Shipment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt_parts(&self.0, f)
    }
}

/// A named bill of materials for one buildable car.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schematic {
    /// Name of the car model this schematic builds.
    pub name: String,

    /// Units of each part needed to build one car.
    pub parts: BTreeMap<CarPart, Quantity>,
}

impl Schematic {
    /// Name of the only model the factory knows how to build.
    pub const MODEL_T: &'static str = "Model T";

    /// Creates a schematic without any parts.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parts: BTreeMap::new(),
        }
    }

    /// Sets the required quantity of `part`.
    pub fn with_part(mut self, part: impl Into<CarPart>, quantity: Quantity) -> Self {
        self.parts.insert(part.into(), quantity);
        self
    }

    /// The Model T bill of materials.
    pub fn model_t() -> Self {
        Self::new(Self::MODEL_T)
            .with_part("Wheel", 6)
            .with_part("Engine", 1)
            .with_part("Bits and pieces", 2)
    }

    /// Returns true if this schematic builds a Model T.
    pub fn is_model_t(&self) -> bool {
        self.name == Self::MODEL_T
    }

    /// Iterates over the required parts, ordered by part name.
    pub fn required_parts(&self) -> impl Iterator<Item = (&CarPart, Quantity)> {
        self.parts.iter().map(|(part, quantity)| (part, *quantity))
    }
}

impl std::fmt::Display for Schematic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (", self.name)?;
        fmt_parts(&self.parts, f)?;
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_car_part_string_conversion() {
        let part = CarPart::new("Wheel");
        assert_eq!(part.as_str(), "Wheel");

        let part: CarPart = "Engine".into();
        assert_eq!(part.to_string(), "Engine");
    }

    #[test]
    fn test_shipment_drops_zero_quantities() {
        let shipment = Shipment::new().with_part("Engine", 0);
        assert!(shipment.is_empty());
        assert_eq!(shipment.parts().count(), 0);
    }

    #[test]
    fn test_shipment_sums_repeated_parts() {
        let shipment = Shipment::new().with_part("Wheel", 3).with_part("Wheel", 4);
        assert_eq!(shipment.quantity_of(&CarPart::new("Wheel")), 7);
    }

    #[test]
    fn test_shipment_with_only_zero_entries_is_empty() {
        let shipment: Shipment = serde_json::from_str(r#"{"Engine": 0}"#).unwrap();
        assert!(shipment.is_empty());
        assert_eq!(shipment, Shipment::new());
    }

    #[test]
    fn test_deserialized_shipment_drops_zero_quantities() {
        let shipment: Shipment = serde_json::from_str(r#"{"Engine": 0, "Wheel": 1}"#).unwrap();

        assert_eq!(shipment, Shipment::new().with_part("Wheel", 1));
        assert_eq!(
            serde_json::to_value(&shipment).unwrap(),
            serde_json::json!({"Wheel": 1})
        );
    }

    #[test]
    fn test_shipment_from_iter() {
        let shipment: Shipment = [("Engine", 1), ("Wheel", 4)].into_iter().collect();
        assert_eq!(shipment.quantity_of(&"Engine".into()), 1);
        assert_eq!(shipment.quantity_of(&"Wheel".into()), 4);
        assert_eq!(shipment.quantity_of(&"Seat".into()), 0);
    }

    #[test]
    fn test_shipment_display_is_ordered() {
        let shipment: Shipment = [("Wheel", 3), ("Engine", 1)].into_iter().collect();
        assert_eq!(shipment.to_string(), "1 Engine, 3 Wheel");
        assert_eq!(Shipment::new().to_string(), "nothing");
    }

    #[test]
    fn test_shipment_serializes_as_map() {
        let shipment: Shipment = [("Engine", 1)].into_iter().collect();
        let json = serde_json::to_value(&shipment).unwrap();
        assert_eq!(json, serde_json::json!({"Engine": 1}));
    }

    #[test]
    fn test_model_t_schematic() {
        let schematic = Schematic::model_t();
        assert!(schematic.is_model_t());
        assert_eq!(schematic.parts.len(), 3);
        assert_eq!(schematic.parts[&CarPart::new("Wheel")], 6);
        assert_eq!(schematic.parts[&CarPart::new("Engine")], 1);
        assert_eq!(schematic.parts[&CarPart::new("Bits and pieces")], 2);
    }

    #[test]
    fn test_other_schematic_is_not_model_t() {
        let schematic = Schematic::new("Opel Corsa").with_part("Engine", 1);
        assert!(!schematic.is_model_t());
        assert_eq!(schematic.to_string(), "Opel Corsa (1 Engine)");
    }
}
