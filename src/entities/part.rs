//! Part entity type - Component parts made in-house or bought from a supplier

use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::error::{InventoryError, Result};
use crate::core::identity::{EntityKind, PartId};

/// Where a part comes from. Fixed for the lifetime of a part instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum PartSource {
    /// Produced on one of our own machines
    InHouse { machine_id: i32 },
    /// Supplied by an outside company
    Outsourced { company_name: String },
}

impl PartSource {
    /// Short label used in tables and filters
    pub fn label(&self) -> &'static str {
        match self {
            PartSource::InHouse { .. } => "in-house",
            PartSource::Outsourced { .. } => "outsourced",
        }
    }

    /// The variant attribute rendered as text (machine id or company name)
    pub fn detail(&self) -> String {
        match self {
            PartSource::InHouse { machine_id } => machine_id.to_string(),
            PartSource::Outsourced { company_name } => company_name.clone(),
        }
    }
}

impl std::fmt::Display for PartSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A Part entity - a component inventory item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    /// Store-issued identifier
    pub id: PartId,

    /// Display name
    pub name: String,

    /// Unit price
    pub price: f64,

    /// Current inventory level
    pub stock: i32,

    /// Minimum inventory level
    pub min: i32,

    /// Maximum inventory level
    pub max: i32,

    #[serde(flatten)]
    source: PartSource,
}

impl Entity for Part {
    const KIND: EntityKind = EntityKind::Part;

    fn id_string(&self) -> String {
        self.id.to_string()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn price(&self) -> f64 {
        self.price
    }

    fn stock(&self) -> i32 {
        self.stock
    }

    fn min(&self) -> i32 {
        self.min
    }

    fn max(&self) -> i32 {
        self.max
    }
}

impl Part {
    /// Create a new part with the given source
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: PartId,
        name: impl Into<String>,
        price: f64,
        stock: i32,
        min: i32,
        max: i32,
        source: PartSource,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            stock,
            min,
            max,
            source,
        }
    }

    /// Create a part produced in-house on the given machine
    #[allow(clippy::too_many_arguments)]
    pub fn in_house(
        id: PartId,
        name: impl Into<String>,
        price: f64,
        stock: i32,
        min: i32,
        max: i32,
        machine_id: i32,
    ) -> Self {
        Self::new(id, name, price, stock, min, max, PartSource::InHouse { machine_id })
    }

    /// Create a part supplied by an outside company
    #[allow(clippy::too_many_arguments)]
    pub fn outsourced(
        id: PartId,
        name: impl Into<String>,
        price: f64,
        stock: i32,
        min: i32,
        max: i32,
        company_name: impl Into<String>,
    ) -> Self {
        Self::new(
            id,
            name,
            price,
            stock,
            min,
            max,
            PartSource::Outsourced {
                company_name: company_name.into(),
            },
        )
    }

    pub fn source(&self) -> &PartSource {
        &self.source
    }

    pub fn is_in_house(&self) -> bool {
        matches!(self.source, PartSource::InHouse { .. })
    }

    /// Machine id, if this is an in-house part
    pub fn machine_id(&self) -> Option<i32> {
        match self.source {
            PartSource::InHouse { machine_id } => Some(machine_id),
            PartSource::Outsourced { .. } => None,
        }
    }

    /// Company name, if this is an outsourced part
    pub fn company_name(&self) -> Option<&str> {
        match &self.source {
            PartSource::Outsourced { company_name } => Some(company_name),
            PartSource::InHouse { .. } => None,
        }
    }

    /// Change the machine id. Outsourced parts refuse with `VariantMismatch`.
    pub fn set_machine_id(&mut self, value: i32) -> Result<()> {
        match &mut self.source {
            PartSource::InHouse { machine_id } => {
                *machine_id = value;
                Ok(())
            }
            PartSource::Outsourced { .. } => Err(InventoryError::VariantMismatch {
                id: self.id.to_string(),
                expected: "in-house",
            }),
        }
    }

    /// Change the company name. In-house parts refuse with `VariantMismatch`.
    pub fn set_company_name(&mut self, value: impl Into<String>) -> Result<()> {
        match &mut self.source {
            PartSource::Outsourced { company_name } => {
                *company_name = value.into();
                Ok(())
            }
            PartSource::InHouse { .. } => Err(InventoryError::VariantMismatch {
                id: self.id.to_string(),
                expected: "outsourced",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brakes() -> Part {
        Part::in_house(PartId::new(0), "Brakes", 15.00, 3, 1, 10, 101)
    }

    #[test]
    fn test_part_creation() {
        let part = brakes();
        assert_eq!(part.id, PartId::new(0));
        assert_eq!(part.name, "Brakes");
        assert_eq!(part.machine_id(), Some(101));
        assert_eq!(part.company_name(), None);
        assert!(part.is_in_house());
        assert_eq!(part.source().label(), "in-house");
    }

    #[test]
    fn test_variant_setters_respect_the_variant() {
        let mut part = brakes();
        part.set_machine_id(202).unwrap();
        assert_eq!(part.machine_id(), Some(202));
        assert!(matches!(
            part.set_company_name("Acme"),
            Err(InventoryError::VariantMismatch {
                expected: "outsourced",
                ..
            })
        ));
        assert!(part.is_in_house());

        let mut light = Part::outsourced(PartId::new(3), "Light", 20.00, 5, 1, 10, "Honeywell");
        light.set_company_name("Bosch").unwrap();
        assert_eq!(light.company_name(), Some("Bosch"));
        assert!(light.set_machine_id(5).is_err());
    }

    #[test]
    fn test_scalar_fields_are_mutable() {
        let mut part = brakes();
        part.name = "Disc Brakes".to_string();
        part.stock = 7;
        assert_eq!(part.name(), "Disc Brakes");
        assert_eq!(Entity::stock(&part), 7);
        assert_eq!(part.machine_id(), Some(101));
    }

    #[test]
    fn test_source_serialization() {
        let yaml = serde_yml::to_string(&brakes()).unwrap();
        assert!(yaml.contains("source: in_house"));
        assert!(yaml.contains("machine_id: 101"));

        let light = Part::outsourced(PartId::new(3), "Light", 20.00, 5, 1, 10, "Honeywell");
        let json = serde_json::to_value(&light).unwrap();
        assert_eq!(json["source"], "outsourced");
        assert_eq!(json["company_name"], "Honeywell");
        assert_eq!(json["id"], 3);
    }

    #[test]
    fn test_part_deserializes_from_yaml() {
        let yaml = "id: 4\nname: Chain\nprice: 9.5\nstock: 2\nmin: 1\nmax: 5\nsource: outsourced\ncompany_name: Shimano\n";
        let part: Part = serde_yml::from_str(yaml).unwrap();
        assert_eq!(part.id, PartId::new(4));
        assert_eq!(part.company_name(), Some("Shimano"));
    }
}
