//! Inventory error taxonomy with diagnostics

use miette::Diagnostic;
use thiserror::Error;

use crate::core::identity::EntityKind;

/// Errors reported by the inventory store and its validation rules
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum InventoryError {
    #[error("name may not be empty")]
    #[diagnostic(code(inventory::validation::empty_name))]
    EmptyName,

    #[error("price must be a non-negative amount, got {price}")]
    #[diagnostic(code(inventory::validation::price))]
    InvalidPrice { price: f64 },

    #[error("invalid minimum {min} for maximum {max}")]
    #[diagnostic(
        code(inventory::validation::minimum),
        help("minimum must be greater than 0 and less than maximum")
    )]
    InvalidMinimum { min: i32, max: i32 },

    #[error("invalid inventory level {stock} (bounds {min}..={max})")]
    #[diagnostic(
        code(inventory::validation::inventory_level),
        help("inventory must be equal to or between minimum and maximum")
    )]
    InvalidInventoryLevel { stock: i32, min: i32, max: i32 },

    #[error("invalid machine id '{value}'")]
    #[diagnostic(
        code(inventory::validation::machine_id),
        help("machine id contains numbers only")
    )]
    InvalidVariantIdentifier { value: String },

    #[error("company name may not be empty")]
    #[diagnostic(code(inventory::validation::company_name))]
    EmptyCompanyName,

    #[error("part {id} is not {expected}")]
    #[diagnostic(code(inventory::part::variant_mismatch))]
    VariantMismatch { id: String, expected: &'static str },

    #[error("no {kind} found with id {id}")]
    #[diagnostic(code(inventory::not_found))]
    NotFound { kind: EntityKind, id: String },

    #[error("{kind} index {index} is out of range (collection holds {len})")]
    #[diagnostic(
        code(inventory::index_out_of_range),
        help("list the collection again; positions change after deletions")
    )]
    IndexOutOfRange {
        kind: EntityKind,
        index: usize,
        len: usize,
    },

    #[error("product {id} still has {count} associated part(s)")]
    #[diagnostic(
        code(inventory::product::associations_present),
        help("remove every associated part before deleting the product")
    )]
    AssociationsPresent { id: String, count: usize },

    #[error("no {kind} ids left to issue")]
    #[diagnostic(
        code(inventory::ids_exhausted),
        help("every {kind} id up to the largest supported value has been issued")
    )]
    IdsExhausted { kind: EntityKind },

    #[error("inventory is still shared by {others} other handle(s)")]
    #[diagnostic(
        code(inventory::still_shared),
        help("drop the other handles first, or take a snapshot instead")
    )]
    StillShared { others: usize },

    #[error("inventory lock poisoned")]
    #[diagnostic(code(inventory::poisoned))]
    Poisoned,
}

impl InventoryError {
    pub(crate) fn part_not_found(id: impl ToString) -> Self {
        InventoryError::NotFound {
            kind: EntityKind::Part,
            id: id.to_string(),
        }
    }

    pub(crate) fn product_not_found(id: impl ToString) -> Self {
        InventoryError::NotFound {
            kind: EntityKind::Product,
            id: id.to_string(),
        }
    }

    /// Whether this error came from the validation rules (as opposed to a lookup or lifecycle rule)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            InventoryError::EmptyName
                | InventoryError::InvalidPrice { .. }
                | InventoryError::InvalidMinimum { .. }
                | InventoryError::InvalidInventoryLevel { .. }
                | InventoryError::InvalidVariantIdentifier { .. }
                | InventoryError::EmptyCompanyName
        )
    }
}

pub type Result<T, E = InventoryError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_values() {
        let err = InventoryError::InvalidInventoryLevel {
            stock: 11,
            min: 1,
            max: 10,
        };
        assert_eq!(err.to_string(), "invalid inventory level 11 (bounds 1..=10)");

        let err = InventoryError::part_not_found(7);
        assert_eq!(err.to_string(), "no part found with id 7");
    }

    #[test]
    fn test_validation_classification() {
        assert!(InventoryError::EmptyName.is_validation());
        assert!(InventoryError::InvalidMinimum { min: 0, max: 10 }.is_validation());
        assert!(!InventoryError::product_not_found(1).is_validation());
        assert!(!InventoryError::AssociationsPresent {
            id: "0".into(),
            count: 1
        }
        .is_validation());
    }
}
