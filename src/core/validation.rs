//! Validation rules gating every create and replace
//!
//! Checks run in a fixed order (name, price, minimum, inventory level, then
//! the variant attribute) and the first failure is returned.

use crate::core::entity::Entity;
use crate::core::error::{InventoryError, Result};
use crate::entities::part::{Part, PartSource};

/// Fails with [`InventoryError::EmptyName`] if the name is blank
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(InventoryError::EmptyName);
    }
    Ok(())
}

/// Fails with [`InventoryError::InvalidPrice`] for negative or non-finite prices
pub fn validate_price(price: f64) -> Result<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(InventoryError::InvalidPrice { price });
    }
    Ok(())
}

/// Fails if `min <= 0` or `min >= max`
pub fn validate_min(min: i32, max: i32) -> Result<()> {
    if min <= 0 || min >= max {
        return Err(InventoryError::InvalidMinimum { min, max });
    }
    Ok(())
}

/// Fails if `stock` lies outside `[min, max]`
pub fn validate_stock(min: i32, max: i32, stock: i32) -> Result<()> {
    if stock < min || stock > max {
        return Err(InventoryError::InvalidInventoryLevel { stock, min, max });
    }
    Ok(())
}

/// Parse a machine id from user input
pub fn parse_machine_id(text: &str) -> Result<i32> {
    text.trim()
        .parse::<i32>()
        .map_err(|_| InventoryError::InvalidVariantIdentifier {
            value: text.to_string(),
        })
}

pub fn validate_company_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(InventoryError::EmptyCompanyName);
    }
    Ok(())
}

/// Run the shared scalar checks against any entity
pub fn validate_entity<E: Entity>(entity: &E) -> Result<()> {
    validate_name(entity.name())?;
    validate_price(entity.price())?;
    validate_min(entity.min(), entity.max())?;
    validate_stock(entity.min(), entity.max(), entity.stock())
}

/// Scalar checks plus the variant attribute of a part
pub fn validate_part(part: &Part) -> Result<()> {
    validate_entity(part)?;
    match part.source() {
        PartSource::InHouse { .. } => Ok(()),
        PartSource::Outsourced { company_name } => validate_company_name(company_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::PartId;

    #[test]
    fn test_validate_min() {
        assert!(matches!(
            validate_min(0, 10),
            Err(InventoryError::InvalidMinimum { min: 0, max: 10 })
        ));
        assert!(matches!(
            validate_min(10, 5),
            Err(InventoryError::InvalidMinimum { .. })
        ));
        assert!(validate_min(10, 10).is_err());
        assert!(validate_min(-3, 10).is_err());
        assert!(validate_min(1, 10).is_ok());
    }

    #[test]
    fn test_validate_stock() {
        assert!(matches!(
            validate_stock(1, 10, 0),
            Err(InventoryError::InvalidInventoryLevel { stock: 0, .. })
        ));
        assert!(validate_stock(1, 10, 11).is_err());
        assert!(validate_stock(1, 10, 5).is_ok());
        assert!(validate_stock(1, 10, 1).is_ok());
        assert!(validate_stock(1, 10, 10).is_ok());
    }

    #[test]
    fn test_validate_name_and_price() {
        assert_eq!(validate_name(""), Err(InventoryError::EmptyName));
        assert_eq!(validate_name("   "), Err(InventoryError::EmptyName));
        assert!(validate_name("Brakes").is_ok());

        assert!(validate_price(0.0).is_ok());
        assert!(validate_price(15.0).is_ok());
        assert!(validate_price(-0.01).is_err());
        assert!(validate_price(f64::NAN).is_err());
    }

    #[test]
    fn test_parse_machine_id() {
        assert_eq!(parse_machine_id("101").unwrap(), 101);
        assert_eq!(parse_machine_id(" 7 ").unwrap(), 7);
        assert_eq!(
            parse_machine_id("M-101"),
            Err(InventoryError::InvalidVariantIdentifier {
                value: "M-101".to_string()
            })
        );
        assert!(parse_machine_id("").is_err());
    }

    #[test]
    fn test_validation_order_reports_first_failure() {
        // Blank name and bad bounds: the name is reported first
        let part = Part::in_house(PartId::new(0), "", 1.0, 50, 0, 10, 1);
        assert_eq!(validate_part(&part), Err(InventoryError::EmptyName));

        // Bad minimum and bad stock: the minimum is reported first
        let part = Part::in_house(PartId::new(0), "Seat", 1.0, 50, 0, 10, 1);
        assert!(matches!(
            validate_part(&part),
            Err(InventoryError::InvalidMinimum { .. })
        ));
    }

    #[test]
    fn test_outsourced_requires_company_name() {
        let part = Part::outsourced(PartId::new(0), "Light", 20.0, 5, 1, 10, " ");
        assert_eq!(validate_part(&part), Err(InventoryError::EmptyCompanyName));

        let part = Part::outsourced(PartId::new(0), "Light", 20.0, 5, 1, 10, "Honeywell");
        assert!(validate_part(&part).is_ok());
    }
}
