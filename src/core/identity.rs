//! Entity identity system using store-issued integer ids

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Entity kinds tracked by the inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// Component part (in-house or outsourced)
    Part,
    /// Assembled product
    Product,
}

impl EntityKind {
    /// Get the string representation of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Part => "part",
            EntityKind::Product => "product",
        }
    }

    /// Get all valid kinds
    pub fn all() -> &'static [EntityKind] {
        &[EntityKind::Part, EntityKind::Product]
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "part" | "parts" => Ok(EntityKind::Part),
            "product" | "products" => Ok(EntityKind::Product),
            _ => Err(IdParseError::InvalidKind(s.to_string())),
        }
    }
}

/// Identifier of a part, issued by [`crate::core::Inventory::issue_part_id`]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PartId(u32);

impl PartId {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    /// Parse a PartId from a string
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        s.parse()
    }
}

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PartId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_raw(s).map(Self)
    }
}

impl From<u32> for PartId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Identifier of a product, issued by [`crate::core::Inventory::issue_product_id`]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ProductId(u32);

impl ProductId {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    /// Parse a ProductId from a string
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        s.parse()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_raw(s).map(Self)
    }
}

impl From<u32> for ProductId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

fn parse_raw(s: &str) -> Result<u32, IdParseError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(IdParseError::Empty);
    }
    trimmed
        .parse::<u32>()
        .map_err(|e| IdParseError::InvalidNumber(trimmed.to_string(), e.to_string()))
}

/// Errors that can occur when parsing entity ids
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdParseError {
    #[error("invalid entity kind: '{0}' (valid: part, product)")]
    InvalidKind(String),

    #[error("entity id is empty")]
    Empty,

    #[error("invalid entity id '{0}': {1}")]
    InvalidNumber(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_id_display_and_parse() {
        let id = PartId::new(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(PartId::parse("42").unwrap(), id);
        assert_eq!(PartId::parse(" 7 ").unwrap(), PartId::new(7));
    }

    #[test]
    fn test_product_id_rejects_garbage() {
        assert!(matches!(
            ProductId::parse("abc"),
            Err(IdParseError::InvalidNumber(_, _))
        ));
        assert!(matches!(ProductId::parse("-1"), Err(IdParseError::InvalidNumber(_, _))));
        assert_eq!(ProductId::parse(""), Err(IdParseError::Empty));
    }

    #[test]
    fn test_ids_order_by_value() {
        let id = PartId::default();
        assert_eq!(id.value(), 0);
        assert!(PartId::new(1) > id);
        assert_eq!(PartId::parse(&u32::MAX.to_string()), Ok(PartId::new(u32::MAX)));
    }

    #[test]
    fn test_kind_roundtrip() {
        for kind in EntityKind::all() {
            let parsed: EntityKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, *kind);
        }
        assert!("widget".parse::<EntityKind>().is_err());
    }

    #[test]
    fn test_id_serializes_as_plain_number() {
        let json = serde_json::to_string(&PartId::new(3)).unwrap();
        assert_eq!(json, "3");
        let parsed: ProductId = serde_json::from_str("9").unwrap();
        assert_eq!(parsed, ProductId::new(9));
    }
}
