//! Fixtures - the canonical seed data and read-only YAML imports
//!
//! A fixture file lists parts and products without ids:
//!
//! ```yaml
//! parts:
//!   - name: Chain
//!     price: 9.50
//!     stock: 4
//!     min: 1
//!     max: 10
//!     source: outsourced
//!     company_name: Shimano
//! products:
//!   - name: Fixie
//!     price: 450.00
//!     stock: 2
//!     min: 1
//!     max: 5
//!     parts: [0]
//! ```
//!
//! Product `parts` entries are positions in the fixture's own `parts` list.
//! Every entity goes through the validated create path, so ids are issued
//! by the receiving inventory. Fixtures are never written back.

use miette::Diagnostic;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::error::InventoryError;
use crate::core::identity::{EntityKind, PartId, ProductId};
use crate::core::inventory::Inventory;
use crate::entities::part::{Part, PartSource};
use crate::entities::product::Product;
use crate::yaml::{parse_yaml_str, YamlSyntaxError};

/// Errors raised while loading a fixture file
#[derive(Debug, Error, Diagnostic)]
pub enum FixtureError {
    #[error("failed to read fixture {path:?}: {message}")]
    #[diagnostic(code(inventory::fixture::io))]
    Io { path: PathBuf, message: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] YamlSyntaxError),

    #[error("fixture {kind} #{index} ('{name}') was rejected: {source}")]
    #[diagnostic(code(inventory::fixture::invalid))]
    Invalid {
        kind: EntityKind,
        index: usize,
        name: String,
        source: InventoryError,
    },

    #[error("fixture product #{product} references part #{part}, but the fixture lists {count} part(s)")]
    #[diagnostic(
        code(inventory::fixture::unknown_part),
        help("product 'parts' entries are zero-based positions in the fixture's parts list")
    )]
    UnknownPartIndex {
        product: usize,
        part: usize,
        count: usize,
    },
}

/// A parsed fixture document
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Fixture {
    #[serde(default)]
    pub parts: Vec<FixturePart>,

    #[serde(default)]
    pub products: Vec<FixtureProduct>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixturePart {
    pub name: String,
    pub price: f64,
    pub stock: i32,
    pub min: i32,
    pub max: i32,
    #[serde(flatten)]
    pub source: PartSource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureProduct {
    pub name: String,
    pub price: f64,
    pub stock: i32,
    pub min: i32,
    pub max: i32,
    /// Positions in the fixture's parts list
    #[serde(default)]
    pub parts: Vec<usize>,
}

/// Counts of what a fixture added to an inventory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixtureSummary {
    pub parts: usize,
    pub products: usize,
}

impl Fixture {
    /// Parse fixture YAML; `filename` labels diagnostics
    pub fn parse(source: &str, filename: &str) -> Result<Self, FixtureError> {
        Ok(parse_yaml_str(source, filename)?)
    }

    /// Read and parse a fixture file
    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let source = std::fs::read_to_string(path).map_err(|e| FixtureError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(&source, &path.display().to_string())
    }

    /// Create every fixture entity in `inventory`.
    ///
    /// All-or-nothing: on any failure the inventory is left as it was.
    pub fn apply(&self, inventory: &mut Inventory) -> Result<FixtureSummary, FixtureError> {
        let mut staged = inventory.clone();
        let mut part_ids: Vec<PartId> = Vec::with_capacity(self.parts.len());

        for (index, fp) in self.parts.iter().enumerate() {
            let part = Part::new(
                PartId::default(),
                fp.name.clone(),
                fp.price,
                fp.stock,
                fp.min,
                fp.max,
                fp.source.clone(),
            );
            let id = staged
                .create_part(part)
                .map_err(|source| FixtureError::Invalid {
                    kind: EntityKind::Part,
                    index,
                    name: fp.name.clone(),
                    source,
                })?;
            part_ids.push(id);
        }

        for (index, fp) in self.products.iter().enumerate() {
            let mut product = Product::new(
                ProductId::default(),
                fp.name.clone(),
                fp.price,
                fp.stock,
                fp.min,
                fp.max,
            );
            for &position in &fp.parts {
                let part_id = part_ids.get(position).copied().ok_or(FixtureError::UnknownPartIndex {
                    product: index,
                    part: position,
                    count: part_ids.len(),
                })?;
                product.add_associated_part(part_id);
            }
            staged
                .create_product(product)
                .map_err(|source| FixtureError::Invalid {
                    kind: EntityKind::Product,
                    index,
                    name: fp.name.clone(),
                    source,
                })?;
        }

        *inventory = staged;
        Ok(FixtureSummary {
            parts: self.parts.len(),
            products: self.products.len(),
        })
    }
}

/// The canonical sample inventory: four bicycle parts and two products using all of them
pub fn seed_inventory() -> Result<Inventory, InventoryError> {
    let mut inv = Inventory::new();

    let id = inv.issue_part_id()?;
    let brakes = Part::in_house(id, "Brakes", 15.00, 3, 1, 10, 101);
    let id = inv.issue_part_id()?;
    let wheel = Part::in_house(id, "Wheel", 11.00, 16, 1, 20, 101);
    let id = inv.issue_part_id()?;
    let seat = Part::in_house(id, "Seat", 15.00, 10, 1, 15, 101);
    let id = inv.issue_part_id()?;
    let light = Part::outsourced(id, "Light", 20.00, 5, 1, 10, "Honeywell");

    let part_ids = [brakes.id, wheel.id, seat.id, light.id];
    for part in [brakes, wheel, seat, light] {
        inv.add_part(part);
    }

    let id = inv.issue_product_id()?;
    let mut giant_bike = Product::new(id, "Giant Bike", 299.99, 5, 1, 10);
    let id = inv.issue_product_id()?;
    let mut tricycle = Product::new(id, "Tricycle", 99.99, 3, 1, 5);
    for part_id in part_ids {
        giant_bike.add_associated_part(part_id);
        tricycle.add_associated_part(part_id);
    }
    inv.add_product(giant_bike);
    inv.add_product(tricycle);

    Ok(inv)
}
