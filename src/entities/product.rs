//! Product entity - Assembled items built from associated parts

use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::{EntityKind, PartId, ProductId};

/// A Product entity - an assembled inventory item
///
/// Associated parts are held by id and resolved through the store, so a
/// product never owns the parts it lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Store-issued identifier
    pub id: ProductId,

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

    /// Parts this product is built from, in display order (duplicates allowed)
    #[serde(default)]
    associated_parts: Vec<PartId>,
}

impl Entity for Product {
    const KIND: EntityKind = EntityKind::Product;

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

impl Product {
    /// Create a new product with no associated parts
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: f64,
        stock: i32,
        min: i32,
        max: i32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            stock,
            min,
            max,
            associated_parts: Vec::new(),
        }
    }

    /// Append a part reference. No duplicate or existence check.
    pub fn add_associated_part(&mut self, part: PartId) {
        self.associated_parts.push(part);
    }

    /// Remove the first reference to `part`; returns whether one was removed
    pub fn remove_associated_part(&mut self, part: PartId) -> bool {
        match self.associated_parts.iter().position(|p| *p == part) {
            Some(index) => {
                self.associated_parts.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn associated_parts(&self) -> &[PartId] {
        &self.associated_parts
    }

    pub fn has_associations(&self) -> bool {
        !self.associated_parts.is_empty()
    }

    /// Drop every association, returning how many were removed
    pub fn clear_associations(&mut self) -> usize {
        let count = self.associated_parts.len();
        self.associated_parts.clear();
        count
    }

    /// Whether `part` appears anywhere in the association list
    pub fn uses_part(&self, part: PartId) -> bool {
        self.associated_parts.contains(&part)
    }
}
