//! Entity trait - common interface for parts and products

use crate::core::identity::EntityKind;

/// Common scalar contract shared by every inventory entity
pub trait Entity {
    /// The entity kind (part or product)
    const KIND: EntityKind;

    /// Get the entity's id rendered as text
    fn id_string(&self) -> String;

    /// Get the entity's name
    fn name(&self) -> &str;

    /// Get the unit price
    fn price(&self) -> f64;

    /// Get the current inventory level
    fn stock(&self) -> i32;

    /// Get the minimum inventory level
    fn min(&self) -> i32;

    /// Get the maximum inventory level
    fn max(&self) -> i32;

    /// Whether the inventory level has fallen to or below the minimum
    fn is_low_stock(&self) -> bool {
        self.stock() <= self.min()
    }

    /// Substring match on either the id text or the name.
    ///
    /// An empty query matches every entity.
    fn matches_search(&self, query: &str) -> bool {
        self.id_string().contains(query) || self.name().contains(query)
    }
}
