//! Core module - identity, validation, and the inventory store

pub mod config;
pub mod entity;
pub mod error;
pub mod fixture;
pub mod identity;
pub mod inventory;
pub mod shared;
pub mod validation;

pub use config::Config;
pub use entity::Entity;
pub use error::InventoryError;
pub use fixture::{seed_inventory, Fixture, FixtureError, FixtureSummary};
pub use identity::{EntityKind, IdParseError, PartId, ProductId};
pub use inventory::{AssociatedPart, DeletionOutcome, Inventory};
pub use shared::SharedInventory;
