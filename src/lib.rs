//! Inventory: parts and products with validated stock levels
//!
//! The [`core::Inventory`] store issues ids, owns every part and product,
//! and refuses to delete a product that still lists associated parts.

pub mod cli;
pub mod core;
pub mod entities;
pub mod yaml;
