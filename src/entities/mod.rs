//! Entity type definitions
//!
//! - [`Part`] - component parts, either made in-house or outsourced
//! - [`Product`] - assembled items listing the parts they are built from

pub mod part;
pub mod product;

pub use part::{Part, PartSource};
pub use product::Product;
