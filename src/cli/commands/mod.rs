//! Command implementations

pub mod completions;
pub mod part;
pub mod product;
pub mod shell;
pub mod where_used;
