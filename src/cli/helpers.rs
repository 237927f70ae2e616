//! Shared helper functions for CLI commands

use miette::Result;

use crate::cli::output::Output;
use crate::cli::GlobalOpts;
use crate::core::{seed_inventory, Config, Fixture, Inventory, PartId, ProductId};

/// Build the session inventory from the sample data and any configured fixture
pub fn load_inventory(global: &GlobalOpts, config: &Config, out: &Output) -> Result<Inventory> {
    let mut inventory = if config.seed() && !global.no_seed {
        out.verbose("Starting from the sample inventory");
        seed_inventory()?
    } else {
        Inventory::new()
    };

    if let Some(path) = global.fixture.as_ref().or(config.fixture.as_ref()) {
        let fixture = Fixture::load(path)?;
        let summary = fixture.apply(&mut inventory)?;
        out.verbose(format!(
            "Imported {} part(s) and {} product(s) from {}",
            summary.parts,
            summary.products,
            path.display()
        ));
    }

    Ok(inventory)
}

pub fn parse_part_id(text: &str) -> Result<PartId> {
    PartId::parse(text).map_err(|e| miette::miette!("{}", e))
}

pub fn parse_product_id(text: &str) -> Result<ProductId> {
    ProductId::parse(text).map_err(|e| miette::miette!("{}", e))
}

/// Format a price with two decimals
pub fn format_price(price: f64) -> String {
    format!("{:.2}", price)
}

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(15.0), "15.00");
        assert_eq!(format_price(299.99), "299.99");
    }

    #[test]
    fn test_load_inventory_respects_no_seed() {
        let config = Config::default();
        let out = Output::default();

        let seeded = load_inventory(&GlobalOpts::default(), &config, &out).unwrap();
        assert_eq!(seeded.parts().len(), 4);

        let global = GlobalOpts {
            no_seed: true,
            ..GlobalOpts::default()
        };
        let empty = load_inventory(&global, &config, &out).unwrap();
        assert!(empty.parts().is_empty());

        let config = Config {
            seed: Some(false),
            ..Config::default()
        };
        let empty = load_inventory(&GlobalOpts::default(), &config, &out).unwrap();
        assert!(empty.products().is_empty());
    }

    #[test]
    fn test_parse_ids() {
        assert_eq!(parse_part_id("3").unwrap(), PartId::new(3));
        assert!(parse_product_id("three").is_err());
    }
}
