//! `inventory product` command - Product listing and lookup

use clap::Subcommand;
use miette::Result;

use crate::cli::helpers::{load_inventory, parse_product_id};
use crate::cli::output::{resolve_format, Output};
use crate::cli::table::{render_product_detail, render_products};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, Entity, Inventory, InventoryError};
use crate::entities::Product;

#[derive(Subcommand, Debug)]
pub enum ProductCommands {
    /// List products with filtering
    List(ListArgs),

    /// Show a product and its associated parts
    Show(ShowArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct ListArgs {
    /// Search in id and name (substring, case-sensitive)
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Show only products at or below their minimum level
    #[arg(long)]
    pub low_stock: bool,

    /// Show only products with no associated parts
    #[arg(long)]
    pub unassociated: bool,

    /// Show only count
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ShowArgs {
    /// Product ID
    pub id: String,
}

/// Run a product subcommand
pub fn run(cmd: ProductCommands, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let out = Output::new(global);
    let inventory = load_inventory(global, &config, &out)?;
    let format = resolve_format(global, &config);

    let rendered = match cmd {
        ProductCommands::List(args) => list(&inventory, &args, format)?,
        ProductCommands::Show(args) => show(&inventory, &args, format, &out)?,
    };
    print!("{}", rendered);
    Ok(())
}

pub fn filter_products<'a>(inventory: &'a Inventory, args: &ListArgs) -> Vec<&'a Product> {
    let mut products = match &args.search {
        Some(query) => inventory.search_products(query),
        None => inventory.products().iter().collect(),
    };
    if args.low_stock {
        products.retain(|p| p.is_low_stock());
    }
    if args.unassociated {
        products.retain(|p| !p.has_associations());
    }
    products
}

pub fn list(inventory: &Inventory, args: &ListArgs, format: OutputFormat) -> Result<String> {
    let products = filter_products(inventory, args);
    if args.count {
        return Ok(format!("{}\n", products.len()));
    }
    render_products(&products, format)
}

pub fn show(inventory: &Inventory, args: &ShowArgs, format: OutputFormat, out: &Output) -> Result<String> {
    let id = parse_product_id(&args.id)?;
    let product = inventory
        .find_product_by_id(id)
        .ok_or_else(|| InventoryError::product_not_found(id))?;

    let orphaned = inventory
        .resolve_parts_of(product)
        .iter()
        .filter(|a| a.is_orphaned())
        .count();
    if orphaned > 0 {
        out.warn(format!(
            "product {} lists {} part(s) that are no longer in the inventory",
            id, orphaned
        ));
    }

    render_product_detail(product, inventory, format)
}
