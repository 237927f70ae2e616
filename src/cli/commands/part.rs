//! `inventory part` command - Part listing and lookup

use clap::{Subcommand, ValueEnum};
use miette::Result;

use crate::cli::helpers::{load_inventory, parse_part_id};
use crate::cli::output::{resolve_format, Output};
use crate::cli::table::{render_part_detail, render_parts};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, Entity, Inventory, InventoryError};
use crate::entities::Part;

#[derive(Subcommand, Debug)]
pub enum PartCommands {
    /// List parts with filtering
    List(ListArgs),

    /// Show a part's details
    Show(ShowArgs),
}

/// Source filter for list command
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum SourceFilter {
    InHouse,
    Outsourced,
    All,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ListArgs {
    /// Search in id and name (substring, case-sensitive)
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Filter by source
    #[arg(long, default_value = "all")]
    pub source: SourceFilter,

    /// Show only parts at or below their minimum level
    #[arg(long)]
    pub low_stock: bool,

    /// Show only count
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ShowArgs {
    /// Part ID
    pub id: String,
}

/// Run a part subcommand
pub fn run(cmd: PartCommands, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let out = Output::new(global);
    let inventory = load_inventory(global, &config, &out)?;
    let format = resolve_format(global, &config);

    let rendered = match cmd {
        PartCommands::List(args) => list(&inventory, &args, format)?,
        PartCommands::Show(args) => show(&inventory, &args, format)?,
    };
    print!("{}", rendered);
    Ok(())
}

/// Parts matching the list filters, in display order
pub fn filter_parts<'a>(inventory: &'a Inventory, args: &ListArgs) -> Vec<&'a Part> {
    let mut parts = match &args.search {
        Some(query) => inventory.search_parts(query),
        None => inventory.parts().iter().collect(),
    };
    parts.retain(|p| match args.source {
        SourceFilter::InHouse => p.is_in_house(),
        SourceFilter::Outsourced => !p.is_in_house(),
        SourceFilter::All => true,
    });
    if args.low_stock {
        parts.retain(|p| p.is_low_stock());
    }
    parts
}

pub fn list(inventory: &Inventory, args: &ListArgs, format: OutputFormat) -> Result<String> {
    let parts = filter_parts(inventory, args);
    if args.count {
        return Ok(format!("{}\n", parts.len()));
    }
    render_parts(&parts, format)
}

pub fn show(inventory: &Inventory, args: &ShowArgs, format: OutputFormat) -> Result<String> {
    let id = parse_part_id(&args.id)?;
    let part = inventory
        .find_part_by_id(id)
        .ok_or_else(|| InventoryError::part_not_found(id))?;
    let used_in = inventory.products_using_part(id);
    render_part_detail(part, &used_in, format)
}
