//! `inventory where-used` command - Find the products that reference a part

use console::style;
use miette::Result;

use crate::cli::helpers::{load_inventory, parse_part_id};
use crate::cli::output::{resolve_format, Output};
use crate::cli::table::render_products;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, Inventory};

#[derive(clap::Args, Debug, Clone)]
pub struct WhereUsedArgs {
    /// Part ID to search for
    pub part_id: String,
}

pub fn run(args: WhereUsedArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let out = Output::new(global);
    let inventory = load_inventory(global, &config, &out)?;
    let format = resolve_format(global, &config);

    print!("{}", report(&inventory, &args, format)?);
    Ok(())
}

/// Products referencing the part, including references to a part that has
/// since been deleted
pub fn report(inventory: &Inventory, args: &WhereUsedArgs, format: OutputFormat) -> Result<String> {
    let id = parse_part_id(&args.part_id)?;
    let users = inventory.products_using_part(id);

    if format != OutputFormat::Auto {
        return render_products(&users, format);
    }

    let label = match inventory.find_part_by_id(id) {
        Some(part) => format!("{} ({})", style(id).cyan(), part.name),
        None => format!("{} {}", style(id).cyan(), style("(not in inventory)").dim()),
    };
    let mut out = format!("{} {}\n\n", style("References to part").bold(), label);

    if users.is_empty() {
        out.push_str(&format!("{}\n", style("No references found.").yellow()));
    } else {
        out.push_str(&render_products(&users, format)?);
    }
    Ok(out)
}
