//! `inventory shell` command - line-oriented session against one inventory
//!
//! Each line is parsed like a command line (`part add --name Bell ...`).
//! Failing lines are reported and the session continues; the exit status
//! is non-zero if any line failed.
//!
//! ```text
//! part add --name Bell --price 3.5 --stock 4 --min 1 --max 10 --in-house 7
//! product associate 0 4
//! product delete 1 --yes
//! ```

use clap::error::ErrorKind;
use clap::{ArgGroup, Parser, Subcommand};
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use miette::{IntoDiagnostic, Report, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal};
use std::path::PathBuf;

use crate::cli::commands::{part, product, where_used};
use crate::cli::helpers::{load_inventory, parse_part_id, parse_product_id};
use crate::cli::output::{resolve_format, Output};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::validation::{
    parse_machine_id, validate_company_name, validate_min, validate_name, validate_price, validate_stock,
};
use crate::core::{Config, DeletionOutcome, Inventory, InventoryError, PartId};
use crate::entities::{Part, PartSource, Product};

#[derive(clap::Args, Debug)]
pub struct ShellArgs {
    /// Read commands from a file instead of stdin
    #[arg(long, value_name = "PATH")]
    pub script: Option<PathBuf>,

    /// Stop at the first failing line
    #[arg(long)]
    pub fail_fast: bool,
}

#[derive(Parser, Debug)]
#[command(name = "inventory", no_binary_name = true, disable_version_flag = true)]
#[command(override_usage = "<COMMAND> [ARGS]")]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug)]
enum ShellCommand {
    /// Create, modify, delete, and list parts
    #[command(subcommand)]
    Part(ShellPartCommand),

    /// Create, modify, delete, and list products
    #[command(subcommand)]
    Product(ShellProductCommand),

    /// Find the products that reference a part
    WhereUsed(where_used::WhereUsedArgs),

    /// End the session
    #[command(alias = "exit")]
    Quit,
}

#[derive(Subcommand, Debug)]
enum ShellPartCommand {
    List(part::ListArgs),
    Show(part::ShowArgs),
    /// Create a part; the store issues its id
    Add(AddPartArgs),
    /// Change fields of an existing part
    Modify(ModifyPartArgs),
    Delete(DeleteArgs),
}

#[derive(Subcommand, Debug)]
enum ShellProductCommand {
    List(product::ListArgs),
    Show(product::ShowArgs),
    /// Create a product; the store issues its id
    Add(AddProductArgs),
    /// Change fields of an existing product (associations are kept)
    Modify(ModifyProductArgs),
    /// Add a part to a product's associated parts
    Associate(AssociationArgs),
    /// Remove one occurrence of a part from a product's associated parts
    Dissociate(AssociationArgs),
    /// Delete a product; refused while it still has associated parts
    Delete(DeleteArgs),
}

#[derive(clap::Args, Debug)]
#[command(group(ArgGroup::new("part_source").required(true).args(["in_house", "outsourced"])))]
struct AddPartArgs {
    #[arg(long)]
    name: String,

    #[arg(long, allow_negative_numbers = true)]
    price: f64,

    /// Units on hand
    #[arg(long, visible_alias = "inv", allow_negative_numbers = true)]
    stock: i32,

    #[arg(long, allow_negative_numbers = true)]
    min: i32,

    #[arg(long, allow_negative_numbers = true)]
    max: i32,

    /// Machine id of an in-house part
    #[arg(long, value_name = "MACHINE_ID", allow_hyphen_values = true)]
    in_house: Option<String>,

    /// Company supplying an outsourced part
    #[arg(long, value_name = "COMPANY")]
    outsourced: Option<String>,
}

#[derive(clap::Args, Debug)]
#[command(group(ArgGroup::new("part_source").args(["in_house", "outsourced"])))]
struct ModifyPartArgs {
    /// Part ID
    id: String,

    #[arg(long)]
    name: Option<String>,

    #[arg(long, allow_negative_numbers = true)]
    price: Option<f64>,

    #[arg(long, visible_alias = "inv", allow_negative_numbers = true)]
    stock: Option<i32>,

    #[arg(long, allow_negative_numbers = true)]
    min: Option<i32>,

    #[arg(long, allow_negative_numbers = true)]
    max: Option<i32>,

    /// Make the part in-house with this machine id
    #[arg(long, value_name = "MACHINE_ID", allow_hyphen_values = true)]
    in_house: Option<String>,

    /// Make the part outsourced from this company
    #[arg(long, value_name = "COMPANY")]
    outsourced: Option<String>,
}

#[derive(clap::Args, Debug)]
struct AddProductArgs {
    #[arg(long)]
    name: String,

    #[arg(long, allow_negative_numbers = true)]
    price: f64,

    #[arg(long, visible_alias = "inv", allow_negative_numbers = true)]
    stock: i32,

    #[arg(long, allow_negative_numbers = true)]
    min: i32,

    #[arg(long, allow_negative_numbers = true)]
    max: i32,

    /// Part to associate (repeatable, duplicates allowed)
    #[arg(long = "part", value_name = "PART_ID")]
    parts: Vec<String>,
}

#[derive(clap::Args, Debug)]
struct ModifyProductArgs {
    /// Product ID
    id: String,

    #[arg(long)]
    name: Option<String>,

    #[arg(long, allow_negative_numbers = true)]
    price: Option<f64>,

    #[arg(long, visible_alias = "inv", allow_negative_numbers = true)]
    stock: Option<i32>,

    #[arg(long, allow_negative_numbers = true)]
    min: Option<i32>,

    #[arg(long, allow_negative_numbers = true)]
    max: Option<i32>,
}

#[derive(clap::Args, Debug)]
struct AssociationArgs {
    /// Product ID
    product: String,

    /// Part ID
    part: String,
}

#[derive(clap::Args, Debug)]
struct DeleteArgs {
    id: String,

    /// Skip confirmation
    #[arg(long, short = 'y')]
    yes: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

enum LineSource {
    Terminal,
    Reader(Box<dyn BufRead>),
}

impl LineSource {
    fn next_line(&mut self) -> Option<String> {
        match self {
            LineSource::Terminal => Input::<String>::with_theme(&ColorfulTheme::default())
                .with_prompt("inventory")
                .allow_empty(true)
                .interact_text()
                .ok(),
            LineSource::Reader(reader) => {
                let mut line = String::new();
                match reader.read_line(&mut line) {
                    Ok(0) | Err(_) => None,
                    Ok(_) => Some(line),
                }
            }
        }
    }
}

pub fn run(args: ShellArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let out = Output::new(global);
    let inventory = load_inventory(global, &config, &out)?;
    let format = resolve_format(global, &config);

    let interactive = args.script.is_none() && io::stdin().is_terminal();
    let mut source = match &args.script {
        Some(path) => LineSource::Reader(Box::new(BufReader::new(File::open(path).into_diagnostic()?))),
        None if interactive => LineSource::Terminal,
        None => LineSource::Reader(Box::new(BufReader::new(io::stdin()))),
    };

    let mut session = Session::new(inventory, format, out, interactive);
    if interactive {
        out.note("Type 'help' for commands, 'quit' to leave.");
    }

    let mut failures = 0usize;
    let mut line_number = 0usize;
    while let Some(line) = source.next_line() {
        line_number += 1;
        match session.run_line(&line) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(report) => {
                failures += 1;
                if !interactive {
                    eprintln!("{} line {}: {}", style("error").red().bold(), line_number, line.trim());
                }
                eprintln!("{:?}", report);
                if args.fail_fast {
                    break;
                }
            }
        }
    }

    if failures > 0 {
        return Err(miette::miette!("{} command(s) failed", failures));
    }
    Ok(())
}

struct Session {
    inventory: Inventory,
    format: OutputFormat,
    out: Output,
    interactive: bool,
}

impl Session {
    fn new(inventory: Inventory, format: OutputFormat, out: Output, interactive: bool) -> Self {
        Self {
            inventory,
            format,
            out,
            interactive,
        }
    }

    fn run_line(&mut self, line: &str) -> Result<Flow> {
        let tokens = split_line(line).map_err(|e| miette::miette!("{}", e))?;
        if tokens.is_empty() {
            return Ok(Flow::Continue);
        }
        match ShellLine::try_parse_from(tokens) {
            Ok(parsed) => self.execute(parsed.command),
            Err(e) if e.kind() == ErrorKind::DisplayHelp => {
                print!("{}", e);
                Ok(Flow::Continue)
            }
            Err(e) => {
                let text = e.to_string();
                let text = text.trim_end();
                Err(miette::miette!("{}", text.strip_prefix("error: ").unwrap_or(text)))
            }
        }
    }

    fn execute(&mut self, command: ShellCommand) -> Result<Flow> {
        let rendered = match command {
            ShellCommand::Part(cmd) => self.part(cmd)?,
            ShellCommand::Product(cmd) => self.product(cmd)?,
            ShellCommand::WhereUsed(args) => where_used::report(&self.inventory, &args, self.format)?,
            ShellCommand::Quit => return Ok(Flow::Quit),
        };
        print!("{}", rendered);
        Ok(Flow::Continue)
    }

    fn part(&mut self, cmd: ShellPartCommand) -> Result<String> {
        match cmd {
            ShellPartCommand::List(args) => part::list(&self.inventory, &args, self.format),
            ShellPartCommand::Show(args) => part::show(&self.inventory, &args, self.format),
            ShellPartCommand::Add(args) => {
                validate_name(&args.name)?;
                validate_price(args.price)?;
                validate_min(args.min, args.max)?;
                validate_stock(args.min, args.max, args.stock)?;
                let source = part_source(args.in_house.as_deref(), args.outsourced.as_deref())?
                    .ok_or_else(|| miette::miette!("either --in-house or --outsourced is required"))?;

                let draft = Part::new(PartId::default(), args.name, args.price, args.stock, args.min, args.max, source);
                let id = self.inventory.create_part(draft)?;
                self.out.success(format!("Created part {}", style(id).cyan()));
                Ok(String::new())
            }
            ShellPartCommand::Modify(args) => {
                let id = parse_part_id(&args.id)?;
                let existing = self
                    .inventory
                    .find_part_by_id(id)
                    .cloned()
                    .ok_or_else(|| InventoryError::part_not_found(id))?;
                let source = match part_source(args.in_house.as_deref(), args.outsourced.as_deref())? {
                    Some(source) => source,
                    None => existing.source().clone(),
                };
                let replacement = Part::new(
                    id,
                    args.name.unwrap_or(existing.name),
                    args.price.unwrap_or(existing.price),
                    args.stock.unwrap_or(existing.stock),
                    args.min.unwrap_or(existing.min),
                    args.max.unwrap_or(existing.max),
                    source,
                );
                self.inventory.update_part(replacement)?;
                self.out.success(format!("Updated part {}", style(id).cyan()));
                Ok(String::new())
            }
            ShellPartCommand::Delete(args) => {
                let id = parse_part_id(&args.id)?;
                let part = self
                    .inventory
                    .find_part_by_id(id)
                    .ok_or_else(|| InventoryError::part_not_found(id))?;
                let prompt = format!("Delete part {} ({})?", id, part.name);

                let users: Vec<String> = self
                    .inventory
                    .products_using_part(id)
                    .iter()
                    .map(|p| p.id.to_string())
                    .collect();
                if !users.is_empty() {
                    self.out.warn(format!(
                        "part {} is still associated with product(s) {}; those references will be left dangling",
                        id,
                        users.join(", ")
                    ));
                }

                if !confirm(&self.out, self.interactive, &prompt, args.yes) {
                    self.out.note(format!("Cancelled; part {} left unchanged", id));
                    return Ok(String::new());
                }
                if !self.inventory.delete_part(id) {
                    return Err(InventoryError::part_not_found(id).into());
                }
                self.out.success(format!("Deleted part {}", style(id).cyan()));
                Ok(String::new())
            }
        }
    }

    fn product(&mut self, cmd: ShellProductCommand) -> Result<String> {
        match cmd {
            ShellProductCommand::List(args) => product::list(&self.inventory, &args, self.format),
            ShellProductCommand::Show(args) => product::show(&self.inventory, &args, self.format, &self.out),
            ShellProductCommand::Add(args) => {
                let mut draft = Product::new(
                    Default::default(),
                    args.name,
                    args.price,
                    args.stock,
                    args.min,
                    args.max,
                );
                for text in &args.parts {
                    let part_id = parse_part_id(text)?;
                    if self.inventory.find_part_by_id(part_id).is_none() {
                        return Err(InventoryError::part_not_found(part_id).into());
                    }
                    draft.add_associated_part(part_id);
                }
                let id = self.inventory.create_product(draft)?;
                self.out.success(format!(
                    "Created product {} with {} associated part(s)",
                    style(id).cyan(),
                    args.parts.len()
                ));
                Ok(String::new())
            }
            ShellProductCommand::Modify(args) => {
                let id = parse_product_id(&args.id)?;
                let mut replacement = self
                    .inventory
                    .find_product_by_id(id)
                    .cloned()
                    .ok_or_else(|| InventoryError::product_not_found(id))?;
                if let Some(name) = args.name {
                    replacement.name = name;
                }
                if let Some(price) = args.price {
                    replacement.price = price;
                }
                if let Some(stock) = args.stock {
                    replacement.stock = stock;
                }
                if let Some(min) = args.min {
                    replacement.min = min;
                }
                if let Some(max) = args.max {
                    replacement.max = max;
                }
                self.inventory.update_product(replacement)?;
                self.out.success(format!("Updated product {}", style(id).cyan()));
                Ok(String::new())
            }
            ShellProductCommand::Associate(args) => {
                let product_id = parse_product_id(&args.product)?;
                let part_id = parse_part_id(&args.part)?;
                self.inventory.associate_part(product_id, part_id)?;
                self.out.success(format!(
                    "Associated part {} with product {}",
                    style(part_id).cyan(),
                    style(product_id).cyan()
                ));
                Ok(String::new())
            }
            ShellProductCommand::Dissociate(args) => {
                let product_id = parse_product_id(&args.product)?;
                let part_id = parse_part_id(&args.part)?;
                if self.inventory.dissociate_part(product_id, part_id)? {
                    self.out.success(format!(
                        "Removed part {} from product {}",
                        style(part_id).cyan(),
                        style(product_id).cyan()
                    ));
                } else {
                    self.out.warn(format!(
                        "part {} is not associated with product {}",
                        part_id, product_id
                    ));
                }
                Ok(String::new())
            }
            ShellProductCommand::Delete(args) => {
                let id = parse_product_id(&args.id)?;
                let out = self.out;
                let interactive = self.interactive;
                let outcome = self.inventory.request_product_deletion(id, |product| {
                    let prompt = format!("Delete product {} ({})?", product.id, product.name);
                    confirm(&out, interactive, &prompt, args.yes)
                })?;
                match outcome {
                    DeletionOutcome::Deleted(product) => {
                        self.out.success(format!(
                            "Deleted product {} ({})",
                            style(product.id).cyan(),
                            product.name
                        ));
                    }
                    DeletionOutcome::Blocked { associated } => {
                        return Err(Report::new(InventoryError::AssociationsPresent {
                            id: id.to_string(),
                            count: associated,
                        }));
                    }
                    DeletionOutcome::Cancelled => {
                        self.out.note(format!("Cancelled; product {} left unchanged", id));
                    }
                }
                Ok(String::new())
            }
        }
    }
}

/// Source from the mutually exclusive `--in-house`/`--outsourced` flags
fn part_source(in_house: Option<&str>, outsourced: Option<&str>) -> Result<Option<PartSource>> {
    match (in_house, outsourced) {
        (Some(machine), _) => Ok(Some(PartSource::InHouse {
            machine_id: parse_machine_id(machine)?,
        })),
        (None, Some(company)) => {
            validate_company_name(company)?;
            Ok(Some(PartSource::Outsourced {
                company_name: company.to_string(),
            }))
        }
        (None, None) => Ok(None),
    }
}

/// `--yes` confirms outright; otherwise only a terminal can answer
fn confirm(out: &Output, interactive: bool, prompt: &str, yes: bool) -> bool {
    if yes {
        return true;
    }
    if !interactive {
        out.note("Not confirmed (pass --yes when reading commands from a pipe or script)");
        return false;
    }
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()
        .unwrap_or(false)
}

/// Split a line into words, honouring quotes, backslash escapes and `#` comments
fn split_line(line: &str) -> std::result::Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match quote {
            Some(q) if c == q => quote = None,
            Some('"') if c == '\\' => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            Some(_) => current.push(c),
            None => match c {
                '"' | '\'' => {
                    quote = Some(c);
                    in_token = true;
                }
                '\\' => {
                    if let Some(next) = chars.next() {
                        current.push(next);
                        in_token = true;
                    }
                }
                '#' if !in_token => break,
                c if c.is_whitespace() => {
                    if in_token {
                        tokens.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                }
                c => {
                    current.push(c);
                    in_token = true;
                }
            },
        }
    }

    if let Some(q) = quote {
        return Err(format!("unterminated {} quote", q));
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{seed_inventory, ProductId};

    fn session(inventory: Inventory) -> Session {
        Session::new(inventory, OutputFormat::Tsv, Output::default(), false)
    }

    #[test]
    fn test_split_line() {
        assert_eq!(
            split_line(r#"part add --name "Giant Wheel" --company 'A B'"#).unwrap(),
            vec!["part", "add", "--name", "Giant Wheel", "--company", "A B"]
        );
        assert_eq!(split_line("  # just a comment").unwrap(), Vec::<String>::new());
        assert_eq!(split_line("part list # trailing").unwrap(), vec!["part", "list"]);
        assert_eq!(split_line(r#"--name """#).unwrap(), vec!["--name", ""]);
        assert_eq!(split_line(r"a\ b").unwrap(), vec!["a b"]);
        assert!(split_line("\"open").is_err());
    }

    #[test]
    fn test_add_part_issues_next_id() {
        let mut s = session(seed_inventory().unwrap());
        s.run_line("part add --name Bell --price 3.5 --stock 4 --min 1 --max 10 --in-house 7")
            .unwrap();
        let bell = s.inventory.find_part_by_id(PartId::new(4)).unwrap();
        assert_eq!(bell.name, "Bell");
        assert_eq!(bell.machine_id(), Some(7));
    }

    #[test]
    fn test_add_part_validation_order() {
        let mut s = session(Inventory::new());
        // Empty name is reported before the bad machine id
        let err = s
            .run_line(r#"part add --name "" --price 1 --stock 1 --min 1 --max 2 --in-house abc"#)
            .unwrap_err();
        assert!(err.to_string().contains("name"), "{}", err);

        let err = s
            .run_line("part add --name Bell --price 1 --stock 5 --min 1 --max 2 --in-house abc")
            .unwrap_err();
        assert!(err.to_string().contains("inventory level"), "{}", err);

        let err = s
            .run_line("part add --name Bell --price 1 --stock 1 --min 1 --max 2 --in-house abc")
            .unwrap_err();
        assert!(err.to_string().contains("machine"), "{}", err);
        assert!(s.inventory.parts().is_empty());
        assert_eq!(s.inventory.peek_next_part_id(), Some(PartId::new(0)));
    }

    #[test]
    fn test_add_part_requires_one_source() {
        let mut s = session(Inventory::new());
        assert!(s
            .run_line("part add --name Bell --price 1 --stock 1 --min 1 --max 2")
            .is_err());
        assert!(s
            .run_line("part add --name Bell --price 1 --stock 1 --min 1 --max 2 --in-house 1 --outsourced Acme")
            .is_err());
    }

    #[test]
    fn test_modify_part_switches_source() {
        let mut s = session(seed_inventory().unwrap());
        s.run_line("part modify 0 --outsourced Acme --stock 5").unwrap();
        let brakes = s.inventory.find_part_by_id(PartId::new(0)).unwrap();
        assert_eq!(brakes.company_name(), Some("Acme"));
        assert_eq!(brakes.stock, 5);
        assert_eq!(brakes.name, "Brakes");
    }

    #[test]
    fn test_modify_part_rejects_out_of_range_stock() {
        let mut s = session(seed_inventory().unwrap());
        assert!(s.run_line("part modify 0 --stock 11").is_err());
        assert_eq!(s.inventory.find_part_by_id(PartId::new(0)).unwrap().stock, 3);
    }

    #[test]
    fn test_add_product_with_unknown_part_fails() {
        let mut s = session(seed_inventory().unwrap());
        let err = s
            .run_line("product add --name Cart --price 9 --stock 1 --min 1 --max 2 --part 0 --part 99")
            .unwrap_err();
        assert!(err.to_string().contains("no part found with id 99"));
        assert_eq!(s.inventory.products().len(), 2);
        assert_eq!(s.inventory.peek_next_product_id(), Some(ProductId::new(2)));
    }

    #[test]
    fn test_product_delete_blocked_then_allowed() {
        let mut s = session(seed_inventory().unwrap());
        let err = s.run_line("product delete 1 --yes").unwrap_err();
        assert!(err.to_string().contains("still has 4 associated part(s)"));

        for part in 0..4 {
            s.run_line(&format!("product dissociate 1 {}", part)).unwrap();
        }
        // Unconfirmed deletion from a pipe is cancelled, not an error
        s.run_line("product delete 1").unwrap();
        assert!(s.inventory.find_product_by_id(ProductId::new(1)).is_some());

        s.run_line("product delete 1 --yes").unwrap();
        assert!(s.inventory.find_product_by_id(ProductId::new(1)).is_none());
    }

    #[test]
    fn test_part_delete_leaves_orphans() {
        let mut s = session(seed_inventory().unwrap());
        s.run_line("part delete 0 -y").unwrap();
        assert!(s.inventory.find_part_by_id(PartId::new(0)).is_none());
        assert_eq!(s.inventory.orphaned_references().len(), 2);

        let err = s.run_line("part delete 0 -y").unwrap_err();
        assert!(err.to_string().contains("no part found with id 0"));
    }

    #[test]
    fn test_help_and_quit() {
        let mut s = session(Inventory::new());
        assert_eq!(s.run_line("help").unwrap(), Flow::Continue);
        assert_eq!(s.run_line("quit").unwrap(), Flow::Quit);
        assert_eq!(s.run_line("exit").unwrap(), Flow::Quit);
        assert!(s.run_line("frobnicate").is_err());
    }
}
