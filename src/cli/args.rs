//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    completions::CompletionsArgs, part::PartCommands, product::ProductCommands, shell::ShellArgs,
    where_used::WhereUsedArgs,
};

#[derive(Parser)]
#[command(name = "inventory")]
#[command(author, version, about = "Inventory System")]
#[command(long_about = "Track component parts and the products assembled from them, with validated stock levels.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug, Default)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Import parts and products from a YAML fixture at startup
    #[arg(long, global = true, value_name = "PATH")]
    pub fixture: Option<PathBuf>,

    /// Start from an empty inventory instead of the sample data
    #[arg(long, global = true)]
    pub no_seed: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Part management (in-house and outsourced components)
    #[command(subcommand)]
    Part(PartCommands),

    /// Product management (assemblies of parts)
    #[command(subcommand)]
    Product(ProductCommands),

    /// Find the products that reference a part
    WhereUsed(WhereUsedArgs),

    /// Interactive session: create, modify, and delete against one inventory
    Shell(ShellArgs),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable tables and detail views
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
    /// Just IDs, one per line
    Id,
}
