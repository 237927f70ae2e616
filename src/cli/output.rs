//! User-facing status lines
//!
//! Results go to stdout; notes and warnings go to stderr so piped output
//! stays clean. `--quiet` drops notes and success lines, `--verbose` adds
//! detail lines.

use console::style;
use std::fmt::Display;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;

#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    quiet: bool,
    verbose: bool,
}

impl Output {
    pub fn new(global: &GlobalOpts) -> Self {
        Self {
            quiet: global.quiet,
            verbose: global.verbose && !global.quiet,
        }
    }

    /// A completed action, e.g. "✓ Created part 4"
    pub fn success(&self, message: impl Display) {
        if !self.quiet {
            println!("{} {}", style("✓").green(), message);
        }
    }

    pub fn note(&self, message: impl Display) {
        if !self.quiet {
            eprintln!("{}", style(message).dim());
        }
    }

    /// Detail shown only with --verbose
    pub fn verbose(&self, message: impl Display) {
        if self.verbose {
            eprintln!("{} {}", style("·").dim(), message);
        }
    }

    /// Always shown, even with --quiet
    pub fn warn(&self, message: impl Display) {
        eprintln!("{} {}", style("!").yellow().bold(), style(message).yellow());
    }
}

/// The format to render with: the flag wins, then the configured default
pub fn resolve_format(global: &GlobalOpts, config: &Config) -> OutputFormat {
    if global.format != OutputFormat::Auto {
        return global.format;
    }
    config
        .default_format
        .as_deref()
        .and_then(|name| <OutputFormat as clap::ValueEnum>::from_str(name, true).ok())
        .unwrap_or(OutputFormat::Auto)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_beats_config() {
        let global = GlobalOpts {
            format: OutputFormat::Csv,
            ..GlobalOpts::default()
        };
        let config = Config {
            default_format: Some("json".to_string()),
            ..Config::default()
        };
        assert_eq!(resolve_format(&global, &config), OutputFormat::Csv);
    }

    #[test]
    fn test_config_default_used_when_flag_is_auto() {
        let config = Config {
            default_format: Some("YAML".to_string()),
            ..Config::default()
        };
        assert_eq!(resolve_format(&GlobalOpts::default(), &config), OutputFormat::Yaml);

        let bogus = Config {
            default_format: Some("xml".to_string()),
            ..Config::default()
        };
        assert_eq!(resolve_format(&GlobalOpts::default(), &bogus), OutputFormat::Auto);
    }

    #[test]
    fn test_quiet_disables_verbose() {
        let global = GlobalOpts {
            quiet: true,
            verbose: true,
            ..GlobalOpts::default()
        };
        let out = Output::new(&global);
        assert!(out.quiet);
        assert!(!out.verbose);
    }
}
