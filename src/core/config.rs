//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Inventory configuration with layered hierarchy
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fixture file imported at startup (read-only)
    pub fixture: Option<PathBuf>,

    /// Whether to start from the built-in sample inventory
    pub seed: Option<bool>,

    /// Default output format
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/inventory/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 3. Environment variables
        config.apply_env(|key| std::env::var(key).ok());

        config
    }

    /// Parse a config file, ignoring files that are missing or malformed
    pub fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(path).ok()?;
        serde_yml::from_str::<Config>(&contents).ok()
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "inventory")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Apply `INVENTORY_*` overrides read through `lookup`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(fixture) = lookup("INVENTORY_FIXTURE").filter(|v| !v.is_empty()) {
            self.fixture = Some(PathBuf::from(fixture));
        }
        if let Some(format) = lookup("INVENTORY_FORMAT").filter(|v| !v.is_empty()) {
            self.default_format = Some(format);
        }
        if let Some(no_seed) = lookup("INVENTORY_NO_SEED") {
            if matches!(no_seed.to_lowercase().as_str(), "1" | "true" | "yes") {
                self.seed = Some(false);
            }
        }
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.fixture.is_some() {
            self.fixture = other.fixture;
        }
        if other.seed.is_some() {
            self.seed = other.seed;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    /// Whether to load the sample inventory (default: yes)
    pub fn seed(&self) -> bool {
        self.seed.unwrap_or(true)
    }
}
