//! YAML parsing with located diagnostics

pub mod diagnostics;

pub use diagnostics::YamlSyntaxError;

use serde::de::DeserializeOwned;

/// Parse YAML text, mapping failures to a diagnostic that points into `source`
pub fn parse_yaml_str<T: DeserializeOwned>(source: &str, filename: &str) -> Result<T, YamlSyntaxError> {
    serde_yml::from_str(source).map_err(|e| YamlSyntaxError::from_serde_error(&e, source, filename))
}
