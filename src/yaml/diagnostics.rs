//! YAML error diagnostics pointing at the offending location

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// YAML syntax or shape error with source location
#[derive(Debug, Error, Diagnostic)]
#[error("invalid fixture YAML: {message}")]
#[diagnostic(code(inventory::yaml::syntax))]
pub struct YamlSyntaxError {
    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: SourceSpan,

    #[help]
    help: Option<String>,

    message: String,
}

impl YamlSyntaxError {
    /// Build a diagnostic from a serde_yml error
    pub fn from_serde_error(err: &serde_yml::Error, source: &str, filename: &str) -> Self {
        let (line, column) = err
            .location()
            .map(|loc| (loc.line(), loc.column()))
            .unwrap_or((1, 1));

        let offset = line_col_to_offset(source, line, column);
        let message = err.to_string();

        Self {
            src: NamedSource::new(filename, source.to_string()),
            span: SourceSpan::from(offset..offset.saturating_add(1).min(source.len().max(1))),
            help: suggest_fix(&message),
            message,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Convert a 1-based line/column pair to a byte offset, clamped to the source
fn line_col_to_offset(source: &str, line: usize, column: usize) -> usize {
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    let line_text = source[line_start.min(source.len())..]
        .split('\n')
        .next()
        .unwrap_or("");
    let within = line_text
        .char_indices()
        .nth(column.saturating_sub(1))
        .map(|(i, _)| i)
        .unwrap_or(line_text.len());
    (line_start + within).min(source.len())
}

fn suggest_fix(message: &str) -> Option<String> {
    let lower = message.to_lowercase();

    if lower.contains("missing field") {
        return Some(
            "parts need name, price, stock, min, max and source; products need name, price, stock, min, max"
                .to_string(),
        );
    }

    if lower.contains("unknown variant") {
        return Some("source must be 'in_house' (with machine_id) or 'outsourced' (with company_name)".to_string());
    }

    if lower.contains("tab") {
        return Some("YAML requires spaces for indentation, not tabs".to_string());
    }

    if lower.contains("invalid type") {
        return Some("check that numeric fields hold numbers and names hold text".to_string());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col_to_offset() {
        let source = "parts:\n  - name: x\nproducts: []";
        assert_eq!(line_col_to_offset(source, 1, 1), 0);
        assert_eq!(line_col_to_offset(source, 2, 1), 7);
        assert_eq!(line_col_to_offset(source, 2, 5), 11);
        assert_eq!(line_col_to_offset(source, 3, 1), 19);
        assert_eq!(line_col_to_offset(source, 40, 1), source.len());
    }

    #[test]
    fn test_suggestions() {
        assert!(suggest_fix("missing field `price`").is_some());
        assert!(suggest_fix("unknown variant `bought`").is_some());
        assert!(suggest_fix("something else").is_none());
    }
}
