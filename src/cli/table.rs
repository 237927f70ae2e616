//! Rendering of part and product listings in every output format

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{format_price, truncate_str};
use crate::cli::OutputFormat;
use crate::core::{AssociatedPart, Inventory};
use crate::entities::{Part, Product};

const NAME_WIDTH: usize = 32;

const PART_HEADER: [&str; 8] = ["ID", "NAME", "SOURCE", "MACHINE/COMPANY", "PRICE", "STOCK", "MIN", "MAX"];
const PRODUCT_HEADER: [&str; 7] = ["ID", "NAME", "PRICE", "STOCK", "MIN", "MAX", "PARTS"];

fn part_row(part: &Part) -> Vec<String> {
    vec![
        part.id.to_string(),
        part.name.clone(),
        part.source().label().to_string(),
        part.source().detail(),
        format_price(part.price),
        part.stock.to_string(),
        part.min.to_string(),
        part.max.to_string(),
    ]
}

fn product_row(product: &Product) -> Vec<String> {
    vec![
        product.id.to_string(),
        product.name.clone(),
        format_price(product.price),
        product.stock.to_string(),
        product.min.to_string(),
        product.max.to_string(),
        product.associated_parts().len().to_string(),
    ]
}

/// Backslash-escape characters that would break a TSV row
fn escape_tsv(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    for c in field.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

/// Render rows in a tabular format; structured formats are handled by the callers
fn render_rows(header: &[&str], rows: Vec<Vec<String>>, format: OutputFormat, noun: &str) -> Result<String> {
    match format {
        OutputFormat::Tsv => {
            let mut out = header.join("\t");
            out.push('\n');
            for row in rows {
                let fields: Vec<String> = row.iter().map(|f| escape_tsv(f)).collect();
                out.push_str(&fields.join("\t"));
                out.push('\n');
            }
            Ok(out)
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record(header).into_diagnostic()?;
            for row in rows {
                writer.write_record(&row).into_diagnostic()?;
            }
            let bytes = writer
                .into_inner()
                .map_err(|e| miette::miette!("failed to write CSV: {}", e))?;
            String::from_utf8(bytes).into_diagnostic()
        }
        OutputFormat::Id => Ok(rows
            .into_iter()
            .filter_map(|row| row.into_iter().next())
            .map(|id| id + "\n")
            .collect()),
        _ => {
            if rows.is_empty() {
                return Ok(format!("No {}s found.\n", noun));
            }
            let count = rows.len();
            let mut builder = Builder::default();
            builder.push_record(header.iter().copied());
            for mut row in rows {
                row[1] = truncate_str(&row[1], NAME_WIDTH);
                builder.push_record(row);
            }
            let mut table = builder.build();
            let rendered = if format == OutputFormat::Md {
                table.with(Style::markdown()).to_string()
            } else {
                table.with(Style::rounded()).to_string()
            };
            Ok(format!(
                "{}\n\n{} {}(s) found.\n",
                rendered,
                style(count).cyan(),
                noun
            ))
        }
    }
}

fn render_structured<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> Option<Result<String>> {
    match format {
        OutputFormat::Json => Some(
            serde_json::to_string_pretty(value)
                .map(|s| s + "\n")
                .into_diagnostic(),
        ),
        OutputFormat::Yaml => Some(serde_yml::to_string(value).into_diagnostic()),
        _ => None,
    }
}

pub fn render_parts(parts: &[&Part], format: OutputFormat) -> Result<String> {
    if let Some(rendered) = render_structured(parts, format) {
        return rendered;
    }
    let rows = parts.iter().map(|p| part_row(p)).collect();
    render_rows(&PART_HEADER, rows, format, "part")
}

pub fn render_products(products: &[&Product], format: OutputFormat) -> Result<String> {
    if let Some(rendered) = render_structured(products, format) {
        return rendered;
    }
    let rows = products.iter().map(|p| product_row(p)).collect();
    render_rows(&PRODUCT_HEADER, rows, format, "product")
}

/// Detail view of one part
pub fn render_part_detail(part: &Part, used_in: &[&Product], format: OutputFormat) -> Result<String> {
    if let Some(rendered) = render_structured(part, format) {
        return rendered;
    }
    if format == OutputFormat::Id {
        return Ok(format!("{}\n", part.id));
    }

    let mut out = String::new();
    out.push_str(&format!("{}\n", style("─".repeat(60)).dim()));
    out.push_str(&format!("{}: {}\n", style("ID").bold(), style(part.id).cyan()));
    out.push_str(&format!("{}: {}\n", style("Name").bold(), style(&part.name).yellow()));
    out.push_str(&format!("{}: {}\n", style("Source").bold(), part.source()));
    match (part.machine_id(), part.company_name()) {
        (Some(machine_id), _) => out.push_str(&format!("{}: {}\n", style("Machine ID").bold(), machine_id)),
        (_, Some(company)) => out.push_str(&format!("{}: {}\n", style("Company").bold(), company)),
        _ => {}
    }
    out.push_str(&format!("{}: {}\n", style("Price").bold(), format_price(part.price)));
    out.push_str(&format!(
        "{}: {} (min {}, max {})\n",
        style("Inventory").bold(),
        part.stock,
        part.min,
        part.max
    ));
    if !used_in.is_empty() {
        let names: Vec<String> = used_in.iter().map(|p| format!("{} ({})", p.id, p.name)).collect();
        out.push_str(&format!("{}: {}\n", style("Used In").bold(), names.join(", ")));
    }
    out.push_str(&format!("{}\n", style("─".repeat(60)).dim()));
    Ok(out)
}

#[derive(Serialize)]
struct ProductDetail<'a> {
    #[serde(flatten)]
    product: &'a Product,
    resolved_parts: Vec<AssociationView<'a>>,
}

#[derive(Serialize)]
struct AssociationView<'a> {
    id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    orphaned: bool,
}

/// Detail view of one product with its associations resolved
pub fn render_product_detail(product: &Product, inventory: &Inventory, format: OutputFormat) -> Result<String> {
    let associations = inventory.resolve_parts_of(product);

    if matches!(format, OutputFormat::Json | OutputFormat::Yaml) {
        let detail = ProductDetail {
            product,
            resolved_parts: associations
                .iter()
                .map(|a| AssociationView {
                    id: a.id().value(),
                    name: match a {
                        AssociatedPart::Resolved(part) => Some(part.name.as_str()),
                        AssociatedPart::Orphaned(_) => None,
                    },
                    orphaned: a.is_orphaned(),
                })
                .collect(),
        };
        if let Some(rendered) = render_structured(&detail, format) {
            return rendered;
        }
    }
    if format == OutputFormat::Id {
        return Ok(format!("{}\n", product.id));
    }

    let mut out = String::new();
    out.push_str(&format!("{}\n", style("─".repeat(60)).dim()));
    out.push_str(&format!("{}: {}\n", style("ID").bold(), style(product.id).cyan()));
    out.push_str(&format!("{}: {}\n", style("Name").bold(), style(&product.name).yellow()));
    out.push_str(&format!("{}: {}\n", style("Price").bold(), format_price(product.price)));
    out.push_str(&format!(
        "{}: {} (min {}, max {})\n",
        style("Inventory").bold(),
        product.stock,
        product.min,
        product.max
    ));
    if associations.is_empty() {
        out.push_str(&format!("{}: {}\n", style("Associated Parts").bold(), style("none").dim()));
    } else {
        out.push_str(&format!("{}:\n", style("Associated Parts").bold()));
        for association in &associations {
            match association {
                AssociatedPart::Resolved(part) => out.push_str(&format!(
                    "  {} {} ({}, stock {})\n",
                    style(part.id).cyan(),
                    part.name,
                    part.source(),
                    part.stock
                )),
                AssociatedPart::Orphaned(id) => out.push_str(&format!(
                    "  {} {}\n",
                    style(id).cyan(),
                    style("(deleted part)").red()
                )),
            }
        }
    }
    out.push_str(&format!("{}\n", style("─".repeat(60)).dim()));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{seed_inventory, PartId};

    #[test]
    fn test_tsv_has_header_and_rows() {
        let inv = seed_inventory().unwrap();
        let parts: Vec<&Part> = inv.parts().iter().collect();
        let out = render_parts(&parts, OutputFormat::Tsv).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("ID\tNAME\tSOURCE"));
        assert_eq!(lines[1], "0\tBrakes\tin-house\t101\t15.00\t3\t1\t10");
        assert_eq!(lines[4], "3\tLight\toutsourced\tHoneywell\t20.00\t5\t1\t10");
    }

    #[test]
    fn test_tsv_escapes_tabs_and_newlines_in_names() {
        let part = Part::outsourced(PartId::new(9), "Bell\tbrass\nlarge", 4.0, 2, 1, 5, "Acme\\Co");
        let out = render_parts(&[&part], OutputFormat::Tsv).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "9\tBell\\tbrass\\nlarge\toutsourced\tAcme\\\\Co\t4.00\t2\t1\t5");
    }

    #[test]
    fn test_csv_quotes_fields_with_commas() {
        let part = Part::outsourced(PartId::new(9), "Bell, brass", 4.0, 2, 1, 5, "Acme");
        let out = render_parts(&[&part], OutputFormat::Csv).unwrap();
        assert!(out.contains("\"Bell, brass\""));
    }

    #[test]
    fn test_id_format_lists_ids_only() {
        let inv = seed_inventory().unwrap();
        let products: Vec<&Product> = inv.products().iter().collect();
        assert_eq!(render_products(&products, OutputFormat::Id).unwrap(), "0\n1\n");
    }

    #[test]
    fn test_empty_table_message() {
        assert_eq!(render_parts(&[], OutputFormat::Auto).unwrap(), "No parts found.\n");
    }

    #[test]
    fn test_product_detail_json_flags_orphans() {
        let mut inv = seed_inventory().unwrap();
        inv.delete_part(PartId::new(0));
        let product = inv.find_product_by_id(crate::core::ProductId::new(0)).unwrap().clone();
        let out = render_product_detail(&product, &inv, OutputFormat::Json).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["name"], "Giant Bike");
        assert_eq!(json["resolved_parts"][0]["orphaned"], true);
        assert_eq!(json["resolved_parts"][1]["name"], "Wheel");
        assert_eq!(json["associated_parts"].as_array().unwrap().len(), 4);
    }
}
