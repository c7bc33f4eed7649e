// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Metadata formatting for CLI output

use super::commands::OutputFormat;
use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use metabind::model::{Catalog, Schema, Table as MetaTable};
use metabind::{Diagnostic, Metadata, Operation};

/// Formatter for the different output formats
pub struct MetadataFormatter;

impl MetadataFormatter {
    pub fn format(metadata: &Metadata, diagnostics: &[Diagnostic], format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => Self::format_json(metadata, diagnostics),
            OutputFormat::Tree => Self::format_tree(metadata, diagnostics),
            OutputFormat::Table => Self::format_table(metadata, diagnostics),
        }
    }

    fn format_json(metadata: &Metadata, diagnostics: &[Diagnostic]) -> String {
        let document = serde_json::json!({
            "version": metabind::VERSION,
            "metadata": metadata,
            "diagnostics": diagnostics,
        });
        serde_json::to_string_pretty(&document).unwrap_or_else(|_| {
            "{\"status\": \"error\", \"error\": \"Could not serialize metadata to JSON\"}"
                .to_string()
        })
    }

    fn format_tree(metadata: &Metadata, diagnostics: &[Diagnostic]) -> String {
        let mut output = String::new();
        for catalog in &metadata.catalogs {
            Self::catalog_tree(catalog, &mut output);
        }
        if metadata.catalogs.is_empty() {
            output.push_str(&format!("{}\n", "No catalogs found".yellow()));
        }
        Self::append_diagnostics(diagnostics, &mut output);
        output
    }

    fn catalog_tree(catalog: &Catalog, output: &mut String) {
        output.push_str(&format!(
            "{} {}{}\n",
            "catalog".bold().green(),
            display_name(&catalog.table_cat),
            virtual_marker(catalog.is_virtual)
        ));
        for schema in &catalog.schemas {
            Self::schema_tree(schema, output);
        }
        if !catalog.cross_references.is_empty() {
            output.push_str(&format!(
                "  {} {}\n",
                "cross references:".cyan(),
                catalog.cross_references.len()
            ));
        }
    }

    fn schema_tree(schema: &Schema, output: &mut String) {
        output.push_str(&format!(
            "  {} {}{}\n",
            "schema".bold().blue(),
            display_name(&schema.table_schem),
            virtual_marker(schema.is_virtual)
        ));
        for table in &schema.tables {
            output.push_str(&format!(
                "    {} {} ({})\n",
                "table".bold(),
                table.table_name,
                table.table_type.dimmed()
            ));
            for column in &table.columns {
                output.push_str(&format!(
                    "      {} {}\n",
                    column.column_name,
                    column.type_name.dimmed()
                ));
            }
            for key in &table.imported_keys {
                output.push_str(&format!(
                    "      {} {} -> {}.{}\n",
                    "fk".cyan(),
                    key.fkcolumn_name,
                    key.pktable_name,
                    key.pkcolumn_name
                ));
            }
        }
        for procedure in &schema.procedures {
            output.push_str(&format!("    {} {}\n", "procedure".bold(), procedure.procedure_name));
        }
        for function in &schema.functions {
            output.push_str(&format!("    {} {}\n", "function".bold(), function.function_name));
        }
        for udt in &schema.udts {
            output.push_str(&format!("    {} {}\n", "type".bold(), udt.type_name));
        }
    }

    /// One row per table with child collection counts
    fn format_table(metadata: &Metadata, diagnostics: &[Diagnostic]) -> String {
        let tables: Vec<&MetaTable> = metadata.tables().collect();
        if tables.is_empty() {
            let mut output = format!("{}\n", "No tables found".yellow());
            Self::append_diagnostics(diagnostics, &mut output);
            return output;
        }

        let mut output = String::new();
        output.push_str(&format!("{}\n", "Tables".bold().green()));
        output.push_str(&format!("Tables found: {}\n\n", tables.len()));

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        let headers = [
            "table",
            "type",
            "columns",
            "primary keys",
            "imported keys",
            "exported keys",
            "indexes",
        ];
        table.set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).fg(Color::Green))
                .collect::<Vec<_>>(),
        );
        for t in tables {
            table.add_row(vec![
                t.qualified_name(),
                t.table_type.clone(),
                t.columns.len().to_string(),
                t.primary_keys.len().to_string(),
                t.imported_keys.len().to_string(),
                t.exported_keys.len().to_string(),
                t.index_info.len().to_string(),
            ]);
        }
        output.push_str(&table.to_string());
        output.push('\n');
        Self::append_diagnostics(diagnostics, &mut output);
        output
    }

    fn append_diagnostics(diagnostics: &[Diagnostic], output: &mut String) {
        if diagnostics.is_empty() {
            return;
        }
        output.push_str(&format!("\n{}\n", "Diagnostics:".bold().yellow()));
        for (i, diagnostic) in diagnostics.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, diagnostic.to_string().yellow()));
        }
    }

    /// Every operation with its positional parameter kinds
    pub fn operations_table() -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec![
            Cell::new("operation").fg(Color::Green),
            Cell::new("parameters").fg(Color::Green),
        ]);
        for operation in Operation::ALL {
            let parameters = operation
                .parameters()
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            table.add_row(vec![operation.name().to_string(), parameters]);
        }
        table.to_string()
    }
}

fn display_name(name: &str) -> String {
    if name.is_empty() {
        "\"\"".to_string()
    } else {
        name.to_string()
    }
}

fn virtual_marker(is_virtual: bool) -> ColoredString {
    if is_virtual {
        " (virtual)".dimmed()
    } else {
        "".normal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Metadata {
        let table = MetaTable {
            table_cat: Some("db1".to_string()),
            table_schem: Some("public".to_string()),
            table_name: "orders".to_string(),
            table_type: "TABLE".to_string(),
            ..MetaTable::default()
        };
        let schema = Schema {
            table_schem: "public".to_string(),
            table_catalog: Some("db1".to_string()),
            tables: vec![table],
            ..Schema::default()
        };
        Metadata {
            catalogs: vec![Catalog {
                table_cat: "db1".to_string(),
                schemas: vec![schema],
                ..Catalog::default()
            }],
            ..Metadata::default()
        }
    }

    #[test]
    fn test_json_wraps_metadata_and_diagnostics() {
        let rendered = MetadataFormatter::format(&sample(), &[], OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(
            value["metadata"]["catalogs"][0]["schemas"][0]["tables"][0]["tableName"],
            "orders"
        );
        assert!(value["diagnostics"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_tree_lists_every_level() {
        colored::control::set_override(false);
        let rendered = MetadataFormatter::format(&sample(), &[], OutputFormat::Tree);
        assert!(rendered.contains("catalog db1"));
        assert!(rendered.contains("schema public"));
        assert!(rendered.contains("table orders (TABLE)"));
    }

    #[test]
    fn test_operations_table_names_every_operation() {
        let rendered = MetadataFormatter::operations_table();
        for operation in Operation::ALL {
            assert!(rendered.contains(operation.name()));
        }
    }
}
