// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Command handlers

use super::commands::OutputFormat;
use super::output::MetadataFormatter;
use colored::*;
use metabind::{ExtractionConfig, InMemoryProvider, MetadataContext};
use std::path::PathBuf;

/// Arguments of the `extract` command
pub struct ExtractArgs {
    pub snapshot: PathBuf,
    pub config: Option<PathBuf>,
    pub suppress: Vec<String>,
    pub allow_empty: bool,
    pub report_unknown_labels: bool,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

/// Build the effective config: file (or defaults), then command-line overrides.
fn load_config(args: &ExtractArgs) -> Result<ExtractionConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => ExtractionConfig::from_json_file(path)?,
        None => ExtractionConfig::default(),
    };
    config = config.suppress(args.suppress.iter().cloned());
    if args.allow_empty {
        config.nonempty = false;
    }
    if args.report_unknown_labels {
        config.report_unknown_labels = true;
    }
    config.validate()?;
    Ok(config)
}

pub fn handle_extract(args: ExtractArgs) -> Result<(), Box<dyn std::error::Error>> {
    if !args.snapshot.exists() {
        return Err(format!("Snapshot not found at {:?}", args.snapshot).into());
    }

    let config = load_config(&args)?;
    let provider = InMemoryProvider::from_json_file(&args.snapshot)?;
    log::info!(
        "Extracting from {:?} with {} suppressed paths",
        args.snapshot,
        config.suppressed_paths.len()
    );

    let nonempty = config.nonempty;
    let mut ctx = MetadataContext::with_config(&provider, config);
    let metadata = match ctx.snapshot(nonempty) {
        Ok(metadata) => metadata,
        Err(e) => {
            eprintln!("{}", format!("Error: {}", e).red());
            return Err(e.into());
        }
    };
    let diagnostics = ctx.take_diagnostics();
    log::info!(
        "Extraction finished after {} provider calls",
        provider.total_calls()
    );

    if args.output.is_some() {
        colored::control::set_override(false);
    }
    let rendered = MetadataFormatter::format(&metadata, &diagnostics, args.format);

    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            println!("{} {}", "Wrote".green(), path.display());
        }
        None => println!("{}", rendered),
    }

    if !diagnostics.is_empty() && args.format != OutputFormat::Json {
        eprintln!(
            "{}",
            format!("{} diagnostics recorded", diagnostics.len()).yellow()
        );
    }
    Ok(())
}

pub fn handle_operations() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", MetadataFormatter::operations_table());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ExtractArgs {
        ExtractArgs {
            snapshot: PathBuf::from("source.json"),
            config: None,
            suppress: vec!["table/columns".to_string()],
            allow_empty: true,
            report_unknown_labels: false,
            format: OutputFormat::Json,
            output: None,
        }
    }

    #[test]
    fn test_command_line_overrides_defaults() {
        let config = load_config(&args()).unwrap();
        assert!(!config.nonempty);
        assert_eq!(config.suppressed_paths, vec!["table/columns"]);
    }

    #[test]
    fn test_malformed_suppression_rejected() {
        let mut args = args();
        args.suppress.push("columns".to_string());
        assert!(load_config(&args).is_err());
    }
}
