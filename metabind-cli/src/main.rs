// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! metabind CLI entry point

use clap::Parser;
use colored::Colorize;

mod cli;
use cli::{Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // -v wins over --log-level; RUST_LOG can still refine the default
    let log_level = if cli.verbose {
        log::LevelFilter::Debug
    } else if let Some(level) = cli.log_level {
        level.to_level_filter()
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    match cli.command {
        Commands::Version => {
            println!("{} {}", "metabind".bold().green(), metabind::VERSION);
            println!("Relational catalog metadata binder");
            Ok(())
        }

        Commands::Extract {
            snapshot,
            config,
            suppress,
            allow_empty,
            report_unknown_labels,
            format,
            output,
        } => cli::handle_extract(cli::ExtractArgs {
            snapshot,
            config,
            suppress,
            allow_empty,
            report_unknown_labels,
            format,
            output,
        }),

        Commands::Operations => cli::handle_operations(),
    }
}
