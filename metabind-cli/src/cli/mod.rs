// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI module for metabind
//!
//! Extracts a metadata graph from a recorded source snapshot and prints it
//! as JSON, as a tree, or as a per-table summary.

pub mod commands;
pub mod extract;
pub mod output;

pub use commands::{Cli, Commands};
pub use extract::{handle_extract, handle_operations, ExtractArgs};
