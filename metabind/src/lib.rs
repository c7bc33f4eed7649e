// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! metabind - relational catalog metadata as a typed object graph
//!
//! metabind walks the introspection surface of a relational source
//! (catalogs, schemas, tables, columns, keys, indexes, routines and
//! user-defined types) and binds every row into a typed entity. Which
//! columns an entity reads and which child collections it fetches are
//! declared once per entity as a directive table; the binder interprets
//! those tables generically.
//!
//! # Features
//!
//! - **Declarative entities**: column and invocation directives per type
//! - **Back-referenced arguments**: child calls take their arguments from
//!   the parent row (`":tableName"`)
//! - **Suppression**: any `"<entity>/<field>"` path can be skipped
//! - **Tolerant expansion**: nested failures become diagnostics, top-level
//!   failures are errors
//! - **Recorded providers**: [`InMemoryProvider`] replays JSON snapshots
//!
//! # Usage
//!
//! ```no_run
//! use metabind::{InMemoryProvider, MetadataContext};
//!
//! let provider = InMemoryProvider::from_json_file("snapshot.json")?;
//! let mut ctx = MetadataContext::new(&provider);
//! ctx.suppress(["table/indexInfo"]);
//! let metadata = ctx.snapshot(true)?;
//! println!("{}", serde_json::to_string_pretty(&metadata)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod bind;
pub mod config;
pub mod context;
pub mod descriptor;
pub mod error;
pub mod model;
pub mod provider;
pub mod session;
pub mod value;

pub use bind::{Binder, FieldStatus};
pub use config::ExtractionConfig;
pub use context::MetadataContext;
pub use descriptor::{Descriptor, DescriptorRegistry, Directive, Entity};
pub use error::{CoercionError, MetadataError, MetadataResult, ProviderError, ProviderResult};
pub use model::Metadata;
pub use provider::{
    dispatch, Argument, CursorGuard, InMemoryProvider, MetadataProvider, Operation, ResultTable,
    RowCursor, Snapshot,
};
pub use session::{Diagnostic, DiagnosticKind, Session, SuppressionFilter};
pub use value::{ColumnValue, Value};

/// metabind version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// metabind crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
