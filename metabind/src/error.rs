// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for metadata extraction
//!
//! Errors come in two tiers. Field-level anomalies (a missing column, a
//! nested provider call that fails) are tolerated by the binder and recorded
//! as diagnostics. Structural failures (a malformed descriptor, a closed
//! connection) surface as [`MetadataError`] from the top-level operation.

use crate::provider::Operation;
use thiserror::Error;

/// Errors reported by a [`MetadataProvider`](crate::provider::MetadataProvider)
/// or one of its row cursors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("Operation not supported: {0}")]
    Unsupported(Operation),

    #[error("Provider call failed: {0}")]
    Failed(String),

    #[error("Connection closed: {0}")]
    ConnectionClosed(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),
}

/// A row value that cannot be stored in the field it is bound to.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoercionError {
    #[error("unexpected null")]
    UnexpectedNull,

    #[error("value {value} out of range for {target}")]
    OutOfRange { value: i64, target: &'static str },

    #[error("expected {expected}, found {found}")]
    Mismatch {
        expected: &'static str,
        found: &'static str,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetadataError {
    #[error("Invalid descriptor for '{entity}': {reason}")]
    InvalidDescriptor { entity: &'static str, reason: String },

    #[error("{operation} failed{}: {source}", describe_path(.path))]
    Provider {
        operation: Operation,
        path: Option<String>,
        #[source]
        source: ProviderError,
    },

    #[error("Invalid argument for {operation}: {reason}")]
    InvalidArgument {
        operation: Operation,
        reason: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

fn describe_path(path: &Option<String>) -> String {
    match path {
        Some(path) => format!(" at {}", path),
        None => String::new(),
    }
}

impl MetadataError {
    pub(crate) fn provider(operation: Operation, source: ProviderError) -> Self {
        MetadataError::Provider {
            operation,
            path: None,
            source,
        }
    }

    /// Attach the path being expanded, keeping any path already recorded.
    pub(crate) fn at_path(self, at: &str) -> Self {
        match self {
            MetadataError::Provider {
                operation,
                path: None,
                source,
            } => MetadataError::Provider {
                operation,
                path: Some(at.to_string()),
                source,
            },
            other => other,
        }
    }

    /// Whether this error must abort the enclosing top-level operation.
    ///
    /// Descriptor faults and a closed connection cannot be recovered by
    /// skipping a single field. Every other provider or argument error is
    /// tolerated when it happens inside a nested expansion.
    pub fn is_structural(&self) -> bool {
        match self {
            MetadataError::InvalidDescriptor { .. } => true,
            MetadataError::Provider { source, .. } => {
                matches!(source, ProviderError::ConnectionClosed(_))
            }
            MetadataError::InvalidArgument { .. } => false,
            MetadataError::Config(_)
            | MetadataError::Io(_)
            | MetadataError::Serialization(_) => true,
        }
    }
}

impl From<std::io::Error> for MetadataError {
    fn from(err: std::io::Error) -> Self {
        MetadataError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for MetadataError {
    fn from(err: serde_json::Error) -> Self {
        MetadataError::Serialization(err.to_string())
    }
}

pub type MetadataResult<T> = Result<T, MetadataError>;

pub type ProviderResult<T> = Result<T, ProviderError>;
