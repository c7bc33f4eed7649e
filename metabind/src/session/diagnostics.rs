// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Field-level diagnostics
//!
//! Anomalies the binder tolerates are recorded here instead of being
//! raised. Callers read them after an extraction to see which parts of the
//! graph were left sparse and why.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiagnosticKind {
    /// A declared label is absent from the row.
    MissingColumn,
    /// A null value met a field that cannot hold one.
    UnexpectedNull,
    /// A value could not be converted to the field type.
    CoercionFailed,
    /// The row carries a label no directive consumes.
    UnknownLabel,
    UnsupportedOperation,
    /// A nested provider call failed.
    InvocationFailed,
    /// A back-referenced field could not be passed as the parameter kind.
    ArgumentMismatch,
}

impl DiagnosticKind {
    pub fn name(&self) -> &'static str {
        match self {
            DiagnosticKind::MissingColumn => "missing-column",
            DiagnosticKind::UnexpectedNull => "unexpected-null",
            DiagnosticKind::CoercionFailed => "coercion-failed",
            DiagnosticKind::UnknownLabel => "unknown-label",
            DiagnosticKind::UnsupportedOperation => "unsupported-operation",
            DiagnosticKind::InvocationFailed => "invocation-failed",
            DiagnosticKind::ArgumentMismatch => "argument-mismatch",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub path: String,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(path: impl Into<String>, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.path, self.message)
    }
}
