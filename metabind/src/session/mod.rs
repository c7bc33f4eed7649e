// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Extraction session state
//!
//! A [`Session`] is owned by one context and passed by reference into every
//! binder call. It holds the suppression filter and the diagnostics log of
//! one extraction; nothing in it is shared between contexts.

pub mod diagnostics;
pub mod suppression;

pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use suppression::SuppressionFilter;

#[derive(Debug, Clone, Default)]
pub struct Session {
    suppression: SuppressionFilter,
    diagnostics: Vec<Diagnostic>,
    report_unknown_labels: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_suppression(suppression: SuppressionFilter) -> Self {
        Self {
            suppression,
            ..Self::default()
        }
    }

    pub fn suppression(&self) -> &SuppressionFilter {
        &self.suppression
    }

    pub fn suppression_mut(&mut self) -> &mut SuppressionFilter {
        &mut self.suppression
    }

    pub fn is_suppressed(&self, path: &str) -> bool {
        self.suppression.is_suppressed(path)
    }

    pub fn report_unknown_labels(&self) -> bool {
        self.report_unknown_labels
    }

    pub fn set_report_unknown_labels(&mut self, report: bool) {
        self.report_unknown_labels = report;
    }

    pub fn record(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Drain the diagnostics recorded so far.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}
