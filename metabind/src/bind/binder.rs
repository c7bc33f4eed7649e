// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Row binding
//!
//! Populates one entity from the current row of a cursor using its column
//! directives. Every field ends in a [`FieldStatus`]; anything other than
//! bound, discarded or suppressed is logged and recorded as a diagnostic,
//! and the field keeps its zero value. Row binding never fails and never
//! moves the cursor.

use super::Binder;
use crate::descriptor::{path_of, ColumnBinding, Descriptor, Entity};
use crate::error::{CoercionError, ProviderError};
use crate::provider::RowCursor;
use crate::session::{Diagnostic, DiagnosticKind};
use std::collections::HashSet;

/// Outcome of binding one column directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldStatus {
    Bound,
    /// An unused column was present and its value dropped.
    Discarded,
    Suppressed,
    Skipped { kind: DiagnosticKind, reason: String },
}

impl FieldStatus {
    fn skipped(kind: DiagnosticKind, reason: impl Into<String>) -> Self {
        FieldStatus::Skipped {
            kind,
            reason: reason.into(),
        }
    }
}

impl<'a> Binder<'a> {
    pub(crate) fn bind_row<T: Entity>(
        &mut self,
        descriptor: &Descriptor<T>,
        row: &dyn RowCursor,
        instance: &mut T,
    ) {
        let labels: HashSet<&str> = row.labels().iter().map(String::as_str).collect();

        for column in &descriptor.columns {
            let path = path_of(T::NAME, column.field);
            match self.bind_field(column, &path, &labels, row, instance) {
                FieldStatus::Bound | FieldStatus::Discarded => {}
                FieldStatus::Suppressed => log::debug!("Skipping suppressed path '{}'", path),
                FieldStatus::Skipped { kind, reason } => {
                    log::warn!("Skipping {} ({}): {}", path, kind, reason);
                    self.session.record(Diagnostic::new(path, kind, reason));
                }
            }
        }
    }

    fn bind_field<T>(
        &self,
        column: &ColumnBinding<T>,
        path: &str,
        labels: &HashSet<&str>,
        row: &dyn RowCursor,
        instance: &mut T,
    ) -> FieldStatus {
        if self.session.is_suppressed(path) {
            return FieldStatus::Suppressed;
        }
        if !labels.contains(column.label) {
            return FieldStatus::skipped(
                DiagnosticKind::MissingColumn,
                format!("label '{}' is not in the row", column.label),
            );
        }
        let slot = match &column.slot {
            Some(slot) if !column.unused => slot,
            _ => return FieldStatus::Discarded,
        };

        let value = match row.value(column.label) {
            Ok(value) => value,
            Err(ProviderError::ColumnNotFound(label)) => {
                return FieldStatus::skipped(
                    DiagnosticKind::MissingColumn,
                    format!("label '{}' is not readable", label),
                )
            }
            Err(e) => return FieldStatus::skipped(DiagnosticKind::CoercionFailed, e.to_string()),
        };

        match slot.write(instance, &value) {
            Ok(()) => FieldStatus::Bound,
            Err(CoercionError::UnexpectedNull) => FieldStatus::skipped(
                DiagnosticKind::UnexpectedNull,
                format!("label '{}' is null but the field is not nillable", column.label),
            ),
            Err(e) => FieldStatus::skipped(
                DiagnosticKind::CoercionFailed,
                format!("label '{}': {}", column.label, e),
            ),
        }
    }

    /// Record the labels of a cursor that no column directive consumes.
    pub(crate) fn report_unknown_labels<T: Entity>(
        &mut self,
        descriptor: &Descriptor<T>,
        cursor: &dyn RowCursor,
    ) {
        if !self.session.report_unknown_labels() {
            return;
        }
        let known: HashSet<&str> = descriptor.labels().collect();
        for label in cursor.labels() {
            if !known.contains(label.as_str()) {
                log::debug!("Unknown label '{}' for entity '{}'", label, T::NAME);
                self.session.record(Diagnostic::new(
                    path_of(T::NAME, label),
                    DiagnosticKind::UnknownLabel,
                    format!("label '{}' is not bound by any field", label),
                ));
            }
        }
    }
}
