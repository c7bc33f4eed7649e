// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Recorded-response metadata provider
//!
//! [`InMemoryProvider`] answers introspection calls from tables registered
//! up front or loaded from a JSON snapshot. A response registered for an
//! exact argument list wins over one registered for the whole operation;
//! a call with no matching response yields zero rows.
//!
//! Every call is logged so callers can assert how many round trips an
//! extraction made, and every cursor handed out is counted until closed.

use super::operation::{Argument, Operation};
use super::{CursorResult, MetadataProvider, RowCursor};
use crate::error::{MetadataResult, ProviderError, ProviderResult};
use crate::value::Value;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Labelled rows returned by one call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    pub labels: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
}

impl ResultTable {
    pub fn new(labels: &[&str]) -> Self {
        Self {
            labels: labels.iter().map(|l| l.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Values are matched to labels by position; missing
    /// trailing values read as null.
    pub fn row(mut self, values: Vec<Value>) -> Self {
        self.rows.push(values);
        self
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// A standalone cursor over this table, not tied to any provider.
    pub fn into_cursor(self) -> MemoryCursor {
        MemoryCursor::new(self, None)
    }
}

/// Cursor over a [`ResultTable`]
#[derive(Debug)]
pub struct MemoryCursor {
    table: ResultTable,
    position: Option<usize>,
    open: Option<Arc<AtomicUsize>>,
}

impl MemoryCursor {
    fn new(table: ResultTable, open: Option<Arc<AtomicUsize>>) -> Self {
        if let Some(counter) = &open {
            counter.fetch_add(1, Ordering::SeqCst);
        }
        Self {
            table,
            position: None,
            open,
        }
    }
}

impl RowCursor for MemoryCursor {
    fn labels(&self) -> &[String] {
        &self.table.labels
    }

    fn next_row(&mut self) -> ProviderResult<bool> {
        let next = self.position.map_or(0, |p| p + 1);
        self.position = Some(next.min(self.table.rows.len()));
        Ok(next < self.table.rows.len())
    }

    fn value(&self, label: &str) -> ProviderResult<Value> {
        let index = self
            .table
            .labels
            .iter()
            .position(|l| l == label)
            .ok_or_else(|| ProviderError::ColumnNotFound(label.to_string()))?;
        let row = self
            .position
            .and_then(|p| self.table.rows.get(p))
            .ok_or_else(|| ProviderError::Failed("cursor is not positioned on a row".to_string()))?;
        Ok(row.get(index).cloned().unwrap_or(Value::Null))
    }

    fn close(&mut self) -> ProviderResult<()> {
        if let Some(counter) = self.open.take() {
            counter.fetch_sub(1, Ordering::SeqCst);
        }
        Ok(())
    }
}

/// One registered response. `arguments: None` answers every call of the
/// operation that has no exact match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedResponse {
    pub operation: Operation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Vec<Argument>>,
    pub result: ResultTable,
}

/// Serialized form of an [`InMemoryProvider`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub responses: Vec<RecordedResponse>,
}

/// A call observed by an [`InMemoryProvider`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub operation: Operation,
    pub arguments: Vec<Argument>,
}

#[derive(Debug, Default)]
pub struct InMemoryProvider {
    responses: Vec<RecordedResponse>,
    failures: HashMap<Operation, ProviderError>,
    unsupported: Vec<Operation>,
    calls: Mutex<Vec<RecordedCall>>,
    open_cursors: Arc<AtomicUsize>,
    closed: AtomicBool,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every call of `operation` with `result`.
    pub fn respond(mut self, operation: Operation, result: ResultTable) -> Self {
        self.register(operation, None, result);
        self
    }

    /// Answer calls of `operation` made with exactly `arguments`.
    pub fn respond_to(
        mut self,
        operation: Operation,
        arguments: Vec<Argument>,
        result: ResultTable,
    ) -> Self {
        self.register(operation, Some(arguments), result);
        self
    }

    /// Make every call of `operation` fail with `error`.
    pub fn fail(mut self, operation: Operation, error: ProviderError) -> Self {
        self.failures.insert(operation, error);
        self
    }

    /// Report `operation` as unsupported, as a provider lacking it would.
    pub fn unsupport(mut self, operation: Operation) -> Self {
        if !self.unsupported.contains(&operation) {
            self.unsupported.push(operation);
        }
        self
    }

    fn register(
        &mut self,
        operation: Operation,
        arguments: Option<Vec<Argument>>,
        result: ResultTable,
    ) {
        match self
            .responses
            .iter_mut()
            .find(|r| r.operation == operation && r.arguments == arguments)
        {
            Some(existing) => existing.result = result,
            None => self.responses.push(RecordedResponse {
                operation,
                arguments,
                result,
            }),
        }
    }

    /// Simulate a dropped connection. Every later call fails.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self, operation: Operation) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.operation == operation)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    /// Number of cursors handed out and not yet closed.
    pub fn open_cursors(&self) -> usize {
        self.open_cursors.load(Ordering::SeqCst)
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut provider = Self::new();
        for response in snapshot.responses {
            provider.register(response.operation, response.arguments, response.result);
        }
        provider
    }

    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            responses: self.responses.clone(),
        }
    }

    pub fn from_json_str(json: &str) -> MetadataResult<Self> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        Ok(Self::from_snapshot(snapshot))
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> MetadataResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let provider = Self::from_json_str(&content)?;
        log::debug!(
            "Loaded {} recorded responses from {}",
            provider.responses.len(),
            path.as_ref().display()
        );
        Ok(provider)
    }

    pub fn save_json_file<P: AsRef<Path>>(&self, path: P) -> MetadataResult<()> {
        let json = serde_json::to_string_pretty(&self.to_snapshot())?;
        std::fs::write(path, json)?;
        Ok(())
    }

    fn answer(&self, operation: Operation, arguments: Vec<Argument>) -> CursorResult<'_> {
        let exact = self
            .responses
            .iter()
            .find(|r| r.operation == operation && r.arguments.as_ref() == Some(&arguments));
        self.calls.lock().push(RecordedCall {
            operation,
            arguments,
        });

        if self.is_closed() {
            return Err(ProviderError::ConnectionClosed(
                "provider has been closed".to_string(),
            ));
        }
        if self.unsupported.contains(&operation) {
            return Err(ProviderError::Unsupported(operation));
        }
        if let Some(error) = self.failures.get(&operation) {
            return Err(error.clone());
        }

        let table = exact
            .or_else(|| {
                self.responses
                    .iter()
                    .find(|r| r.operation == operation && r.arguments.is_none())
            })
            .map(|r| r.result.clone())
            .unwrap_or_default();
        Ok(Box::new(MemoryCursor::new(
            table,
            Some(Arc::clone(&self.open_cursors)),
        )))
    }
}

fn text(value: Option<&str>) -> Argument {
    Argument::from(value)
}

impl MetadataProvider for InMemoryProvider {
    fn get_attributes(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        type_name_pattern: Option<&str>,
        attribute_name_pattern: Option<&str>,
    ) -> CursorResult<'_> {
        self.answer(
            Operation::GetAttributes,
            vec![
                text(catalog),
                text(schema_pattern),
                text(type_name_pattern),
                text(attribute_name_pattern),
            ],
        )
    }

    fn get_best_row_identifier(
        &self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table: Option<&str>,
        scope: i32,
        nullable: bool,
    ) -> CursorResult<'_> {
        self.answer(
            Operation::GetBestRowIdentifier,
            vec![
                text(catalog),
                text(schema),
                text(table),
                Argument::Int(scope),
                Argument::Bool(nullable),
            ],
        )
    }

    fn get_catalogs(&self) -> CursorResult<'_> {
        self.answer(Operation::GetCatalogs, Vec::new())
    }

    fn get_client_info_properties(&self) -> CursorResult<'_> {
        self.answer(Operation::GetClientInfoProperties, Vec::new())
    }

    fn get_column_privileges(
        &self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table: Option<&str>,
        column_name_pattern: Option<&str>,
    ) -> CursorResult<'_> {
        self.answer(
            Operation::GetColumnPrivileges,
            vec![text(catalog), text(schema), text(table), text(column_name_pattern)],
        )
    }

    fn get_columns(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        table_name_pattern: Option<&str>,
        column_name_pattern: Option<&str>,
    ) -> CursorResult<'_> {
        self.answer(
            Operation::GetColumns,
            vec![
                text(catalog),
                text(schema_pattern),
                text(table_name_pattern),
                text(column_name_pattern),
            ],
        )
    }

    fn get_cross_reference(
        &self,
        parent_catalog: Option<&str>,
        parent_schema: Option<&str>,
        parent_table: Option<&str>,
        foreign_catalog: Option<&str>,
        foreign_schema: Option<&str>,
        foreign_table: Option<&str>,
    ) -> CursorResult<'_> {
        self.answer(
            Operation::GetCrossReference,
            vec![
                text(parent_catalog),
                text(parent_schema),
                text(parent_table),
                text(foreign_catalog),
                text(foreign_schema),
                text(foreign_table),
            ],
        )
    }

    fn get_exported_keys(
        &self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table: Option<&str>,
    ) -> CursorResult<'_> {
        self.answer(
            Operation::GetExportedKeys,
            vec![text(catalog), text(schema), text(table)],
        )
    }

    fn get_function_columns(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        function_name_pattern: Option<&str>,
        column_name_pattern: Option<&str>,
    ) -> CursorResult<'_> {
        self.answer(
            Operation::GetFunctionColumns,
            vec![
                text(catalog),
                text(schema_pattern),
                text(function_name_pattern),
                text(column_name_pattern),
            ],
        )
    }

    fn get_functions(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        function_name_pattern: Option<&str>,
    ) -> CursorResult<'_> {
        self.answer(
            Operation::GetFunctions,
            vec![text(catalog), text(schema_pattern), text(function_name_pattern)],
        )
    }

    fn get_imported_keys(
        &self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table: Option<&str>,
    ) -> CursorResult<'_> {
        self.answer(
            Operation::GetImportedKeys,
            vec![text(catalog), text(schema), text(table)],
        )
    }

    fn get_index_info(
        &self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table: Option<&str>,
        unique: bool,
        approximate: bool,
    ) -> CursorResult<'_> {
        self.answer(
            Operation::GetIndexInfo,
            vec![
                text(catalog),
                text(schema),
                text(table),
                Argument::Bool(unique),
                Argument::Bool(approximate),
            ],
        )
    }

    fn get_primary_keys(
        &self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table: Option<&str>,
    ) -> CursorResult<'_> {
        self.answer(
            Operation::GetPrimaryKeys,
            vec![text(catalog), text(schema), text(table)],
        )
    }

    fn get_procedure_columns(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        procedure_name_pattern: Option<&str>,
        column_name_pattern: Option<&str>,
    ) -> CursorResult<'_> {
        self.answer(
            Operation::GetProcedureColumns,
            vec![
                text(catalog),
                text(schema_pattern),
                text(procedure_name_pattern),
                text(column_name_pattern),
            ],
        )
    }

    fn get_procedures(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        procedure_name_pattern: Option<&str>,
    ) -> CursorResult<'_> {
        self.answer(
            Operation::GetProcedures,
            vec![text(catalog), text(schema_pattern), text(procedure_name_pattern)],
        )
    }

    fn get_pseudo_columns(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        table_name_pattern: Option<&str>,
        column_name_pattern: Option<&str>,
    ) -> CursorResult<'_> {
        self.answer(
            Operation::GetPseudoColumns,
            vec![
                text(catalog),
                text(schema_pattern),
                text(table_name_pattern),
                text(column_name_pattern),
            ],
        )
    }

    fn get_schemas(&self) -> CursorResult<'_> {
        self.answer(Operation::GetSchemas, Vec::new())
    }

    fn get_schemas_matching(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
    ) -> CursorResult<'_> {
        self.answer(
            Operation::GetSchemasMatching,
            vec![text(catalog), text(schema_pattern)],
        )
    }

    fn get_super_tables(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        table_name_pattern: Option<&str>,
    ) -> CursorResult<'_> {
        self.answer(
            Operation::GetSuperTables,
            vec![text(catalog), text(schema_pattern), text(table_name_pattern)],
        )
    }

    fn get_super_types(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        type_name_pattern: Option<&str>,
    ) -> CursorResult<'_> {
        self.answer(
            Operation::GetSuperTypes,
            vec![text(catalog), text(schema_pattern), text(type_name_pattern)],
        )
    }

    fn get_table_privileges(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        table_name_pattern: Option<&str>,
    ) -> CursorResult<'_> {
        self.answer(
            Operation::GetTablePrivileges,
            vec![text(catalog), text(schema_pattern), text(table_name_pattern)],
        )
    }

    fn get_table_types(&self) -> CursorResult<'_> {
        self.answer(Operation::GetTableTypes, Vec::new())
    }

    fn get_tables(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        table_name_pattern: Option<&str>,
        types: Option<&[String]>,
    ) -> CursorResult<'_> {
        self.answer(
            Operation::GetTables,
            vec![
                text(catalog),
                text(schema_pattern),
                text(table_name_pattern),
                Argument::from(types),
            ],
        )
    }

    fn get_type_info(&self) -> CursorResult<'_> {
        self.answer(Operation::GetTypeInfo, Vec::new())
    }

    fn get_udts(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        type_name_pattern: Option<&str>,
        types: Option<&[i32]>,
    ) -> CursorResult<'_> {
        self.answer(
            Operation::GetUdts,
            vec![
                text(catalog),
                text(schema_pattern),
                text(type_name_pattern),
                Argument::from(types),
            ],
        )
    }

    fn get_version_columns(
        &self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table: Option<&str>,
    ) -> CursorResult<'_> {
        self.answer(
            Operation::GetVersionColumns,
            vec![text(catalog), text(schema), text(table)],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::dispatch;

    fn catalogs() -> ResultTable {
        ResultTable::new(&["TABLE_CAT"])
            .row(vec!["db1".into()])
            .row(vec!["db2".into()])
    }

    #[test]
    fn test_exact_arguments_win_over_default() {
        let provider = InMemoryProvider::new()
            .respond(
                Operation::GetSchemasMatching,
                ResultTable::new(&["TABLE_SCHEM"]).row(vec!["fallback".into()]),
            )
            .respond_to(
                Operation::GetSchemasMatching,
                vec![Argument::from("db1"), Argument::Null],
                ResultTable::new(&["TABLE_SCHEM"]).row(vec!["public".into()]),
            );

        let args = [Argument::from("db1"), Argument::Null];
        let mut cursor = dispatch(&provider, Operation::GetSchemasMatching, &args).unwrap();
        assert!(cursor.next_row().unwrap());
        assert_eq!(cursor.value("TABLE_SCHEM").unwrap(), Value::from("public"));
        drop(cursor);

        let args = [Argument::from("db2"), Argument::Null];
        let mut cursor = dispatch(&provider, Operation::GetSchemasMatching, &args).unwrap();
        assert!(cursor.next_row().unwrap());
        assert_eq!(cursor.value("TABLE_SCHEM").unwrap(), Value::from("fallback"));
    }

    #[test]
    fn test_unregistered_operation_yields_no_rows() {
        let provider = InMemoryProvider::new();
        let mut cursor = dispatch(&provider, Operation::GetTableTypes, &[]).unwrap();
        assert!(cursor.labels().is_empty());
        assert!(!cursor.next_row().unwrap());
    }

    #[test]
    fn test_guard_closes_cursor() {
        let provider = InMemoryProvider::new().respond(Operation::GetCatalogs, catalogs());
        {
            let _cursor = dispatch(&provider, Operation::GetCatalogs, &[]).unwrap();
            assert_eq!(provider.open_cursors(), 1);
        }
        assert_eq!(provider.open_cursors(), 0);
        assert_eq!(provider.call_count(Operation::GetCatalogs), 1);
    }

    #[test]
    fn test_closed_provider_rejects_calls() {
        let provider = InMemoryProvider::new().respond(Operation::GetCatalogs, catalogs());
        provider.close();
        let err = dispatch(&provider, Operation::GetCatalogs, &[]).err().unwrap();
        assert!(err.is_structural());
    }

    #[test]
    fn test_injected_failure_and_unsupport() {
        let provider = InMemoryProvider::new()
            .fail(Operation::GetTypeInfo, ProviderError::Failed("denied".to_string()))
            .unsupport(Operation::GetTableTypes);

        let err = provider.get_type_info().err().unwrap();
        assert_eq!(err, ProviderError::Failed("denied".to_string()));
        let err = provider.get_table_types().err().unwrap();
        assert_eq!(err, ProviderError::Unsupported(Operation::GetTableTypes));
        assert_eq!(provider.total_calls(), 2);
    }

    #[test]
    fn test_value_before_first_row_fails() {
        let cursor = catalogs().into_cursor();
        assert!(cursor.value("TABLE_CAT").is_err());
    }

    #[test]
    fn test_snapshot_json_round_trip() {
        let provider = InMemoryProvider::new()
            .respond(Operation::GetCatalogs, catalogs())
            .respond_to(
                Operation::GetSchemasMatching,
                vec![Argument::from("db1"), Argument::Null],
                ResultTable::new(&["TABLE_SCHEM", "TABLE_CATALOG"])
                    .row(vec!["public".into(), "db1".into()]),
            );

        let json = serde_json::to_string(&provider.to_snapshot()).unwrap();
        let restored = InMemoryProvider::from_json_str(&json).unwrap();
        assert_eq!(restored.to_snapshot(), provider.to_snapshot());
    }
}
