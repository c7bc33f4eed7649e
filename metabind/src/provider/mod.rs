// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Metadata provider abstraction
//!
//! A [`MetadataProvider`] is the introspection source the binder queries.
//! It exposes one method per [`Operation`]; each returns a forward-only
//! [`RowCursor`] whose columns are addressed by case-sensitive label.
//! Providers only override the operations they support; the rest report
//! [`ProviderError::Unsupported`].

pub mod memory;
pub mod operation;

pub use memory::{
    InMemoryProvider, MemoryCursor, RecordedCall, RecordedResponse, ResultTable, Snapshot,
};
pub use operation::{Argument, Operation, ParamKind};

use crate::error::{MetadataError, MetadataResult, ProviderError, ProviderResult};
use crate::value::Value;
use std::ops::{Deref, DerefMut};

/// Forward-only cursor over the rows of one provider call
pub trait RowCursor {
    /// Column labels available on every row of this cursor.
    fn labels(&self) -> &[String];

    /// Advance to the next row. Returns `false` once the rows are exhausted.
    fn next_row(&mut self) -> ProviderResult<bool>;

    /// Value of the labelled column on the current row.
    fn value(&self, label: &str) -> ProviderResult<Value>;

    /// Release the cursor. Called exactly once by [`CursorGuard`].
    fn close(&mut self) -> ProviderResult<()> {
        Ok(())
    }
}

pub type CursorResult<'a> = ProviderResult<Box<dyn RowCursor + 'a>>;

fn unsupported<'a>(operation: Operation) -> CursorResult<'a> {
    Err(ProviderError::Unsupported(operation))
}

/// Introspection capability consumed by the binder
///
/// The parameter lists mirror [`Operation::parameters`]. `None` stands for
/// an absent argument; an empty string pattern is passed through as-is.
#[allow(unused_variables)]
pub trait MetadataProvider {
    fn get_attributes(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        type_name_pattern: Option<&str>,
        attribute_name_pattern: Option<&str>,
    ) -> CursorResult<'_> {
        unsupported(Operation::GetAttributes)
    }

    fn get_best_row_identifier(
        &self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table: Option<&str>,
        scope: i32,
        nullable: bool,
    ) -> CursorResult<'_> {
        unsupported(Operation::GetBestRowIdentifier)
    }

    fn get_catalogs(&self) -> CursorResult<'_> {
        unsupported(Operation::GetCatalogs)
    }

    fn get_client_info_properties(&self) -> CursorResult<'_> {
        unsupported(Operation::GetClientInfoProperties)
    }

    fn get_column_privileges(
        &self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table: Option<&str>,
        column_name_pattern: Option<&str>,
    ) -> CursorResult<'_> {
        unsupported(Operation::GetColumnPrivileges)
    }

    fn get_columns(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        table_name_pattern: Option<&str>,
        column_name_pattern: Option<&str>,
    ) -> CursorResult<'_> {
        unsupported(Operation::GetColumns)
    }

    #[allow(clippy::too_many_arguments)]
    fn get_cross_reference(
        &self,
        parent_catalog: Option<&str>,
        parent_schema: Option<&str>,
        parent_table: Option<&str>,
        foreign_catalog: Option<&str>,
        foreign_schema: Option<&str>,
        foreign_table: Option<&str>,
    ) -> CursorResult<'_> {
        unsupported(Operation::GetCrossReference)
    }

    fn get_exported_keys(
        &self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table: Option<&str>,
    ) -> CursorResult<'_> {
        unsupported(Operation::GetExportedKeys)
    }

    fn get_function_columns(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        function_name_pattern: Option<&str>,
        column_name_pattern: Option<&str>,
    ) -> CursorResult<'_> {
        unsupported(Operation::GetFunctionColumns)
    }

    fn get_functions(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        function_name_pattern: Option<&str>,
    ) -> CursorResult<'_> {
        unsupported(Operation::GetFunctions)
    }

    fn get_imported_keys(
        &self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table: Option<&str>,
    ) -> CursorResult<'_> {
        unsupported(Operation::GetImportedKeys)
    }

    fn get_index_info(
        &self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table: Option<&str>,
        unique: bool,
        approximate: bool,
    ) -> CursorResult<'_> {
        unsupported(Operation::GetIndexInfo)
    }

    fn get_primary_keys(
        &self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table: Option<&str>,
    ) -> CursorResult<'_> {
        unsupported(Operation::GetPrimaryKeys)
    }

    fn get_procedure_columns(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        procedure_name_pattern: Option<&str>,
        column_name_pattern: Option<&str>,
    ) -> CursorResult<'_> {
        unsupported(Operation::GetProcedureColumns)
    }

    fn get_procedures(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        procedure_name_pattern: Option<&str>,
    ) -> CursorResult<'_> {
        unsupported(Operation::GetProcedures)
    }

    fn get_pseudo_columns(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        table_name_pattern: Option<&str>,
        column_name_pattern: Option<&str>,
    ) -> CursorResult<'_> {
        unsupported(Operation::GetPseudoColumns)
    }

    fn get_schemas(&self) -> CursorResult<'_> {
        unsupported(Operation::GetSchemas)
    }

    fn get_schemas_matching(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
    ) -> CursorResult<'_> {
        unsupported(Operation::GetSchemasMatching)
    }

    fn get_super_tables(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        table_name_pattern: Option<&str>,
    ) -> CursorResult<'_> {
        unsupported(Operation::GetSuperTables)
    }

    fn get_super_types(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        type_name_pattern: Option<&str>,
    ) -> CursorResult<'_> {
        unsupported(Operation::GetSuperTypes)
    }

    fn get_table_privileges(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        table_name_pattern: Option<&str>,
    ) -> CursorResult<'_> {
        unsupported(Operation::GetTablePrivileges)
    }

    fn get_table_types(&self) -> CursorResult<'_> {
        unsupported(Operation::GetTableTypes)
    }

    fn get_tables(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        table_name_pattern: Option<&str>,
        types: Option<&[String]>,
    ) -> CursorResult<'_> {
        unsupported(Operation::GetTables)
    }

    fn get_type_info(&self) -> CursorResult<'_> {
        unsupported(Operation::GetTypeInfo)
    }

    fn get_udts(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        type_name_pattern: Option<&str>,
        types: Option<&[i32]>,
    ) -> CursorResult<'_> {
        unsupported(Operation::GetUdts)
    }

    fn get_version_columns(
        &self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table: Option<&str>,
    ) -> CursorResult<'_> {
        unsupported(Operation::GetVersionColumns)
    }
}

/// Owns a cursor for the duration of one binding pass and closes it on drop.
pub struct CursorGuard<'a> {
    operation: Operation,
    cursor: Box<dyn RowCursor + 'a>,
}

impl<'a> CursorGuard<'a> {
    pub fn new(operation: Operation, cursor: Box<dyn RowCursor + 'a>) -> Self {
        Self { operation, cursor }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }
}

impl<'a> Deref for CursorGuard<'a> {
    type Target = dyn RowCursor + 'a;

    fn deref(&self) -> &Self::Target {
        self.cursor.as_ref()
    }
}

impl<'a> DerefMut for CursorGuard<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.cursor.as_mut()
    }
}

impl Drop for CursorGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.cursor.close() {
            log::warn!("Failed to close cursor for {}: {}", self.operation, e);
        }
    }
}

/// Positional view over the arguments of one call
struct Arguments<'a> {
    operation: Operation,
    values: &'a [Argument],
}

impl<'a> Arguments<'a> {
    fn mismatch(&self, index: usize, expected: ParamKind) -> MetadataError {
        MetadataError::InvalidArgument {
            operation: self.operation,
            reason: format!(
                "argument {} must be {}, got {:?}",
                index,
                expected,
                self.values.get(index)
            ),
        }
    }

    fn text(&self, index: usize) -> MetadataResult<Option<&'a str>> {
        match self.values.get(index) {
            Some(Argument::Null) => Ok(None),
            Some(Argument::Text(s)) => Ok(Some(s.as_str())),
            _ => Err(self.mismatch(index, ParamKind::Text)),
        }
    }

    fn boolean(&self, index: usize) -> MetadataResult<bool> {
        match self.values.get(index) {
            Some(Argument::Bool(b)) => Ok(*b),
            _ => Err(self.mismatch(index, ParamKind::Bool)),
        }
    }

    fn int(&self, index: usize) -> MetadataResult<i32> {
        match self.values.get(index) {
            Some(Argument::Int(i)) => Ok(*i),
            _ => Err(self.mismatch(index, ParamKind::Int)),
        }
    }

    fn text_array(&self, index: usize) -> MetadataResult<Option<&'a [String]>> {
        match self.values.get(index) {
            Some(Argument::Null) => Ok(None),
            Some(Argument::TextArray(items)) => Ok(Some(items.as_slice())),
            _ => Err(self.mismatch(index, ParamKind::TextArray)),
        }
    }

    fn int_array(&self, index: usize) -> MetadataResult<Option<&'a [i32]>> {
        match self.values.get(index) {
            Some(Argument::Null) => Ok(None),
            Some(Argument::IntArray(items)) => Ok(Some(items.as_slice())),
            _ => Err(self.mismatch(index, ParamKind::IntArray)),
        }
    }
}

/// Route an operation and its arguments to the matching provider method.
pub fn dispatch<'p>(
    provider: &'p dyn MetadataProvider,
    operation: Operation,
    arguments: &[Argument],
) -> MetadataResult<CursorGuard<'p>> {
    let expected = operation.parameters().len();
    if arguments.len() != expected {
        return Err(MetadataError::InvalidArgument {
            operation,
            reason: format!("expected {} arguments, got {}", expected, arguments.len()),
        });
    }

    let a = Arguments {
        operation,
        values: arguments,
    };
    let result = match operation {
        Operation::GetAttributes => {
            provider.get_attributes(a.text(0)?, a.text(1)?, a.text(2)?, a.text(3)?)
        }
        Operation::GetBestRowIdentifier => provider.get_best_row_identifier(
            a.text(0)?,
            a.text(1)?,
            a.text(2)?,
            a.int(3)?,
            a.boolean(4)?,
        ),
        Operation::GetCatalogs => provider.get_catalogs(),
        Operation::GetClientInfoProperties => provider.get_client_info_properties(),
        Operation::GetColumnPrivileges => {
            provider.get_column_privileges(a.text(0)?, a.text(1)?, a.text(2)?, a.text(3)?)
        }
        Operation::GetColumns => {
            provider.get_columns(a.text(0)?, a.text(1)?, a.text(2)?, a.text(3)?)
        }
        Operation::GetCrossReference => provider.get_cross_reference(
            a.text(0)?,
            a.text(1)?,
            a.text(2)?,
            a.text(3)?,
            a.text(4)?,
            a.text(5)?,
        ),
        Operation::GetExportedKeys => {
            provider.get_exported_keys(a.text(0)?, a.text(1)?, a.text(2)?)
        }
        Operation::GetFunctionColumns => {
            provider.get_function_columns(a.text(0)?, a.text(1)?, a.text(2)?, a.text(3)?)
        }
        Operation::GetFunctions => provider.get_functions(a.text(0)?, a.text(1)?, a.text(2)?),
        Operation::GetImportedKeys => {
            provider.get_imported_keys(a.text(0)?, a.text(1)?, a.text(2)?)
        }
        Operation::GetIndexInfo => provider.get_index_info(
            a.text(0)?,
            a.text(1)?,
            a.text(2)?,
            a.boolean(3)?,
            a.boolean(4)?,
        ),
        Operation::GetPrimaryKeys => {
            provider.get_primary_keys(a.text(0)?, a.text(1)?, a.text(2)?)
        }
        Operation::GetProcedureColumns => {
            provider.get_procedure_columns(a.text(0)?, a.text(1)?, a.text(2)?, a.text(3)?)
        }
        Operation::GetProcedures => provider.get_procedures(a.text(0)?, a.text(1)?, a.text(2)?),
        Operation::GetPseudoColumns => {
            provider.get_pseudo_columns(a.text(0)?, a.text(1)?, a.text(2)?, a.text(3)?)
        }
        Operation::GetSchemas => provider.get_schemas(),
        Operation::GetSchemasMatching => provider.get_schemas_matching(a.text(0)?, a.text(1)?),
        Operation::GetSuperTables => {
            provider.get_super_tables(a.text(0)?, a.text(1)?, a.text(2)?)
        }
        Operation::GetSuperTypes => provider.get_super_types(a.text(0)?, a.text(1)?, a.text(2)?),
        Operation::GetTablePrivileges => {
            provider.get_table_privileges(a.text(0)?, a.text(1)?, a.text(2)?)
        }
        Operation::GetTableTypes => provider.get_table_types(),
        Operation::GetTables => {
            provider.get_tables(a.text(0)?, a.text(1)?, a.text(2)?, a.text_array(3)?)
        }
        Operation::GetTypeInfo => provider.get_type_info(),
        Operation::GetUdts => {
            provider.get_udts(a.text(0)?, a.text(1)?, a.text(2)?, a.int_array(3)?)
        }
        Operation::GetVersionColumns => {
            provider.get_version_columns(a.text(0)?, a.text(1)?, a.text(2)?)
        }
    };

    result
        .map(|cursor| CursorGuard::new(operation, cursor))
        .map_err(|e| MetadataError::provider(operation, e))
}
