// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Metadata context
//!
//! [`MetadataContext`] is the entry point of an extraction. It owns the
//! session (suppression filter and diagnostics) and exposes one method per
//! provider operation, each returning fully bound and expanded entities.
//!
//! Catalogs and schemas get two extra passes on top of plain binding:
//! - virtual nodes: with `nonempty`, a level the source reports as empty
//!   receives one placeholder node, which is then expanded like any other
//! - cross references: after the subtree of the root entity (a catalog from
//!   `get_catalogs`, a schema from `get_schemas`) is bound, every ordered
//!   pair of its tables is looked up once with `getCrossReference`

use crate::bind::Binder;
use crate::config::ExtractionConfig;
use crate::descriptor::{path_of, DescriptorRegistry, Entity};
use crate::error::MetadataResult;
use crate::model::{
    Attribute, BestRowIdentifier, Catalog, ClientInfoProperty, Column, ColumnPrivilege,
    CrossReference, ExportedKey, Function, FunctionColumn, ImportedKey, IndexInfo, Metadata,
    PrimaryKey, Procedure, ProcedureColumn, PseudoColumn, Schema, SchemaName, SuperTable,
    SuperType, Table, TablePrivilege, TableType, TypeInfo, Udt, VersionColumn,
};
use crate::provider::{Argument, CursorGuard, MetadataProvider, Operation};
use crate::session::{Diagnostic, Session, SuppressionFilter};

fn text(value: Option<&str>) -> Argument {
    Argument::from(value)
}

pub struct MetadataContext<'p> {
    provider: &'p dyn MetadataProvider,
    /// Private descriptor cache; `None` uses the process-wide registry.
    registry: Option<DescriptorRegistry>,
    session: Session,
    nonempty: bool,
}

impl<'p> MetadataContext<'p> {
    pub fn new(provider: &'p dyn MetadataProvider) -> Self {
        Self::with_config(provider, ExtractionConfig::default())
    }

    pub fn with_config(provider: &'p dyn MetadataProvider, config: ExtractionConfig) -> Self {
        let mut session =
            Session::with_suppression(config.suppressed_paths.iter().cloned().collect());
        session.set_report_unknown_labels(config.report_unknown_labels);
        Self {
            provider,
            registry: None,
            session,
            nonempty: config.nonempty,
        }
    }

    /// Use a descriptor cache private to this context.
    pub fn with_registry(mut self, registry: DescriptorRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn suppress<I, S>(&mut self, paths: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.session.suppression_mut().suppress(paths);
        self
    }

    pub fn is_suppressed(&self, path: &str) -> bool {
        self.session.is_suppressed(path)
    }

    pub fn suppression(&self) -> &SuppressionFilter {
        self.session.suppression()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.session.diagnostics()
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.session.take_diagnostics()
    }

    /// Default `nonempty` flag taken from the configuration.
    pub fn nonempty(&self) -> bool {
        self.nonempty
    }

    fn binder(&mut self) -> Binder<'_> {
        let registry = match &self.registry {
            Some(registry) => registry,
            None => DescriptorRegistry::global(),
        };
        Binder::new(self.provider, registry, &mut self.session)
    }

    fn fetch<T: Entity>(
        &mut self,
        operation: Operation,
        arguments: Vec<Argument>,
    ) -> MetadataResult<Vec<T>> {
        self.binder().fetch(operation, &arguments)
    }

    /// Bind every remaining row of a cursor obtained outside this context.
    pub fn bind<T: Entity>(&mut self, cursor: &mut CursorGuard<'_>) -> MetadataResult<Vec<T>> {
        self.binder().bind_cursor(cursor)
    }

    /// Run the invocation directives of an entity built by the caller.
    pub fn expand<T: Entity>(&mut self, instance: &mut T) -> MetadataResult<()> {
        self.binder().expand_entity(instance)
    }

    // ------------------------------------------------------------------
    // Catalogs, schemas and the aggregate root

    /// Bind every catalog with its subtree
    ///
    /// With `nonempty`, a source without catalogs yields one virtual
    /// catalog, and every catalog left without schemas receives one
    /// virtual schema. Cross references are attached to the catalog only;
    /// the `crossReferences` of its schemas stay empty.
    pub fn get_catalogs(&mut self, nonempty: bool) -> MetadataResult<Vec<Catalog>> {
        let mut catalogs: Vec<Catalog> = self.fetch(Operation::GetCatalogs, Vec::new())?;
        if catalogs.is_empty() && nonempty {
            log::debug!("No catalogs reported; adding a virtual catalog");
            let mut catalog = Catalog::virtual_instance();
            self.expand(&mut catalog)?;
            catalogs.push(catalog);
        }

        for catalog in &mut catalogs {
            if nonempty && catalog.schemas.is_empty() && !self.is_suppressed("catalog/schemas") {
                log::debug!(
                    "Catalog '{}' has no schemas; adding a virtual schema",
                    catalog.table_cat
                );
                let mut schema = Schema::virtual_instance(Some(catalog.table_cat.as_str()));
                self.expand(&mut schema)?;
                catalog.schemas.push(schema);
            }
            let tables: Vec<&Table> = catalog.tables().collect();
            let references = self.cross_references_for(Catalog::NAME, &tables)?;
            catalog.cross_references.extend(references);
        }
        Ok(catalogs)
    }

    /// Bind the schemas of `catalog` matching `schema_pattern`
    ///
    /// With `nonempty`, an empty result yields one virtual schema of
    /// `catalog`. Cross references are attached per schema.
    pub fn get_schemas(
        &mut self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        nonempty: bool,
    ) -> MetadataResult<Vec<Schema>> {
        let mut schemas: Vec<Schema> = self.fetch(
            Operation::GetSchemasMatching,
            vec![text(catalog), text(schema_pattern)],
        )?;
        if schemas.is_empty() && nonempty {
            log::debug!("No schemas reported; adding a virtual schema");
            let mut schema = Schema::virtual_instance(catalog);
            self.expand(&mut schema)?;
            schemas.push(schema);
        }

        for schema in &mut schemas {
            let tables: Vec<&Table> = schema.tables.iter().collect();
            let references = self.cross_references_for(Schema::NAME, &tables)?;
            schema.cross_references.extend(references);
        }
        Ok(schemas)
    }

    /// Schema listing without catalog filter (`getSchemas()`).
    pub fn get_schema_names(&mut self) -> MetadataResult<Vec<SchemaName>> {
        self.fetch(Operation::GetSchemas, Vec::new())
    }

    /// Extract the whole graph
    pub fn snapshot(&mut self, nonempty: bool) -> MetadataResult<Metadata> {
        let mut metadata = Metadata::default();
        self.expand(&mut metadata)?;
        if self.is_suppressed("metadata/catalogs") {
            log::debug!("Skipping suppressed path 'metadata/catalogs'");
        } else {
            metadata.catalogs = self.get_catalogs(nonempty)?;
        }
        Ok(metadata)
    }

    /// Cross references of the scope `owner`, unless its path is suppressed.
    fn cross_references_for(
        &mut self,
        owner: &str,
        tables: &[&Table],
    ) -> MetadataResult<Vec<CrossReference>> {
        let path = path_of(owner, "crossReferences");
        if self.is_suppressed(&path) {
            log::debug!("Skipping suppressed path '{}'", path);
            return Ok(Vec::new());
        }
        self.cross_references_at(&path, tables)
    }

    fn cross_references_at(
        &mut self,
        path: &str,
        tables: &[&Table],
    ) -> MetadataResult<Vec<CrossReference>> {
        let mut references = Vec::new();
        for parent in tables {
            for foreign in tables {
                let arguments = [
                    text(parent.table_cat.as_deref()),
                    text(parent.table_schem.as_deref()),
                    text(Some(parent.table_name.as_str())),
                    text(foreign.table_cat.as_deref()),
                    text(foreign.table_schem.as_deref()),
                    text(Some(foreign.table_name.as_str())),
                ];
                let found: Vec<CrossReference> =
                    self.binder()
                        .fetch_nested(path, Operation::GetCrossReference, &arguments)?;
                references.extend(found);
            }
        }
        Ok(references)
    }

    /// Cross references between every ordered pair of `tables`, self-pairs
    /// included
    ///
    /// A failing pair lookup is recorded as a diagnostic and contributes no
    /// rows.
    pub fn get_cross_references(
        &mut self,
        tables: &[Table],
    ) -> MetadataResult<Vec<CrossReference>> {
        let tables: Vec<&Table> = tables.iter().collect();
        self.cross_references_at("table/crossReferences", &tables)
    }

    // ------------------------------------------------------------------
    // One method per provider operation

    pub fn get_attributes(
        &mut self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        type_name_pattern: Option<&str>,
        attribute_name_pattern: Option<&str>,
    ) -> MetadataResult<Vec<Attribute>> {
        self.fetch(
            Operation::GetAttributes,
            vec![
                text(catalog),
                text(schema_pattern),
                text(type_name_pattern),
                text(attribute_name_pattern),
            ],
        )
    }

    pub fn get_best_row_identifier(
        &mut self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table: &str,
        scope: i32,
        nullable: bool,
    ) -> MetadataResult<Vec<BestRowIdentifier>> {
        self.fetch(
            Operation::GetBestRowIdentifier,
            vec![
                text(catalog),
                text(schema),
                text(Some(table)),
                Argument::Int(scope),
                Argument::Bool(nullable),
            ],
        )
    }

    pub fn get_client_info_properties(&mut self) -> MetadataResult<Vec<ClientInfoProperty>> {
        self.fetch(Operation::GetClientInfoProperties, Vec::new())
    }

    pub fn get_column_privileges(
        &mut self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table: &str,
        column_name_pattern: Option<&str>,
    ) -> MetadataResult<Vec<ColumnPrivilege>> {
        self.fetch(
            Operation::GetColumnPrivileges,
            vec![
                text(catalog),
                text(schema),
                text(Some(table)),
                text(column_name_pattern),
            ],
        )
    }

    pub fn get_columns(
        &mut self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        table_name_pattern: Option<&str>,
        column_name_pattern: Option<&str>,
    ) -> MetadataResult<Vec<Column>> {
        self.fetch(
            Operation::GetColumns,
            vec![
                text(catalog),
                text(schema_pattern),
                text(table_name_pattern),
                text(column_name_pattern),
            ],
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn get_cross_reference(
        &mut self,
        parent_catalog: Option<&str>,
        parent_schema: Option<&str>,
        parent_table: &str,
        foreign_catalog: Option<&str>,
        foreign_schema: Option<&str>,
        foreign_table: &str,
    ) -> MetadataResult<Vec<CrossReference>> {
        self.fetch(
            Operation::GetCrossReference,
            vec![
                text(parent_catalog),
                text(parent_schema),
                text(Some(parent_table)),
                text(foreign_catalog),
                text(foreign_schema),
                text(Some(foreign_table)),
            ],
        )
    }

    pub fn get_exported_keys(
        &mut self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table: &str,
    ) -> MetadataResult<Vec<ExportedKey>> {
        self.fetch(
            Operation::GetExportedKeys,
            vec![text(catalog), text(schema), text(Some(table))],
        )
    }

    pub fn get_function_columns(
        &mut self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        function_name_pattern: Option<&str>,
        column_name_pattern: Option<&str>,
    ) -> MetadataResult<Vec<FunctionColumn>> {
        self.fetch(
            Operation::GetFunctionColumns,
            vec![
                text(catalog),
                text(schema_pattern),
                text(function_name_pattern),
                text(column_name_pattern),
            ],
        )
    }

    pub fn get_functions(
        &mut self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        function_name_pattern: Option<&str>,
    ) -> MetadataResult<Vec<Function>> {
        self.fetch(
            Operation::GetFunctions,
            vec![text(catalog), text(schema_pattern), text(function_name_pattern)],
        )
    }

    pub fn get_imported_keys(
        &mut self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table: &str,
    ) -> MetadataResult<Vec<ImportedKey>> {
        self.fetch(
            Operation::GetImportedKeys,
            vec![text(catalog), text(schema), text(Some(table))],
        )
    }

    pub fn get_index_info(
        &mut self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table: &str,
        unique: bool,
        approximate: bool,
    ) -> MetadataResult<Vec<IndexInfo>> {
        self.fetch(
            Operation::GetIndexInfo,
            vec![
                text(catalog),
                text(schema),
                text(Some(table)),
                Argument::Bool(unique),
                Argument::Bool(approximate),
            ],
        )
    }

    pub fn get_primary_keys(
        &mut self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table: &str,
    ) -> MetadataResult<Vec<PrimaryKey>> {
        self.fetch(
            Operation::GetPrimaryKeys,
            vec![text(catalog), text(schema), text(Some(table))],
        )
    }

    pub fn get_procedure_columns(
        &mut self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        procedure_name_pattern: Option<&str>,
        column_name_pattern: Option<&str>,
    ) -> MetadataResult<Vec<ProcedureColumn>> {
        self.fetch(
            Operation::GetProcedureColumns,
            vec![
                text(catalog),
                text(schema_pattern),
                text(procedure_name_pattern),
                text(column_name_pattern),
            ],
        )
    }

    pub fn get_procedures(
        &mut self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        procedure_name_pattern: Option<&str>,
    ) -> MetadataResult<Vec<Procedure>> {
        self.fetch(
            Operation::GetProcedures,
            vec![text(catalog), text(schema_pattern), text(procedure_name_pattern)],
        )
    }

    pub fn get_pseudo_columns(
        &mut self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        table_name_pattern: Option<&str>,
        column_name_pattern: Option<&str>,
    ) -> MetadataResult<Vec<PseudoColumn>> {
        self.fetch(
            Operation::GetPseudoColumns,
            vec![
                text(catalog),
                text(schema_pattern),
                text(table_name_pattern),
                text(column_name_pattern),
            ],
        )
    }

    pub fn get_super_tables(
        &mut self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        table_name_pattern: Option<&str>,
    ) -> MetadataResult<Vec<SuperTable>> {
        self.fetch(
            Operation::GetSuperTables,
            vec![text(catalog), text(schema_pattern), text(table_name_pattern)],
        )
    }

    pub fn get_super_types(
        &mut self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        type_name_pattern: Option<&str>,
    ) -> MetadataResult<Vec<SuperType>> {
        self.fetch(
            Operation::GetSuperTypes,
            vec![text(catalog), text(schema_pattern), text(type_name_pattern)],
        )
    }

    pub fn get_table_privileges(
        &mut self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        table_name_pattern: Option<&str>,
    ) -> MetadataResult<Vec<TablePrivilege>> {
        self.fetch(
            Operation::GetTablePrivileges,
            vec![text(catalog), text(schema_pattern), text(table_name_pattern)],
        )
    }

    pub fn get_table_types(&mut self) -> MetadataResult<Vec<TableType>> {
        self.fetch(Operation::GetTableTypes, Vec::new())
    }

    pub fn get_tables(
        &mut self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        table_name_pattern: Option<&str>,
        types: Option<&[String]>,
    ) -> MetadataResult<Vec<Table>> {
        self.fetch(
            Operation::GetTables,
            vec![
                text(catalog),
                text(schema_pattern),
                text(table_name_pattern),
                Argument::from(types),
            ],
        )
    }

    pub fn get_type_info(&mut self) -> MetadataResult<Vec<TypeInfo>> {
        self.fetch(Operation::GetTypeInfo, Vec::new())
    }

    pub fn get_udts(
        &mut self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
        type_name_pattern: Option<&str>,
        types: Option<&[i32]>,
    ) -> MetadataResult<Vec<Udt>> {
        self.fetch(
            Operation::GetUdts,
            vec![
                text(catalog),
                text(schema_pattern),
                text(type_name_pattern),
                Argument::from(types),
            ],
        )
    }

    pub fn get_version_columns(
        &mut self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table: &str,
    ) -> MetadataResult<Vec<VersionColumn>> {
        self.fetch(
            Operation::GetVersionColumns,
            vec![text(catalog), text(schema), text(Some(table))],
        )
    }
}
