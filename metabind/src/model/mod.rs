// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Metadata entity model
//!
//! One struct per shape of introspection row. Each entity declares its
//! directive table with the `bind!`, `unused!` and `invoke!` macros below;
//! field names in directives are the camelCase names the entities
//! serialize under, so paths read as `"table/columns"`.

/// Column directive for a field of `Self`.
macro_rules! bind {
    ($field:ident, $name:literal, $label:literal) => {
        $crate::descriptor::Directive::Column($crate::descriptor::ColumnBinding::new(
            $name,
            $label,
            $crate::descriptor::FieldSlot::new(|o: &Self| &o.$field, |o: &mut Self| &mut o.$field),
        ))
    };
    ($field:ident, $name:literal, $label:literal, nillable) => {
        $crate::descriptor::Directive::Column(
            $crate::descriptor::ColumnBinding::new(
                $name,
                $label,
                $crate::descriptor::FieldSlot::new(
                    |o: &Self| &o.$field,
                    |o: &mut Self| &mut o.$field,
                ),
            )
            .nillable(),
        )
    };
}

/// Reserved column: must be present, value dropped.
macro_rules! unused {
    ($name:literal, $label:literal) => {
        $crate::descriptor::Directive::Column($crate::descriptor::ColumnBinding::unused(
            $name, $label,
        ))
    };
}

/// Invocation directive filling a `Vec` field of `Self`, one call per
/// bracketed argument set.
macro_rules! invoke {
    ($field:ident, $name:literal, $op:ident, $( [ $($arg:literal),* ] ),+ $(,)?) => {
        $crate::descriptor::Directive::Invoke($crate::descriptor::Invocation {
            field: $name,
            operation: $crate::provider::Operation::$op,
            argument_sets: vec![$(vec![$($arg),*]),+],
            children: Box::new($crate::bind::Children::new(|o: &mut Self| &mut o.$field)),
        })
    };
}

pub mod catalog;
pub mod column;
pub mod key;
pub mod routine;
pub mod table;
pub mod types;

pub use catalog::{Catalog, Schema, SchemaName};
pub use column::{BestRowIdentifier, Column, ColumnPrivilege, PseudoColumn, VersionColumn};
pub use key::{CrossReference, ExportedKey, ImportedKey, IndexInfo, PrimaryKey};
pub use routine::{Function, FunctionColumn, Procedure, ProcedureColumn};
pub use table::{SuperTable, Table, TablePrivilege, TableType};
pub use types::{Attribute, ClientInfoProperty, SuperType, TypeInfo, Udt};

use crate::descriptor::{Directive, Entity};
use serde::{Deserialize, Serialize};

/// Aggregate root of one extraction
///
/// `catalogs` is filled by the context (virtual nodes and cross-references
/// need the whole subtree); the remaining collections come from plain
/// invocations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default)]
    pub catalogs: Vec<Catalog>,
    #[serde(default)]
    pub schema_names: Vec<SchemaName>,
    #[serde(default)]
    pub table_types: Vec<TableType>,
    #[serde(default)]
    pub type_info: Vec<TypeInfo>,
    #[serde(default)]
    pub client_info_properties: Vec<ClientInfoProperty>,
}

impl Entity for Metadata {
    const NAME: &'static str = "metadata";

    fn directives() -> Vec<Directive<Self>> {
        vec![
            invoke!(schema_names, "schemaNames", GetSchemas, []),
            invoke!(table_types, "tableTypes", GetTableTypes, []),
            invoke!(type_info, "typeInfo", GetTypeInfo, []),
            invoke!(
                client_info_properties,
                "clientInfoProperties",
                GetClientInfoProperties,
                []
            ),
        ]
    }
}

impl Metadata {
    /// Every table in the graph, in catalog, schema, table order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.catalogs.iter().flat_map(Catalog::tables)
    }
}
