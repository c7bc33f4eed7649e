// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Catalogs and schemas

use super::{CrossReference, Function, Procedure, Table, Udt};
use crate::descriptor::{Directive, Entity};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub table_cat: String,
    #[serde(default)]
    pub schemas: Vec<Schema>,
    #[serde(default)]
    pub cross_references: Vec<CrossReference>,
    /// Placeholder standing in for a source that reports no catalogs.
    #[serde(default, rename = "virtual")]
    pub is_virtual: bool,
}

impl Entity for Catalog {
    const NAME: &'static str = "catalog";

    fn directives() -> Vec<Directive<Self>> {
        vec![
            bind!(table_cat, "tableCat", "TABLE_CAT"),
            invoke!(schemas, "schemas", GetSchemasMatching, [":tableCat", "null"]),
        ]
    }
}

impl Catalog {
    /// Placeholder catalog identified by the empty string.
    pub fn virtual_instance() -> Self {
        Self {
            is_virtual: true,
            ..Self::default()
        }
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.schemas.iter().flat_map(|s| s.tables.iter())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    pub table_schem: String,
    pub table_catalog: Option<String>,
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(default)]
    pub procedures: Vec<Procedure>,
    #[serde(default)]
    pub functions: Vec<Function>,
    #[serde(default)]
    pub udts: Vec<Udt>,
    #[serde(default)]
    pub cross_references: Vec<CrossReference>,
    #[serde(default, rename = "virtual")]
    pub is_virtual: bool,
}

impl Entity for Schema {
    const NAME: &'static str = "schema";

    fn directives() -> Vec<Directive<Self>> {
        vec![
            bind!(table_schem, "tableSchem", "TABLE_SCHEM"),
            bind!(table_catalog, "tableCatalog", "TABLE_CATALOG", nillable),
            invoke!(
                tables,
                "tables",
                GetTables,
                [":tableCatalog", ":tableSchem", "null", "null"]
            ),
            invoke!(
                procedures,
                "procedures",
                GetProcedures,
                [":tableCatalog", ":tableSchem", "null"]
            ),
            invoke!(
                functions,
                "functions",
                GetFunctions,
                [":tableCatalog", ":tableSchem", "null"]
            ),
            invoke!(
                udts,
                "udts",
                GetUdts,
                [":tableCatalog", ":tableSchem", "null", "null"]
            ),
        ]
    }
}

impl Schema {
    /// Placeholder schema of `catalog`, identified by the empty string.
    pub fn virtual_instance(catalog: Option<&str>) -> Self {
        Self {
            table_catalog: catalog.map(str::to_string),
            is_virtual: true,
            ..Self::default()
        }
    }
}

/// Row of the catalog-independent schema listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaName {
    pub table_schem: String,
    pub table_catalog: Option<String>,
}

impl Entity for SchemaName {
    const NAME: &'static str = "schemaName";

    fn directives() -> Vec<Directive<Self>> {
        vec![
            bind!(table_schem, "tableSchem", "TABLE_SCHEM"),
            bind!(table_catalog, "tableCatalog", "TABLE_CATALOG", nillable),
        ]
    }
}
