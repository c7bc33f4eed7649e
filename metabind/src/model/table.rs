// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Tables and table-level children

use super::{
    BestRowIdentifier, Column, ColumnPrivilege, ExportedKey, ImportedKey, IndexInfo, PrimaryKey,
    PseudoColumn, VersionColumn,
};
use crate::descriptor::{Directive, Entity};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub table_cat: Option<String>,
    pub table_schem: Option<String>,
    pub table_name: String,
    pub table_type: String,
    pub remarks: Option<String>,
    pub type_cat: Option<String>,
    pub type_schem: Option<String>,
    pub type_name: Option<String>,
    pub self_referencing_col_name: Option<String>,
    pub ref_generation: Option<String>,

    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub column_privileges: Vec<ColumnPrivilege>,
    #[serde(default)]
    pub exported_keys: Vec<ExportedKey>,
    #[serde(default)]
    pub imported_keys: Vec<ImportedKey>,
    #[serde(default)]
    pub index_info: Vec<IndexInfo>,
    #[serde(default)]
    pub primary_keys: Vec<PrimaryKey>,
    #[serde(default)]
    pub pseudo_columns: Vec<PseudoColumn>,
    #[serde(default)]
    pub super_tables: Vec<SuperTable>,
    #[serde(default)]
    pub table_privileges: Vec<TablePrivilege>,
    #[serde(default)]
    pub version_columns: Vec<VersionColumn>,
    #[serde(default)]
    pub best_row_identifiers: Vec<BestRowIdentifier>,
}

impl Entity for Table {
    const NAME: &'static str = "table";

    fn directives() -> Vec<Directive<Self>> {
        vec![
            bind!(table_cat, "tableCat", "TABLE_CAT", nillable),
            bind!(table_schem, "tableSchem", "TABLE_SCHEM", nillable),
            bind!(table_name, "tableName", "TABLE_NAME"),
            bind!(table_type, "tableType", "TABLE_TYPE"),
            bind!(remarks, "remarks", "REMARKS", nillable),
            bind!(type_cat, "typeCat", "TYPE_CAT", nillable),
            bind!(type_schem, "typeSchem", "TYPE_SCHEM", nillable),
            bind!(type_name, "typeName", "TYPE_NAME", nillable),
            bind!(
                self_referencing_col_name,
                "selfReferencingColName",
                "SELF_REFERENCING_COL_NAME",
                nillable
            ),
            bind!(ref_generation, "refGeneration", "REF_GENERATION", nillable),
            invoke!(
                columns,
                "columns",
                GetColumns,
                [":tableCat", ":tableSchem", ":tableName", "null"]
            ),
            invoke!(
                column_privileges,
                "columnPrivileges",
                GetColumnPrivileges,
                [":tableCat", ":tableSchem", ":tableName", "null"]
            ),
            invoke!(
                exported_keys,
                "exportedKeys",
                GetExportedKeys,
                [":tableCat", ":tableSchem", ":tableName"]
            ),
            invoke!(
                imported_keys,
                "importedKeys",
                GetImportedKeys,
                [":tableCat", ":tableSchem", ":tableName"]
            ),
            invoke!(
                index_info,
                "indexInfo",
                GetIndexInfo,
                [":tableCat", ":tableSchem", ":tableName", "false", "true"]
            ),
            invoke!(
                primary_keys,
                "primaryKeys",
                GetPrimaryKeys,
                [":tableCat", ":tableSchem", ":tableName"]
            ),
            invoke!(
                pseudo_columns,
                "pseudoColumns",
                GetPseudoColumns,
                [":tableCat", ":tableSchem", ":tableName", "null"]
            ),
            invoke!(
                super_tables,
                "superTables",
                GetSuperTables,
                [":tableCat", ":tableSchem", ":tableName"]
            ),
            invoke!(
                table_privileges,
                "tablePrivileges",
                GetTablePrivileges,
                [":tableCat", ":tableSchem", ":tableName"]
            ),
            invoke!(
                version_columns,
                "versionColumns",
                GetVersionColumns,
                [":tableCat", ":tableSchem", ":tableName"]
            ),
            invoke!(
                best_row_identifiers,
                "bestRowIdentifiers",
                GetBestRowIdentifier,
                [":tableCat", ":tableSchem", ":tableName", "0", "true"],
                [":tableCat", ":tableSchem", ":tableName", "1", "true"],
                [":tableCat", ":tableSchem", ":tableName", "2", "true"],
            ),
        ]
    }
}

impl Table {
    /// `catalog.schema.name`, leaving out absent parts.
    pub fn qualified_name(&self) -> String {
        [
            self.table_cat.as_deref(),
            self.table_schem.as_deref(),
            Some(self.table_name.as_str()),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(".")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableType {
    pub table_type: String,
}

impl Entity for TableType {
    const NAME: &'static str = "tableType";

    fn directives() -> Vec<Directive<Self>> {
        vec![bind!(table_type, "tableType", "TABLE_TYPE")]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePrivilege {
    pub table_cat: Option<String>,
    pub table_schem: Option<String>,
    pub table_name: String,
    pub grantor: Option<String>,
    pub grantee: String,
    pub privilege: String,
    pub is_grantable: Option<String>,
}

impl Entity for TablePrivilege {
    const NAME: &'static str = "tablePrivilege";

    fn directives() -> Vec<Directive<Self>> {
        vec![
            bind!(table_cat, "tableCat", "TABLE_CAT", nillable),
            bind!(table_schem, "tableSchem", "TABLE_SCHEM", nillable),
            bind!(table_name, "tableName", "TABLE_NAME"),
            bind!(grantor, "grantor", "GRANTOR", nillable),
            bind!(grantee, "grantee", "GRANTEE"),
            bind!(privilege, "privilege", "PRIVILEGE"),
            bind!(is_grantable, "isGrantable", "IS_GRANTABLE", nillable),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuperTable {
    pub table_cat: Option<String>,
    pub table_schem: Option<String>,
    pub table_name: String,
    pub supertable_name: String,
}

impl Entity for SuperTable {
    const NAME: &'static str = "superTable";

    fn directives() -> Vec<Directive<Self>> {
        vec![
            bind!(table_cat, "tableCat", "TABLE_CAT", nillable),
            bind!(table_schem, "tableSchem", "TABLE_SCHEM", nillable),
            bind!(table_name, "tableName", "TABLE_NAME"),
            bind!(supertable_name, "supertableName", "SUPERTABLE_NAME"),
        ]
    }
}
