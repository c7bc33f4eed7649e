// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Column-shaped entities

use crate::descriptor::{Directive, Entity};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub table_cat: Option<String>,
    pub table_schem: Option<String>,
    pub table_name: String,
    pub column_name: String,
    pub data_type: i32,
    pub type_name: String,
    pub column_size: i32,
    pub decimal_digits: Option<i32>,
    pub num_prec_radix: i32,
    pub nullable: i32,
    pub remarks: Option<String>,
    pub column_def: Option<String>,
    pub char_octet_length: Option<i32>,
    pub ordinal_position: i32,
    pub is_nullable: String,
    pub scope_catalog: Option<String>,
    pub scope_schema: Option<String>,
    pub scope_table: Option<String>,
    pub source_data_type: Option<i16>,
    pub is_autoincrement: String,
    pub is_generatedcolumn: String,
}

impl Entity for Column {
    const NAME: &'static str = "column";

    fn directives() -> Vec<Directive<Self>> {
        vec![
            bind!(table_cat, "tableCat", "TABLE_CAT", nillable),
            bind!(table_schem, "tableSchem", "TABLE_SCHEM", nillable),
            bind!(table_name, "tableName", "TABLE_NAME"),
            bind!(column_name, "columnName", "COLUMN_NAME"),
            bind!(data_type, "dataType", "DATA_TYPE"),
            bind!(type_name, "typeName", "TYPE_NAME"),
            bind!(column_size, "columnSize", "COLUMN_SIZE"),
            unused!("bufferLength", "BUFFER_LENGTH"),
            bind!(decimal_digits, "decimalDigits", "DECIMAL_DIGITS", nillable),
            bind!(num_prec_radix, "numPrecRadix", "NUM_PREC_RADIX"),
            bind!(nullable, "nullable", "NULLABLE"),
            bind!(remarks, "remarks", "REMARKS", nillable),
            bind!(column_def, "columnDef", "COLUMN_DEF", nillable),
            unused!("sqlDataType", "SQL_DATA_TYPE"),
            unused!("sqlDatetimeSub", "SQL_DATETIME_SUB"),
            bind!(char_octet_length, "charOctetLength", "CHAR_OCTET_LENGTH", nillable),
            bind!(ordinal_position, "ordinalPosition", "ORDINAL_POSITION"),
            bind!(is_nullable, "isNullable", "IS_NULLABLE"),
            bind!(scope_catalog, "scopeCatalog", "SCOPE_CATALOG", nillable),
            bind!(scope_schema, "scopeSchema", "SCOPE_SCHEMA", nillable),
            bind!(scope_table, "scopeTable", "SCOPE_TABLE", nillable),
            bind!(source_data_type, "sourceDataType", "SOURCE_DATA_TYPE", nillable),
            bind!(is_autoincrement, "isAutoincrement", "IS_AUTOINCREMENT"),
            bind!(is_generatedcolumn, "isGeneratedcolumn", "IS_GENERATEDCOLUMN"),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnPrivilege {
    pub table_cat: Option<String>,
    pub table_schem: Option<String>,
    pub table_name: String,
    pub column_name: String,
    pub grantor: Option<String>,
    pub grantee: String,
    pub privilege: String,
    pub is_grantable: Option<String>,
}

impl Entity for ColumnPrivilege {
    const NAME: &'static str = "columnPrivilege";

    fn directives() -> Vec<Directive<Self>> {
        vec![
            bind!(table_cat, "tableCat", "TABLE_CAT", nillable),
            bind!(table_schem, "tableSchem", "TABLE_SCHEM", nillable),
            bind!(table_name, "tableName", "TABLE_NAME"),
            bind!(column_name, "columnName", "COLUMN_NAME"),
            bind!(grantor, "grantor", "GRANTOR", nillable),
            bind!(grantee, "grantee", "GRANTEE"),
            bind!(privilege, "privilege", "PRIVILEGE"),
            bind!(is_grantable, "isGrantable", "IS_GRANTABLE", nillable),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PseudoColumn {
    pub table_cat: Option<String>,
    pub table_schem: Option<String>,
    pub table_name: String,
    pub column_name: String,
    pub data_type: i32,
    pub column_size: Option<i32>,
    pub decimal_digits: Option<i32>,
    pub num_prec_radix: Option<i32>,
    pub column_usage: String,
    pub remarks: Option<String>,
    pub char_octet_length: Option<i32>,
    pub is_nullable: String,
}

impl Entity for PseudoColumn {
    const NAME: &'static str = "pseudoColumn";

    fn directives() -> Vec<Directive<Self>> {
        vec![
            bind!(table_cat, "tableCat", "TABLE_CAT", nillable),
            bind!(table_schem, "tableSchem", "TABLE_SCHEM", nillable),
            bind!(table_name, "tableName", "TABLE_NAME"),
            bind!(column_name, "columnName", "COLUMN_NAME"),
            bind!(data_type, "dataType", "DATA_TYPE"),
            bind!(column_size, "columnSize", "COLUMN_SIZE", nillable),
            bind!(decimal_digits, "decimalDigits", "DECIMAL_DIGITS", nillable),
            bind!(num_prec_radix, "numPrecRadix", "NUM_PREC_RADIX", nillable),
            bind!(column_usage, "columnUsage", "COLUMN_USAGE"),
            bind!(remarks, "remarks", "REMARKS", nillable),
            bind!(char_octet_length, "charOctetLength", "CHAR_OCTET_LENGTH", nillable),
            bind!(is_nullable, "isNullable", "IS_NULLABLE"),
        ]
    }
}

/// Column updated automatically when any value in a row changes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionColumn {
    pub column_name: String,
    pub data_type: i32,
    pub type_name: String,
    pub column_size: i32,
    pub buffer_length: i32,
    pub decimal_digits: Option<i16>,
    pub pseudo_column: i16,
}

impl Entity for VersionColumn {
    const NAME: &'static str = "versionColumn";

    fn directives() -> Vec<Directive<Self>> {
        vec![
            unused!("scope", "SCOPE"),
            bind!(column_name, "columnName", "COLUMN_NAME"),
            bind!(data_type, "dataType", "DATA_TYPE"),
            bind!(type_name, "typeName", "TYPE_NAME"),
            bind!(column_size, "columnSize", "COLUMN_SIZE"),
            bind!(buffer_length, "bufferLength", "BUFFER_LENGTH"),
            bind!(decimal_digits, "decimalDigits", "DECIMAL_DIGITS", nillable),
            bind!(pseudo_column, "pseudoColumn", "PSEUDO_COLUMN"),
        ]
    }
}

/// Optimal set of columns that uniquely identifies a row, for one scope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestRowIdentifier {
    pub scope: i16,
    pub column_name: String,
    pub data_type: i32,
    pub type_name: String,
    pub column_size: i32,
    pub decimal_digits: Option<i16>,
    pub pseudo_column: i16,
}

impl Entity for BestRowIdentifier {
    const NAME: &'static str = "bestRowIdentifier";

    fn directives() -> Vec<Directive<Self>> {
        vec![
            bind!(scope, "scope", "SCOPE"),
            bind!(column_name, "columnName", "COLUMN_NAME"),
            bind!(data_type, "dataType", "DATA_TYPE"),
            bind!(type_name, "typeName", "TYPE_NAME"),
            bind!(column_size, "columnSize", "COLUMN_SIZE"),
            unused!("bufferLength", "BUFFER_LENGTH"),
            bind!(decimal_digits, "decimalDigits", "DECIMAL_DIGITS", nillable),
            bind!(pseudo_column, "pseudoColumn", "PSEUDO_COLUMN"),
        ]
    }
}
