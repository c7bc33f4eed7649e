// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Stored procedures and functions

use crate::descriptor::{Directive, Entity};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Procedure {
    pub procedure_cat: Option<String>,
    pub procedure_schem: Option<String>,
    pub procedure_name: String,
    pub remarks: Option<String>,
    pub procedure_type: i16,
    pub specific_name: String,
    #[serde(default)]
    pub procedure_columns: Vec<ProcedureColumn>,
}

impl Entity for Procedure {
    const NAME: &'static str = "procedure";

    fn directives() -> Vec<Directive<Self>> {
        vec![
            bind!(procedure_cat, "procedureCat", "PROCEDURE_CAT", nillable),
            bind!(procedure_schem, "procedureSchem", "PROCEDURE_SCHEM", nillable),
            bind!(procedure_name, "procedureName", "PROCEDURE_NAME"),
            bind!(remarks, "remarks", "REMARKS", nillable),
            bind!(procedure_type, "procedureType", "PROCEDURE_TYPE"),
            bind!(specific_name, "specificName", "SPECIFIC_NAME"),
            invoke!(
                procedure_columns,
                "procedureColumns",
                GetProcedureColumns,
                [":procedureCat", ":procedureSchem", ":procedureName", "null"]
            ),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcedureColumn {
    pub procedure_cat: Option<String>,
    pub procedure_schem: Option<String>,
    pub procedure_name: String,
    pub column_name: String,
    pub column_type: i16,
    pub data_type: i32,
    pub type_name: String,
    pub precision: i32,
    pub length: i32,
    pub scale: Option<i16>,
    pub radix: i16,
    pub nullable: i16,
    pub remarks: Option<String>,
    pub column_def: Option<String>,
    pub char_octet_length: Option<i32>,
    pub ordinal_position: i32,
    pub is_nullable: String,
    pub specific_name: String,
}

impl Entity for ProcedureColumn {
    const NAME: &'static str = "procedureColumn";

    fn directives() -> Vec<Directive<Self>> {
        vec![
            bind!(procedure_cat, "procedureCat", "PROCEDURE_CAT", nillable),
            bind!(procedure_schem, "procedureSchem", "PROCEDURE_SCHEM", nillable),
            bind!(procedure_name, "procedureName", "PROCEDURE_NAME"),
            bind!(column_name, "columnName", "COLUMN_NAME"),
            bind!(column_type, "columnType", "COLUMN_TYPE"),
            bind!(data_type, "dataType", "DATA_TYPE"),
            bind!(type_name, "typeName", "TYPE_NAME"),
            bind!(precision, "precision", "PRECISION"),
            bind!(length, "length", "LENGTH"),
            bind!(scale, "scale", "SCALE", nillable),
            bind!(radix, "radix", "RADIX"),
            bind!(nullable, "nullable", "NULLABLE"),
            bind!(remarks, "remarks", "REMARKS", nillable),
            bind!(column_def, "columnDef", "COLUMN_DEF", nillable),
            unused!("sqlDataType", "SQL_DATA_TYPE"),
            unused!("sqlDatetimeSub", "SQL_DATETIME_SUB"),
            bind!(char_octet_length, "charOctetLength", "CHAR_OCTET_LENGTH", nillable),
            bind!(ordinal_position, "ordinalPosition", "ORDINAL_POSITION"),
            bind!(is_nullable, "isNullable", "IS_NULLABLE"),
            bind!(specific_name, "specificName", "SPECIFIC_NAME"),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Function {
    pub function_cat: Option<String>,
    pub function_schem: Option<String>,
    pub function_name: String,
    pub remarks: String,
    pub function_type: i16,
    pub specific_name: String,
    #[serde(default)]
    pub function_columns: Vec<FunctionColumn>,
}

impl Entity for Function {
    const NAME: &'static str = "function";

    fn directives() -> Vec<Directive<Self>> {
        vec![
            bind!(function_cat, "functionCat", "FUNCTION_CAT", nillable),
            bind!(function_schem, "functionSchem", "FUNCTION_SCHEM", nillable),
            bind!(function_name, "functionName", "FUNCTION_NAME"),
            bind!(remarks, "remarks", "REMARKS"),
            bind!(function_type, "functionType", "FUNCTION_TYPE"),
            bind!(specific_name, "specificName", "SPECIFIC_NAME"),
            invoke!(
                function_columns,
                "functionColumns",
                GetFunctionColumns,
                [":functionCat", ":functionSchem", ":functionName", "null"]
            ),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionColumn {
    pub function_cat: Option<String>,
    pub function_schem: Option<String>,
    pub function_name: String,
    pub column_name: String,
    pub column_type: i16,
    pub data_type: i32,
    pub type_name: String,
    pub precision: i32,
    pub length: i32,
    pub scale: Option<i16>,
    pub radix: i16,
    pub nullable: i16,
    pub remarks: Option<String>,
    pub char_octet_length: Option<i32>,
    pub ordinal_position: i32,
    pub is_nullable: String,
    pub specific_name: String,
}

impl Entity for FunctionColumn {
    const NAME: &'static str = "functionColumn";

    fn directives() -> Vec<Directive<Self>> {
        vec![
            bind!(function_cat, "functionCat", "FUNCTION_CAT", nillable),
            bind!(function_schem, "functionSchem", "FUNCTION_SCHEM", nillable),
            bind!(function_name, "functionName", "FUNCTION_NAME"),
            bind!(column_name, "columnName", "COLUMN_NAME"),
            bind!(column_type, "columnType", "COLUMN_TYPE"),
            bind!(data_type, "dataType", "DATA_TYPE"),
            bind!(type_name, "typeName", "TYPE_NAME"),
            bind!(precision, "precision", "PRECISION"),
            bind!(length, "length", "LENGTH"),
            bind!(scale, "scale", "SCALE", nillable),
            bind!(radix, "radix", "RADIX"),
            bind!(nullable, "nullable", "NULLABLE"),
            bind!(remarks, "remarks", "REMARKS", nillable),
            bind!(char_octet_length, "charOctetLength", "CHAR_OCTET_LENGTH", nillable),
            bind!(ordinal_position, "ordinalPosition", "ORDINAL_POSITION"),
            bind!(is_nullable, "isNullable", "IS_NULLABLE"),
            bind!(specific_name, "specificName", "SPECIFIC_NAME"),
        ]
    }
}
