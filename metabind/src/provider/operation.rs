// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Introspection operations and their arguments
//!
//! Every operation a provider can be asked for is a variant of
//! [`Operation`]. Each one has a fixed positional parameter list described by
//! [`ParamKind`]; concrete values travel as [`Argument`]s.

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Introspection operations supported by the binder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    GetAttributes,
    GetBestRowIdentifier,
    GetCatalogs,
    GetClientInfoProperties,
    GetColumnPrivileges,
    GetColumns,
    GetCrossReference,
    GetExportedKeys,
    GetFunctionColumns,
    GetFunctions,
    GetImportedKeys,
    GetIndexInfo,
    GetPrimaryKeys,
    GetProcedureColumns,
    GetProcedures,
    GetPseudoColumns,
    /// Schema names across all catalogs (no arguments)
    GetSchemas,
    /// Schemas of one catalog matching a pattern
    GetSchemasMatching,
    GetSuperTables,
    GetSuperTypes,
    GetTablePrivileges,
    GetTableTypes,
    GetTables,
    GetTypeInfo,
    #[serde(rename = "getUDTs")]
    GetUdts,
    GetVersionColumns,
}

/// Kind of one positional operation parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    Text,
    Bool,
    Int,
    TextArray,
    IntArray,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParamKind::Text => "text",
            ParamKind::Bool => "bool",
            ParamKind::Int => "int",
            ParamKind::TextArray => "text[]",
            ParamKind::IntArray => "int[]",
        };
        write!(f, "{}", s)
    }
}

use ParamKind::{Bool, Int, IntArray, Text, TextArray};

impl Operation {
    pub const ALL: [Operation; 26] = [
        Operation::GetAttributes,
        Operation::GetBestRowIdentifier,
        Operation::GetCatalogs,
        Operation::GetClientInfoProperties,
        Operation::GetColumnPrivileges,
        Operation::GetColumns,
        Operation::GetCrossReference,
        Operation::GetExportedKeys,
        Operation::GetFunctionColumns,
        Operation::GetFunctions,
        Operation::GetImportedKeys,
        Operation::GetIndexInfo,
        Operation::GetPrimaryKeys,
        Operation::GetProcedureColumns,
        Operation::GetProcedures,
        Operation::GetPseudoColumns,
        Operation::GetSchemas,
        Operation::GetSchemasMatching,
        Operation::GetSuperTables,
        Operation::GetSuperTypes,
        Operation::GetTablePrivileges,
        Operation::GetTableTypes,
        Operation::GetTables,
        Operation::GetTypeInfo,
        Operation::GetUdts,
        Operation::GetVersionColumns,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::GetAttributes => "getAttributes",
            Operation::GetBestRowIdentifier => "getBestRowIdentifier",
            Operation::GetCatalogs => "getCatalogs",
            Operation::GetClientInfoProperties => "getClientInfoProperties",
            Operation::GetColumnPrivileges => "getColumnPrivileges",
            Operation::GetColumns => "getColumns",
            Operation::GetCrossReference => "getCrossReference",
            Operation::GetExportedKeys => "getExportedKeys",
            Operation::GetFunctionColumns => "getFunctionColumns",
            Operation::GetFunctions => "getFunctions",
            Operation::GetImportedKeys => "getImportedKeys",
            Operation::GetIndexInfo => "getIndexInfo",
            Operation::GetPrimaryKeys => "getPrimaryKeys",
            Operation::GetProcedureColumns => "getProcedureColumns",
            Operation::GetProcedures => "getProcedures",
            Operation::GetPseudoColumns => "getPseudoColumns",
            Operation::GetSchemas => "getSchemas",
            Operation::GetSchemasMatching => "getSchemasMatching",
            Operation::GetSuperTables => "getSuperTables",
            Operation::GetSuperTypes => "getSuperTypes",
            Operation::GetTablePrivileges => "getTablePrivileges",
            Operation::GetTableTypes => "getTableTypes",
            Operation::GetTables => "getTables",
            Operation::GetTypeInfo => "getTypeInfo",
            Operation::GetUdts => "getUDTs",
            Operation::GetVersionColumns => "getVersionColumns",
        }
    }

    /// Positional parameter kinds accepted by the operation.
    pub fn parameters(&self) -> &'static [ParamKind] {
        match self {
            Operation::GetCatalogs
            | Operation::GetClientInfoProperties
            | Operation::GetSchemas
            | Operation::GetTableTypes
            | Operation::GetTypeInfo => &[],
            Operation::GetSchemasMatching => &[Text, Text],
            Operation::GetExportedKeys
            | Operation::GetFunctions
            | Operation::GetImportedKeys
            | Operation::GetPrimaryKeys
            | Operation::GetProcedures
            | Operation::GetSuperTables
            | Operation::GetSuperTypes
            | Operation::GetTablePrivileges
            | Operation::GetVersionColumns => &[Text, Text, Text],
            Operation::GetAttributes
            | Operation::GetColumnPrivileges
            | Operation::GetColumns
            | Operation::GetFunctionColumns
            | Operation::GetProcedureColumns
            | Operation::GetPseudoColumns => &[Text, Text, Text, Text],
            Operation::GetBestRowIdentifier => &[Text, Text, Text, Int, Bool],
            Operation::GetIndexInfo => &[Text, Text, Text, Bool, Bool],
            Operation::GetTables => &[Text, Text, Text, TextArray],
            Operation::GetUdts => &[Text, Text, Text, IntArray],
            Operation::GetCrossReference => &[Text, Text, Text, Text, Text, Text],
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .iter()
            .copied()
            .find(|op| op.name() == s)
            .ok_or_else(|| format!("unknown operation '{}'", s))
    }
}

/// A concrete argument passed to an operation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Argument {
    Null,
    Bool(bool),
    Int(i32),
    Text(String),
    TextArray(Vec<String>),
    IntArray(Vec<i32>),
}

impl Argument {
    /// Parse a literal argument template for a parameter of `kind`.
    ///
    /// `null` is the absent value for every kind. Array literals are
    /// comma separated.
    pub fn parse_literal(literal: &str, kind: ParamKind) -> Result<Self, String> {
        if literal == "null" {
            return Ok(Argument::Null);
        }
        match kind {
            ParamKind::Text => Ok(Argument::Text(literal.to_string())),
            ParamKind::Bool => literal
                .parse::<bool>()
                .map(Argument::Bool)
                .map_err(|_| format!("'{}' is not a bool literal", literal)),
            ParamKind::Int => literal
                .parse::<i32>()
                .map(Argument::Int)
                .map_err(|_| format!("'{}' is not an int literal", literal)),
            ParamKind::TextArray => Ok(Argument::TextArray(
                literal.split(',').map(|s| s.trim().to_string()).collect(),
            )),
            ParamKind::IntArray => literal
                .split(',')
                .map(|s| s.trim().parse::<i32>())
                .collect::<Result<Vec<_>, _>>()
                .map(Argument::IntArray)
                .map_err(|_| format!("'{}' is not an int[] literal", literal)),
        }
    }

    /// Convert a bound field value into an argument for a parameter of `kind`.
    pub fn from_value(value: &Value, kind: ParamKind) -> Result<Self, String> {
        match (value, kind) {
            (Value::Null, _) => Ok(Argument::Null),
            (Value::Text(s), ParamKind::Text) => Ok(Argument::Text(s.clone())),
            (Value::Int(i), ParamKind::Text) => Ok(Argument::Text(i.to_string())),
            (Value::Bool(b), ParamKind::Text) => Ok(Argument::Text(b.to_string())),
            (Value::Bool(b), ParamKind::Bool) => Ok(Argument::Bool(*b)),
            (Value::Int(i), ParamKind::Int) => i32::try_from(*i)
                .map(Argument::Int)
                .map_err(|_| format!("{} does not fit an int parameter", i)),
            (Value::Text(s), ParamKind::TextArray) => Ok(Argument::TextArray(vec![s.clone()])),
            (Value::Int(i), ParamKind::IntArray) => i32::try_from(*i)
                .map(|i| Argument::IntArray(vec![i]))
                .map_err(|_| format!("{} does not fit an int[] parameter", i)),
            (other, kind) => Err(format!(
                "cannot pass a {} value as a {} parameter",
                other.kind(),
                kind
            )),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Argument::Null)
    }

    /// Whether the argument is acceptable for a parameter of `kind`.
    pub fn fits(&self, kind: ParamKind) -> bool {
        matches!(
            (self, kind),
            (Argument::Null, _)
                | (Argument::Text(_), ParamKind::Text)
                | (Argument::Bool(_), ParamKind::Bool)
                | (Argument::Int(_), ParamKind::Int)
                | (Argument::TextArray(_), ParamKind::TextArray)
                | (Argument::IntArray(_), ParamKind::IntArray)
        )
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Null => write!(f, "null"),
            Argument::Bool(b) => write!(f, "{}", b),
            Argument::Int(i) => write!(f, "{}", i),
            Argument::Text(s) => write!(f, "\"{}\"", s),
            Argument::TextArray(items) => write!(f, "{:?}", items),
            Argument::IntArray(items) => write!(f, "{:?}", items),
        }
    }
}

impl From<Option<&str>> for Argument {
    fn from(value: Option<&str>) -> Self {
        value.map_or(Argument::Null, |s| Argument::Text(s.to_string()))
    }
}

impl From<&str> for Argument {
    fn from(value: &str) -> Self {
        Argument::Text(value.to_string())
    }
}

impl From<bool> for Argument {
    fn from(value: bool) -> Self {
        Argument::Bool(value)
    }
}

impl From<i32> for Argument {
    fn from(value: i32) -> Self {
        Argument::Int(value)
    }
}

impl From<Option<&[String]>> for Argument {
    fn from(value: Option<&[String]>) -> Self {
        value.map_or(Argument::Null, |items| Argument::TextArray(items.to_vec()))
    }
}

impl From<Option<&[i32]>> for Argument {
    fn from(value: Option<&[i32]>) -> Self {
        value.map_or(Argument::Null, |items| Argument::IntArray(items.to_vec()))
    }
}
