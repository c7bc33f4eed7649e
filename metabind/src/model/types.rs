// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! User-defined types, type info and client properties

use crate::descriptor::{Directive, Entity};
use serde::{Deserialize, Serialize};

/// User-defined type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Udt {
    pub type_cat: Option<String>,
    pub type_schem: Option<String>,
    pub type_name: String,
    pub class_name: String,
    pub data_type: i32,
    pub remarks: Option<String>,
    pub base_type: Option<i16>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub super_types: Vec<SuperType>,
}

impl Entity for Udt {
    const NAME: &'static str = "udt";

    fn directives() -> Vec<Directive<Self>> {
        vec![
            bind!(type_cat, "typeCat", "TYPE_CAT", nillable),
            bind!(type_schem, "typeSchem", "TYPE_SCHEM", nillable),
            bind!(type_name, "typeName", "TYPE_NAME"),
            bind!(class_name, "className", "CLASS_NAME"),
            bind!(data_type, "dataType", "DATA_TYPE"),
            bind!(remarks, "remarks", "REMARKS", nillable),
            bind!(base_type, "baseType", "BASE_TYPE", nillable),
            invoke!(
                attributes,
                "attributes",
                GetAttributes,
                [":typeCat", ":typeSchem", ":typeName", "null"]
            ),
            invoke!(
                super_types,
                "superTypes",
                GetSuperTypes,
                [":typeCat", ":typeSchem", ":typeName"]
            ),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    pub type_cat: Option<String>,
    pub type_schem: Option<String>,
    pub type_name: String,
    pub attr_name: String,
    pub data_type: i32,
    pub attr_type_name: String,
    pub attr_size: i32,
    pub decimal_digits: Option<i32>,
    pub num_prec_radix: i32,
    pub nullable: i32,
    pub remarks: Option<String>,
    pub attr_def: Option<String>,
    pub char_octet_length: Option<i32>,
    pub ordinal_position: i32,
    pub is_nullable: String,
    pub scope_catalog: Option<String>,
    pub scope_schema: Option<String>,
    pub scope_table: Option<String>,
    pub source_data_type: Option<i16>,
}

impl Entity for Attribute {
    const NAME: &'static str = "attribute";

    fn directives() -> Vec<Directive<Self>> {
        vec![
            bind!(type_cat, "typeCat", "TYPE_CAT", nillable),
            bind!(type_schem, "typeSchem", "TYPE_SCHEM", nillable),
            bind!(type_name, "typeName", "TYPE_NAME"),
            bind!(attr_name, "attrName", "ATTR_NAME"),
            bind!(data_type, "dataType", "DATA_TYPE"),
            bind!(attr_type_name, "attrTypeName", "ATTR_TYPE_NAME"),
            bind!(attr_size, "attrSize", "ATTR_SIZE"),
            bind!(decimal_digits, "decimalDigits", "DECIMAL_DIGITS", nillable),
            bind!(num_prec_radix, "numPrecRadix", "NUM_PREC_RADIX"),
            bind!(nullable, "nullable", "NULLABLE"),
            bind!(remarks, "remarks", "REMARKS", nillable),
            bind!(attr_def, "attrDef", "ATTR_DEF", nillable),
            unused!("sqlDataType", "SQL_DATA_TYPE"),
            unused!("sqlDatetimeSub", "SQL_DATETIME_SUB"),
            bind!(char_octet_length, "charOctetLength", "CHAR_OCTET_LENGTH", nillable),
            bind!(ordinal_position, "ordinalPosition", "ORDINAL_POSITION"),
            bind!(is_nullable, "isNullable", "IS_NULLABLE"),
            bind!(scope_catalog, "scopeCatalog", "SCOPE_CATALOG", nillable),
            bind!(scope_schema, "scopeSchema", "SCOPE_SCHEMA", nillable),
            bind!(scope_table, "scopeTable", "SCOPE_TABLE", nillable),
            bind!(source_data_type, "sourceDataType", "SOURCE_DATA_TYPE", nillable),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuperType {
    pub type_cat: Option<String>,
    pub type_schem: Option<String>,
    pub type_name: String,
    pub supertype_cat: Option<String>,
    pub supertype_schem: Option<String>,
    pub supertype_name: String,
}

impl Entity for SuperType {
    const NAME: &'static str = "superType";

    fn directives() -> Vec<Directive<Self>> {
        vec![
            bind!(type_cat, "typeCat", "TYPE_CAT", nillable),
            bind!(type_schem, "typeSchem", "TYPE_SCHEM", nillable),
            bind!(type_name, "typeName", "TYPE_NAME"),
            bind!(supertype_cat, "supertypeCat", "SUPERTYPE_CAT", nillable),
            bind!(supertype_schem, "supertypeSchem", "SUPERTYPE_SCHEM", nillable),
            bind!(supertype_name, "supertypeName", "SUPERTYPE_NAME"),
        ]
    }
}

/// A data type supported by the source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeInfo {
    pub type_name: String,
    pub data_type: i32,
    pub precision: i32,
    pub literal_prefix: Option<String>,
    pub literal_suffix: Option<String>,
    pub create_params: Option<String>,
    pub nullable: i16,
    pub case_sensitive: bool,
    pub searchable: i16,
    pub unsigned_attribute: bool,
    pub fixed_prec_scale: bool,
    pub auto_increment: bool,
    pub local_type_name: Option<String>,
    pub minimum_scale: i16,
    pub maximum_scale: i16,
    pub num_prec_radix: i32,
}

impl Entity for TypeInfo {
    const NAME: &'static str = "typeInfo";

    fn directives() -> Vec<Directive<Self>> {
        vec![
            bind!(type_name, "typeName", "TYPE_NAME"),
            bind!(data_type, "dataType", "DATA_TYPE"),
            bind!(precision, "precision", "PRECISION"),
            bind!(literal_prefix, "literalPrefix", "LITERAL_PREFIX", nillable),
            bind!(literal_suffix, "literalSuffix", "LITERAL_SUFFIX", nillable),
            bind!(create_params, "createParams", "CREATE_PARAMS", nillable),
            bind!(nullable, "nullable", "NULLABLE"),
            bind!(case_sensitive, "caseSensitive", "CASE_SENSITIVE"),
            bind!(searchable, "searchable", "SEARCHABLE"),
            bind!(unsigned_attribute, "unsignedAttribute", "UNSIGNED_ATTRIBUTE"),
            bind!(fixed_prec_scale, "fixedPrecScale", "FIXED_PREC_SCALE"),
            bind!(auto_increment, "autoIncrement", "AUTO_INCREMENT"),
            bind!(local_type_name, "localTypeName", "LOCAL_TYPE_NAME", nillable),
            bind!(minimum_scale, "minimumScale", "MINIMUM_SCALE"),
            bind!(maximum_scale, "maximumScale", "MAXIMUM_SCALE"),
            unused!("sqlDataType", "SQL_DATA_TYPE"),
            unused!("sqlDatetimeSub", "SQL_DATETIME_SUB"),
            bind!(num_prec_radix, "numPrecRadix", "NUM_PREC_RADIX"),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfoProperty {
    pub name: String,
    pub max_len: i32,
    pub default_value: Option<String>,
    pub description: Option<String>,
}

impl Entity for ClientInfoProperty {
    const NAME: &'static str = "clientInfoProperty";

    fn directives() -> Vec<Directive<Self>> {
        vec![
            bind!(name, "name", "NAME"),
            bind!(max_len, "maxLen", "MAX_LEN"),
            bind!(default_value, "defaultValue", "DEFAULT_VALUE", nillable),
            bind!(description, "description", "DESCRIPTION", nillable),
        ]
    }
}
