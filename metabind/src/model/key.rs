// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Keys and indexes

use crate::descriptor::{Directive, Entity};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryKey {
    pub table_cat: Option<String>,
    pub table_schem: Option<String>,
    pub table_name: String,
    pub column_name: String,
    pub key_seq: i16,
    pub pk_name: Option<String>,
}

impl Entity for PrimaryKey {
    const NAME: &'static str = "primaryKey";

    fn directives() -> Vec<Directive<Self>> {
        vec![
            bind!(table_cat, "tableCat", "TABLE_CAT", nillable),
            bind!(table_schem, "tableSchem", "TABLE_SCHEM", nillable),
            bind!(table_name, "tableName", "TABLE_NAME"),
            bind!(column_name, "columnName", "COLUMN_NAME"),
            bind!(key_seq, "keySeq", "KEY_SEQ"),
            bind!(pk_name, "pkName", "PK_NAME", nillable),
        ]
    }
}

// Imported keys, exported keys and cross references share one row shape:
// a primary key column and the foreign key column that refers to it.
macro_rules! key_entity {
    ($(#[$meta:meta])* $ty:ident, $name:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $ty {
            pub pktable_cat: Option<String>,
            pub pktable_schem: Option<String>,
            pub pktable_name: String,
            pub pkcolumn_name: String,
            pub fktable_cat: Option<String>,
            pub fktable_schem: Option<String>,
            pub fktable_name: String,
            pub fkcolumn_name: String,
            pub key_seq: i16,
            pub update_rule: i16,
            pub delete_rule: i16,
            pub fk_name: Option<String>,
            pub pk_name: Option<String>,
            pub deferrability: i16,
        }

        impl Entity for $ty {
            const NAME: &'static str = $name;

            fn directives() -> Vec<Directive<Self>> {
                vec![
                    bind!(pktable_cat, "pktableCat", "PKTABLE_CAT", nillable),
                    bind!(pktable_schem, "pktableSchem", "PKTABLE_SCHEM", nillable),
                    bind!(pktable_name, "pktableName", "PKTABLE_NAME"),
                    bind!(pkcolumn_name, "pkcolumnName", "PKCOLUMN_NAME"),
                    bind!(fktable_cat, "fktableCat", "FKTABLE_CAT", nillable),
                    bind!(fktable_schem, "fktableSchem", "FKTABLE_SCHEM", nillable),
                    bind!(fktable_name, "fktableName", "FKTABLE_NAME"),
                    bind!(fkcolumn_name, "fkcolumnName", "FKCOLUMN_NAME"),
                    bind!(key_seq, "keySeq", "KEY_SEQ"),
                    bind!(update_rule, "updateRule", "UPDATE_RULE"),
                    bind!(delete_rule, "deleteRule", "DELETE_RULE"),
                    bind!(fk_name, "fkName", "FK_NAME", nillable),
                    bind!(pk_name, "pkName", "PK_NAME", nillable),
                    bind!(deferrability, "deferrability", "DEFERRABILITY"),
                ]
            }
        }
    };
}

key_entity!(
    /// Primary key column referenced by a foreign key of the owning table
    ImportedKey,
    "importedKey"
);

key_entity!(
    /// Foreign key column referencing the primary key of the owning table
    ExportedKey,
    "exportedKey"
);

key_entity!(
    /// Foreign key of one table referencing the primary key of another
    CrossReference,
    "crossReference"
);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexInfo {
    pub table_cat: Option<String>,
    pub table_schem: Option<String>,
    pub table_name: String,
    pub non_unique: bool,
    pub index_qualifier: Option<String>,
    pub index_name: Option<String>,
    #[serde(rename = "type")]
    pub index_type: i16,
    pub ordinal_position: i16,
    pub column_name: Option<String>,
    pub asc_or_desc: Option<String>,
    pub cardinality: i64,
    pub pages: i64,
    pub filter_condition: Option<String>,
}

impl Entity for IndexInfo {
    const NAME: &'static str = "indexInfo";

    fn directives() -> Vec<Directive<Self>> {
        vec![
            bind!(table_cat, "tableCat", "TABLE_CAT", nillable),
            bind!(table_schem, "tableSchem", "TABLE_SCHEM", nillable),
            bind!(table_name, "tableName", "TABLE_NAME"),
            bind!(non_unique, "nonUnique", "NON_UNIQUE"),
            bind!(index_qualifier, "indexQualifier", "INDEX_QUALIFIER", nillable),
            bind!(index_name, "indexName", "INDEX_NAME", nillable),
            bind!(index_type, "type", "TYPE"),
            bind!(ordinal_position, "ordinalPosition", "ORDINAL_POSITION"),
            bind!(column_name, "columnName", "COLUMN_NAME", nillable),
            bind!(asc_or_desc, "ascOrDesc", "ASC_OR_DESC", nillable),
            bind!(cardinality, "cardinality", "CARDINALITY"),
            bind!(pages, "pages", "PAGES"),
            bind!(filter_condition, "filterCondition", "FILTER_CONDITION", nillable),
        ]
    }
}
