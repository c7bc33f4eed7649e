//! Fixture metadata sources
//!
//! `two_catalogs()` models this source:
//!
//! ```text
//! db1
//! └── public
//!     ├── customers (id)
//!     └── orders (id, customer_id -> customers.id)
//! db2   (no schemas)
//! ```

use metabind::{Argument, InMemoryProvider, Operation, ResultTable, Value};

pub const TABLE_LABELS: &[&str] = &[
    "TABLE_CAT",
    "TABLE_SCHEM",
    "TABLE_NAME",
    "TABLE_TYPE",
    "REMARKS",
    "TYPE_CAT",
    "TYPE_SCHEM",
    "TYPE_NAME",
    "SELF_REFERENCING_COL_NAME",
    "REF_GENERATION",
];

pub const COLUMN_LABELS: &[&str] = &[
    "TABLE_CAT",
    "TABLE_SCHEM",
    "TABLE_NAME",
    "COLUMN_NAME",
    "DATA_TYPE",
    "TYPE_NAME",
    "COLUMN_SIZE",
    "BUFFER_LENGTH",
    "DECIMAL_DIGITS",
    "NUM_PREC_RADIX",
    "NULLABLE",
    "REMARKS",
    "COLUMN_DEF",
    "SQL_DATA_TYPE",
    "SQL_DATETIME_SUB",
    "CHAR_OCTET_LENGTH",
    "ORDINAL_POSITION",
    "IS_NULLABLE",
    "SCOPE_CATALOG",
    "SCOPE_SCHEMA",
    "SCOPE_TABLE",
    "SOURCE_DATA_TYPE",
    "IS_AUTOINCREMENT",
    "IS_GENERATEDCOLUMN",
];

pub const KEY_LABELS: &[&str] = &[
    "PKTABLE_CAT",
    "PKTABLE_SCHEM",
    "PKTABLE_NAME",
    "PKCOLUMN_NAME",
    "FKTABLE_CAT",
    "FKTABLE_SCHEM",
    "FKTABLE_NAME",
    "FKCOLUMN_NAME",
    "KEY_SEQ",
    "UPDATE_RULE",
    "DELETE_RULE",
    "FK_NAME",
    "PK_NAME",
    "DEFERRABILITY",
];

pub fn text(value: &str) -> Argument {
    Argument::from(value)
}

pub fn catalogs(names: &[&str]) -> ResultTable {
    names.iter().fold(ResultTable::new(&["TABLE_CAT"]), |t, name| {
        t.row(vec![(*name).into()])
    })
}

pub fn schemas(catalog: &str, names: &[&str]) -> ResultTable {
    names
        .iter()
        .fold(ResultTable::new(&["TABLE_SCHEM", "TABLE_CATALOG"]), |t, name| {
            t.row(vec![(*name).into(), catalog.into()])
        })
}

pub fn tables(catalog: &str, schema: &str, names: &[&str]) -> ResultTable {
    names.iter().fold(ResultTable::new(TABLE_LABELS), |t, name| {
        t.row(vec![
            catalog.into(),
            schema.into(),
            (*name).into(),
            "TABLE".into(),
            Value::Null,
            Value::Null,
            Value::Null,
            Value::Null,
            Value::Null,
            Value::Null,
        ])
    })
}

/// Integer, not-null columns numbered from 1.
pub fn columns(catalog: &str, schema: &str, table: &str, names: &[&str]) -> ResultTable {
    names
        .iter()
        .enumerate()
        .fold(ResultTable::new(COLUMN_LABELS), |t, (i, name)| {
            t.row(vec![
                catalog.into(),
                schema.into(),
                table.into(),
                (*name).into(),
                4i32.into(),
                "INTEGER".into(),
                10i32.into(),
                Value::Null,
                0i32.into(),
                10i32.into(),
                0i32.into(),
                Value::Null,
                Value::Null,
                Value::Null,
                Value::Null,
                Value::Null,
                (i as i32 + 1).into(),
                "NO".into(),
                Value::Null,
                Value::Null,
                Value::Null,
                Value::Null,
                "NO".into(),
                "NO".into(),
            ])
        })
}

/// `fk_table.fk_column` references `pk_table.pk_column`, all in db1.public.
pub fn key(pk_table: &str, pk_column: &str, fk_table: &str, fk_column: &str) -> ResultTable {
    ResultTable::new(KEY_LABELS).row(vec![
        "db1".into(),
        "public".into(),
        pk_table.into(),
        pk_column.into(),
        "db1".into(),
        "public".into(),
        fk_table.into(),
        fk_column.into(),
        1i16.into(),
        3i16.into(),
        3i16.into(),
        format!("fk_{}_{}", fk_table, pk_table).into(),
        format!("pk_{}", pk_table).into(),
        7i16.into(),
    ])
}

pub fn table_args(operation_extra: &[Argument], table: &str) -> Vec<Argument> {
    let mut args = vec![text("db1"), text("public"), text(table)];
    args.extend_from_slice(operation_extra);
    args
}

pub fn two_catalogs() -> InMemoryProvider {
    InMemoryProvider::new()
        .respond(Operation::GetCatalogs, catalogs(&["db1", "db2"]))
        .respond_to(
            Operation::GetSchemasMatching,
            vec![text("db1"), Argument::Null],
            schemas("db1", &["public"]),
        )
        .respond_to(
            Operation::GetTables,
            vec![text("db1"), text("public"), Argument::Null, Argument::Null],
            tables("db1", "public", &["customers", "orders"]),
        )
        .respond_to(
            Operation::GetColumns,
            table_args(&[Argument::Null], "customers"),
            columns("db1", "public", "customers", &["id"]),
        )
        .respond_to(
            Operation::GetColumns,
            table_args(&[Argument::Null], "orders"),
            columns("db1", "public", "orders", &["id", "customer_id"]),
        )
        .respond_to(
            Operation::GetImportedKeys,
            table_args(&[], "orders"),
            key("customers", "id", "orders", "customer_id"),
        )
        .respond_to(
            Operation::GetExportedKeys,
            table_args(&[], "customers"),
            key("customers", "id", "orders", "customer_id"),
        )
        .respond_to(
            Operation::GetCrossReference,
            vec![
                text("db1"),
                text("public"),
                text("customers"),
                text("db1"),
                text("public"),
                text("orders"),
            ],
            key("customers", "id", "orders", "customer_id"),
        )
}
