//! End-to-end extraction over the two-catalog fixture source
//!
//! Covers tree shape, back-referenced child arguments, virtual nodes and
//! the cross-reference pass.

#[path = "testutils/mod.rs"]
mod testutils;

use metabind::{Argument, DescriptorRegistry, InMemoryProvider, MetadataContext, Operation};
use testutils::fixture::{self, text};

fn context(provider: &InMemoryProvider) -> MetadataContext<'_> {
    testutils::init_logging();
    MetadataContext::new(provider).with_registry(DescriptorRegistry::new())
}

#[test]
fn test_two_catalog_tree() {
    let provider = fixture::two_catalogs();
    let mut ctx = context(&provider);

    let catalogs = ctx.get_catalogs(true).unwrap();
    assert_eq!(catalogs.len(), 2);

    let db1 = &catalogs[0];
    assert_eq!(db1.table_cat, "db1");
    assert!(!db1.is_virtual);
    assert_eq!(db1.schemas.len(), 1);
    assert_eq!(db1.schemas[0].table_schem, "public");

    let names: Vec<&str> = db1.tables().map(|t| t.table_name.as_str()).collect();
    assert_eq!(names, vec!["customers", "orders"]);

    let orders = &db1.schemas[0].tables[1];
    assert_eq!(orders.qualified_name(), "db1.public.orders");
    let columns: Vec<&str> = orders.columns.iter().map(|c| c.column_name.as_str()).collect();
    assert_eq!(columns, vec!["id", "customer_id"]);
    assert_eq!(orders.columns[1].ordinal_position, 2);
    assert_eq!(orders.imported_keys.len(), 1);
    assert_eq!(orders.imported_keys[0].pktable_name, "customers");

    let customers = &db1.schemas[0].tables[0];
    assert_eq!(customers.exported_keys.len(), 1);
    assert_eq!(customers.exported_keys[0].fkcolumn_name, "customer_id");

    let db2 = &catalogs[1];
    assert_eq!(db2.table_cat, "db2");
    assert_eq!(db2.schemas.len(), 1);
    assert!(db2.schemas[0].is_virtual);
    assert_eq!(db2.schemas[0].table_catalog.as_deref(), Some("db2"));

    assert!(ctx.diagnostics().is_empty(), "{:?}", ctx.diagnostics());
    assert_eq!(provider.open_cursors(), 0);
}

#[test]
fn test_child_arguments_come_from_parent_row() {
    let provider = fixture::two_catalogs();
    let mut ctx = context(&provider);
    ctx.get_catalogs(true).unwrap();

    let calls = provider.calls();
    assert_eq!(provider.call_count(Operation::GetSchemasMatching), 2);
    for catalog in ["db1", "db2"] {
        assert!(
            calls.iter().any(|c| c.operation == Operation::GetSchemasMatching
                && c.arguments == vec![text(catalog), Argument::Null]),
            "no schema lookup keyed by catalog '{}'",
            catalog
        );
    }
    assert!(calls.iter().any(|c| c.operation == Operation::GetTables
        && c.arguments == vec![text("db1"), text("public"), Argument::Null, Argument::Null]));

    let best_rows: Vec<_> = calls
        .iter()
        .filter(|c| {
            c.operation == Operation::GetBestRowIdentifier && c.arguments[2] == text("orders")
        })
        .map(|c| c.arguments[3].clone())
        .collect();
    assert_eq!(
        best_rows,
        vec![Argument::Int(0), Argument::Int(1), Argument::Int(2)]
    );
}

#[test]
fn test_catalog_cross_references_cover_each_pair_once() {
    let provider = fixture::two_catalogs();
    let mut ctx = context(&provider);

    let catalogs = ctx.get_catalogs(true).unwrap();
    // Two tables in db1: four ordered pairs, attached to the catalog only.
    assert_eq!(provider.call_count(Operation::GetCrossReference), 4);

    let db1 = &catalogs[0];
    assert_eq!(db1.cross_references.len(), 1);
    assert!(db1.schemas[0].cross_references.is_empty());
    let reference = &db1.cross_references[0];
    assert_eq!(reference.pktable_name, "customers");
    assert_eq!(reference.fktable_name, "orders");
    assert_eq!(reference.fk_name.as_deref(), Some("fk_orders_customers"));

    assert!(catalogs[1].cross_references.is_empty());
}

#[test]
fn test_schema_listing_attaches_cross_references_per_schema() {
    let provider = fixture::two_catalogs();
    let mut ctx = context(&provider);

    let schemas = ctx.get_schemas(Some("db1"), None, true).unwrap();
    assert_eq!(schemas.len(), 1);
    assert_eq!(provider.call_count(Operation::GetCrossReference), 4);
    assert_eq!(schemas[0].cross_references.len(), 1);
    assert_eq!(schemas[0].cross_references[0].fktable_name, "orders");
}

#[test]
fn test_explicit_cross_reference_lookup() {
    let provider = fixture::two_catalogs();
    let mut ctx = context(&provider);

    let tables = ctx
        .get_tables(Some("db1"), Some("public"), None, None)
        .unwrap();
    provider.clear_calls();

    let references = ctx.get_cross_references(&tables).unwrap();
    assert_eq!(provider.call_count(Operation::GetCrossReference), 4);
    assert_eq!(references.len(), 1);

    let direct = ctx
        .get_cross_reference(
            Some("db1"),
            Some("public"),
            "customers",
            Some("db1"),
            Some("public"),
            "orders",
        )
        .unwrap();
    assert_eq!(direct, references);
}

#[test]
fn test_virtual_nodes_are_idempotent() {
    let provider = InMemoryProvider::new();
    let mut ctx = context(&provider);

    for _ in 0..2 {
        let catalogs = ctx.get_catalogs(true).unwrap();
        assert_eq!(catalogs.len(), 1);
        assert!(catalogs[0].is_virtual);
        assert_eq!(catalogs[0].table_cat, "");
        assert_eq!(catalogs[0].schemas.len(), 1);
        assert!(catalogs[0].schemas[0].is_virtual);
        assert_eq!(catalogs[0].schemas[0].table_schem, "");
    }

    // The virtual catalog still asks the source for its schemas.
    assert_eq!(provider.call_count(Operation::GetSchemasMatching), 2);

    let schemas = ctx.get_schemas(Some("db9"), None, true).unwrap();
    assert_eq!(schemas.len(), 1);
    assert!(schemas[0].is_virtual);
    assert!(ctx.get_schemas(Some("db9"), None, false).unwrap().is_empty());
}

#[test]
fn test_snapshot_serializes_camel_case() {
    let provider = fixture::two_catalogs();
    let mut ctx = context(&provider);

    let metadata = ctx.snapshot(true).unwrap();
    assert_eq!(metadata.tables().count(), 2);

    let json = serde_json::to_value(&metadata).unwrap();
    let table = &json["catalogs"][0]["schemas"][0]["tables"][1];
    assert_eq!(table["tableName"], "orders");
    assert_eq!(table["importedKeys"][0]["pkcolumnName"], "id");
    assert_eq!(json["catalogs"][1]["schemas"][0]["virtual"], true);
}
