//! Suppression paths, from the context API and from configuration files

#[path = "testutils/mod.rs"]
mod testutils;

use metabind::{DescriptorRegistry, ExtractionConfig, MetadataContext, MetadataError, Operation};
use std::io::Write;
use testutils::fixture;

#[test]
fn test_suppressed_invocation_never_reaches_provider() {
    testutils::init_logging();
    let provider = fixture::two_catalogs();
    let mut ctx = MetadataContext::new(&provider).with_registry(DescriptorRegistry::new());
    ctx.suppress(["table/columns", "table/indexInfo"]);

    let catalogs = ctx.get_catalogs(true).unwrap();
    assert_eq!(provider.call_count(Operation::GetColumns), 0);
    assert_eq!(provider.call_count(Operation::GetIndexInfo), 0);
    assert!(catalogs[0].tables().all(|t| t.columns.is_empty()));

    // Sibling invocations still run.
    assert_eq!(provider.call_count(Operation::GetPrimaryKeys), 2);
    assert_eq!(catalogs[0].schemas[0].tables[1].imported_keys.len(), 1);
}

#[test]
fn test_suppressed_column_keeps_zero_value() {
    testutils::init_logging();
    let provider = fixture::two_catalogs();
    let mut ctx = MetadataContext::new(&provider).with_registry(DescriptorRegistry::new());
    ctx.suppress(["table/tableType"]);

    let tables = ctx
        .get_tables(Some("db1"), Some("public"), None, None)
        .unwrap();
    assert_eq!(tables.len(), 2);
    assert!(tables.iter().all(|t| t.table_type.is_empty()));
    assert!(tables.iter().all(|t| !t.table_name.is_empty()));
    assert!(ctx.diagnostics().is_empty());
}

#[test]
fn test_suppressing_schemas_prunes_subtree() {
    testutils::init_logging();
    let provider = fixture::two_catalogs();
    let mut ctx = MetadataContext::new(&provider).with_registry(DescriptorRegistry::new());
    ctx.suppress(["catalog/schemas"]);

    let catalogs = ctx.get_catalogs(true).unwrap();
    assert_eq!(catalogs.len(), 2);
    assert!(catalogs.iter().all(|c| c.schemas.is_empty()));
    assert_eq!(provider.call_count(Operation::GetTables), 0);
    assert_eq!(provider.call_count(Operation::GetCrossReference), 0);
    assert_eq!(provider.total_calls(), 1);
}

#[test]
fn test_config_file_drives_extraction() {
    testutils::init_logging();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "suppressed_paths": ["schema/procedures", "schema/functions", "schema/udts"],
            "nonempty": false
        }}"#
    )
    .unwrap();

    let config = ExtractionConfig::from_json_file(file.path()).unwrap();
    let provider = fixture::two_catalogs();
    let mut ctx = MetadataContext::with_config(&provider, config)
        .with_registry(DescriptorRegistry::new());
    assert!(!ctx.nonempty());
    assert!(ctx.is_suppressed("schema/udts"));

    let catalogs = ctx.get_catalogs(ctx.nonempty()).unwrap();
    // db2 reports no schemas and stays empty without virtual nodes.
    assert!(catalogs[1].schemas.is_empty());
    assert_eq!(provider.call_count(Operation::GetProcedures), 0);
    assert_eq!(provider.call_count(Operation::GetFunctions), 0);
    assert_eq!(provider.call_count(Operation::GetUdts), 0);
    assert_eq!(provider.call_count(Operation::GetTables), 1);
}

#[test]
fn test_malformed_config_file_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"suppressed_paths": ["table/columns/extra"]}}"#).unwrap();

    let err = ExtractionConfig::from_json_file(file.path()).err().unwrap();
    assert!(matches!(err, MetadataError::Config(_)));
    assert!(err.is_structural());
}
