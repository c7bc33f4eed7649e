//! Process-wide descriptor registry
//!
//! These tests clear the global registry, so they run serially.

#[path = "testutils/mod.rs"]
mod testutils;

use metabind::model::{Catalog, Column, Schema, Table};
use metabind::{DescriptorRegistry, MetadataContext};
use serial_test::serial;
use std::sync::Arc;
use std::thread;
use testutils::fixture;

#[test]
#[serial]
fn test_context_without_registry_uses_global() {
    testutils::init_logging();
    let global = DescriptorRegistry::global();
    global.clear();
    assert!(global.is_empty());

    let provider = fixture::two_catalogs();
    let mut ctx = MetadataContext::new(&provider);
    ctx.get_catalogs(true).unwrap();

    assert!(global.is_cached::<Catalog>());
    assert!(global.is_cached::<Schema>());
    assert!(global.is_cached::<Table>());
    assert!(global.is_cached::<Column>());
}

#[test]
#[serial]
fn test_private_registry_leaves_global_untouched() {
    let global = DescriptorRegistry::global();
    global.clear();

    let provider = fixture::two_catalogs();
    let registry = DescriptorRegistry::new();
    let mut ctx = MetadataContext::new(&provider).with_registry(registry);
    ctx.get_tables(Some("db1"), Some("public"), None, None)
        .unwrap();

    assert!(global.is_empty());
}

#[test]
#[serial]
fn test_concurrent_lookups_share_one_descriptor() {
    let global = DescriptorRegistry::global();
    global.clear();

    let handles: Vec<_> = (0..8)
        .map(|_| thread::spawn(|| DescriptorRegistry::global().descriptor::<Table>().unwrap()))
        .collect();
    let descriptors: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert!(descriptors
        .windows(2)
        .all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
    assert_eq!(global.len(), 1);
}
