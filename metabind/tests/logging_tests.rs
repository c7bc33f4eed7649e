//! Log output of tolerated field-level anomalies
//!
//! Installs a recording logger for this test binary, so these tests do not
//! share the env_logger setup of the other suites.

use metabind::{
    DescriptorRegistry, DiagnosticKind, InMemoryProvider, MetadataContext, Operation, ResultTable,
};
use once_cell::sync::Lazy;
use parking_lot::Mutex;

struct RecordingLogger {
    records: Mutex<Vec<(log::Level, String)>>,
}

impl log::Log for RecordingLogger {
    fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        self.records
            .lock()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

static LOGGER: Lazy<RecordingLogger> = Lazy::new(|| RecordingLogger {
    records: Mutex::new(Vec::new()),
});

fn install() -> &'static RecordingLogger {
    let logger: &'static RecordingLogger = &LOGGER;
    if log::set_logger(logger).is_ok() {
        log::set_max_level(log::LevelFilter::Trace);
    }
    logger
}

fn messages(logger: &RecordingLogger, level: log::Level, needle: &str) -> Vec<String> {
    logger
        .records
        .lock()
        .iter()
        .filter(|(recorded, message)| *recorded == level && message.contains(needle))
        .map(|(_, message)| message.clone())
        .collect()
}

#[test]
fn test_missing_column_logs_warning() {
    let logger = install();
    let provider = InMemoryProvider::new().respond(
        Operation::GetSchemas,
        ResultTable::new(&["TABLE_SCHEM"]).row(vec!["public".into()]),
    );
    let mut ctx = MetadataContext::new(&provider).with_registry(DescriptorRegistry::new());

    let names = ctx.get_schema_names().unwrap();
    assert_eq!(names.len(), 1);
    assert_eq!(names[0].table_schem, "public");
    assert_eq!(names[0].table_catalog, None);

    let diagnostics = ctx.take_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::MissingColumn);

    let warnings = messages(logger, log::Level::Warn, "schemaName/tableCatalog");
    assert_eq!(warnings.len(), 1, "{:?}", warnings);
}

#[test]
fn test_failed_nested_call_logs_error() {
    let logger = install();
    let provider = InMemoryProvider::new()
        .respond(
            Operation::GetCatalogs,
            ResultTable::new(&["TABLE_CAT"]).row(vec!["warehouse".into()]),
        )
        .fail(
            Operation::GetSchemasMatching,
            metabind::ProviderError::Failed("access denied".to_string()),
        );
    let mut ctx = MetadataContext::new(&provider).with_registry(DescriptorRegistry::new());

    let catalogs = ctx.get_catalogs(false).unwrap();
    assert_eq!(catalogs.len(), 1);
    assert!(catalogs[0].schemas.is_empty());

    let errors = messages(logger, log::Level::Error, "catalog/schemas");
    assert_eq!(errors.len(), 1, "{:?}", errors);
    assert!(errors[0].contains("access denied"));
}
