// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Graph expansion
//!
//! Runs the invocation directives of a freshly bound entity. Each argument
//! set is resolved against the entity, sent to the provider, and every row
//! of the result is bound and expanded recursively before being appended
//! to the child collection.
//!
//! A suppressed invocation is skipped before any provider call. Failures
//! are tolerated per argument set: the set contributes no rows and a
//! diagnostic is recorded. Only structural errors propagate.

use super::Binder;
use crate::descriptor::{path_of, ArgumentTemplate, Descriptor, Entity, InvocationPlan};
use crate::error::{MetadataError, MetadataResult, ProviderError};
use crate::provider::{dispatch, Argument, CursorGuard};
use crate::session::{Diagnostic, DiagnosticKind};

/// Binds the rows of one invocation into a child collection of `T`
pub trait Populate<T>: Send + Sync {
    /// Entity name of the collection elements.
    fn element(&self) -> &'static str;

    /// Bind every row of `cursor` and append the results to `owner`.
    /// Returns the number of elements appended.
    fn populate(
        &self,
        binder: &mut Binder<'_>,
        owner: &mut T,
        cursor: &mut CursorGuard<'_>,
    ) -> MetadataResult<usize>;
}

/// A `Vec<E>` field of `T`
pub struct Children<T, E> {
    field: fn(&mut T) -> &mut Vec<E>,
}

impl<T, E> Children<T, E> {
    pub fn new(field: fn(&mut T) -> &mut Vec<E>) -> Self {
        Self { field }
    }
}

impl<T: Entity, E: Entity> Populate<T> for Children<T, E> {
    fn element(&self) -> &'static str {
        E::NAME
    }

    fn populate(
        &self,
        binder: &mut Binder<'_>,
        owner: &mut T,
        cursor: &mut CursorGuard<'_>,
    ) -> MetadataResult<usize> {
        let descriptor = binder.registry.descriptor::<E>()?;
        let children = binder.bind_all(&descriptor, cursor)?;
        let count = children.len();
        (self.field)(owner).extend(children);
        Ok(count)
    }
}

impl<'a> Binder<'a> {
    pub(crate) fn expand<T: Entity>(
        &mut self,
        descriptor: &Descriptor<T>,
        instance: &mut T,
    ) -> MetadataResult<()> {
        for plan in &descriptor.invocations {
            let path = path_of(T::NAME, plan.field);
            if self.session.is_suppressed(&path) {
                log::debug!("Skipping suppressed path '{}'", path);
                continue;
            }

            for templates in &plan.argument_sets {
                let resolved = self.resolve_arguments(descriptor, plan, templates, instance);
                let arguments = match resolved {
                    Ok(arguments) => arguments,
                    Err(reason) => {
                        log::warn!("Skipping {} call at {}: {}", plan.operation, path, reason);
                        self.session.record(Diagnostic::new(
                            path.as_str(),
                            DiagnosticKind::ArgumentMismatch,
                            reason,
                        ));
                        continue;
                    }
                };

                let result = match dispatch(self.provider, plan.operation, &arguments) {
                    Ok(mut cursor) => plan.children.populate(self, instance, &mut cursor),
                    Err(e) => Err(e),
                };
                if let Some(count) = self.tolerate(&path, result)? {
                    log::debug!(
                        "Expanded {} with {} '{}' elements",
                        path,
                        count,
                        plan.children.element()
                    );
                }
            }
        }
        Ok(())
    }

    fn resolve_arguments<T>(
        &self,
        descriptor: &Descriptor<T>,
        plan: &InvocationPlan<T>,
        templates: &[ArgumentTemplate],
        instance: &T,
    ) -> Result<Vec<Argument>, String> {
        templates
            .iter()
            .zip(plan.operation.parameters())
            .map(|(template, kind)| match template {
                ArgumentTemplate::Literal(argument) => Ok(argument.clone()),
                ArgumentTemplate::Reference { field, column } => {
                    let value = descriptor
                        .columns
                        .get(*column)
                        .and_then(|c| c.slot.as_ref())
                        .map(|slot| slot.read(instance))
                        .ok_or_else(|| format!("field '{}' has no value", field))?;
                    Argument::from_value(&value, *kind).map_err(|e| format!(":{}: {}", field, e))
                }
            })
            .collect()
    }

    /// Apply the field-level tolerance policy to the outcome of a nested call
    ///
    /// # Returns
    /// * `Ok(Some(value))` on success
    /// * `Ok(None)` for a tolerated failure, recorded against `path`
    /// * `Err(error)` for a structural failure, tagged with `path`
    pub(crate) fn tolerate<V>(
        &mut self,
        path: &str,
        result: MetadataResult<V>,
    ) -> MetadataResult<Option<V>> {
        let error = match result {
            Ok(value) => return Ok(Some(value)),
            Err(e) if e.is_structural() => return Err(e.at_path(path)),
            Err(e) => e,
        };

        let kind = match &error {
            MetadataError::Provider {
                source: ProviderError::Unsupported(_),
                ..
            } => DiagnosticKind::UnsupportedOperation,
            MetadataError::InvalidArgument { .. } => DiagnosticKind::ArgumentMismatch,
            _ => DiagnosticKind::InvocationFailed,
        };
        log::error!("Nested call at {} failed ({}): {}", path, kind, error);
        self.session
            .record(Diagnostic::new(path, kind, error.to_string()));
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{ColumnBinding, DescriptorRegistry, Directive, FieldSlot, Invocation};
    use crate::provider::{InMemoryProvider, Operation, ResultTable};
    use crate::session::Session;

    #[derive(Debug, Default)]
    struct Owner {
        cat: Option<String>,
        name: String,
        keys: Vec<Key>,
    }

    #[derive(Debug, Default)]
    struct Key {
        column: String,
    }

    impl Entity for Key {
        const NAME: &'static str = "key";

        fn directives() -> Vec<Directive<Self>> {
            vec![Directive::Column(ColumnBinding::new(
                "column",
                "COLUMN_NAME",
                FieldSlot::new(|k: &Key| &k.column, |k: &mut Key| &mut k.column),
            ))]
        }
    }

    impl Entity for Owner {
        const NAME: &'static str = "owner";

        fn directives() -> Vec<Directive<Self>> {
            vec![
                Directive::Column(
                    ColumnBinding::new(
                        "cat",
                        "TABLE_CAT",
                        FieldSlot::new(|o: &Owner| &o.cat, |o: &mut Owner| &mut o.cat),
                    )
                    .nillable(),
                ),
                Directive::Column(ColumnBinding::new(
                    "name",
                    "TABLE_NAME",
                    FieldSlot::new(|o: &Owner| &o.name, |o: &mut Owner| &mut o.name),
                )),
                Directive::Invoke(Invocation {
                    field: "keys",
                    operation: Operation::GetPrimaryKeys,
                    argument_sets: vec![
                        vec![":cat", "null", ":name"],
                        vec!["other", "null", ":name"],
                    ],
                    children: Box::new(Children::new(|o: &mut Owner| &mut o.keys)),
                }),
            ]
        }
    }

    fn owner() -> Owner {
        Owner {
            cat: Some("db1".to_string()),
            name: "t1".to_string(),
            keys: Vec::new(),
        }
    }

    fn keys(names: &[&str]) -> ResultTable {
        names.iter().fold(ResultTable::new(&["COLUMN_NAME"]), |table, name| {
            table.row(vec![(*name).into()])
        })
    }

    #[test]
    fn test_every_argument_set_is_called_and_appended() {
        let provider = InMemoryProvider::new()
            .respond_to(
                Operation::GetPrimaryKeys,
                vec!["db1".into(), Argument::Null, "t1".into()],
                keys(&["id"]),
            )
            .respond_to(
                Operation::GetPrimaryKeys,
                vec!["other".into(), Argument::Null, "t1".into()],
                keys(&["a", "b"]),
            );
        let registry = DescriptorRegistry::new();
        let mut session = Session::new();
        let mut binder = Binder::new(&provider, &registry, &mut session);

        let mut owner = owner();
        binder.expand_entity(&mut owner).unwrap();

        let columns: Vec<_> = owner.keys.iter().map(|k| k.column.as_str()).collect();
        assert_eq!(columns, vec!["id", "a", "b"]);
        assert_eq!(provider.call_count(Operation::GetPrimaryKeys), 2);
        assert_eq!(provider.open_cursors(), 0);
    }

    #[test]
    fn test_suppressed_invocation_makes_no_call() {
        let provider = InMemoryProvider::new().respond(Operation::GetPrimaryKeys, keys(&["id"]));
        let registry = DescriptorRegistry::new();
        let mut session = Session::new();
        session.suppression_mut().suppress(["owner/keys"]);

        let mut owner = owner();
        Binder::new(&provider, &registry, &mut session)
            .expand_entity(&mut owner)
            .unwrap();

        assert!(owner.keys.is_empty());
        assert_eq!(provider.total_calls(), 0);
    }

    #[test]
    fn test_failed_call_is_tolerated() {
        let provider = InMemoryProvider::new().fail(
            Operation::GetPrimaryKeys,
            ProviderError::Failed("permission denied".to_string()),
        );
        let registry = DescriptorRegistry::new();
        let mut session = Session::new();

        let mut owner = owner();
        Binder::new(&provider, &registry, &mut session)
            .expand_entity(&mut owner)
            .unwrap();

        assert!(owner.keys.is_empty());
        assert_eq!(session.diagnostics().len(), 2);
        assert!(session
            .diagnostics()
            .iter()
            .all(|d| d.kind == DiagnosticKind::InvocationFailed && d.path == "owner/keys"));
    }

    #[test]
    fn test_unsupported_operation_is_recorded() {
        let provider = InMemoryProvider::new().unsupport(Operation::GetPrimaryKeys);
        let registry = DescriptorRegistry::new();
        let mut session = Session::new();

        let mut owner = owner();
        Binder::new(&provider, &registry, &mut session)
            .expand_entity(&mut owner)
            .unwrap();

        assert_eq!(
            session.diagnostics()[0].kind,
            DiagnosticKind::UnsupportedOperation
        );
    }

    #[test]
    fn test_closed_connection_propagates() {
        let provider = InMemoryProvider::new();
        provider.close();
        let registry = DescriptorRegistry::new();
        let mut session = Session::new();

        let mut owner = owner();
        let err = Binder::new(&provider, &registry, &mut session)
            .expand_entity(&mut owner)
            .err()
            .unwrap();

        assert!(err.is_structural());
        assert!(err.to_string().contains("owner/keys"));
    }
}
