// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Binding engine
//!
//! The [`Binder`] turns provider rows into entities. For every row it
//! first binds the column directives of the entity (see `binder`), then
//! runs its invocation directives, which fetch and bind child rows
//! recursively (see `expander`). Binding is depth-first and synchronous:
//! at most one cursor is open per level of recursion and each is closed
//! before control returns to the parent level.

mod binder;
mod expander;

pub use binder::FieldStatus;
pub use expander::{Children, Populate};

use crate::descriptor::{Descriptor, DescriptorRegistry, Entity};
use crate::error::{MetadataError, MetadataResult};
use crate::provider::{dispatch, Argument, CursorGuard, MetadataProvider, Operation};
use crate::session::Session;

/// One binding pass over a provider, a descriptor registry and a session
pub struct Binder<'a> {
    provider: &'a dyn MetadataProvider,
    registry: &'a DescriptorRegistry,
    session: &'a mut Session,
}

impl<'a> Binder<'a> {
    pub fn new(
        provider: &'a dyn MetadataProvider,
        registry: &'a DescriptorRegistry,
        session: &'a mut Session,
    ) -> Self {
        Self {
            provider,
            registry,
            session,
        }
    }

    pub fn session(&self) -> &Session {
        self.session
    }

    /// Call `operation` and bind every returned row into `T`
    ///
    /// This is the top-level entry point: any failure of the call itself is
    /// returned as an error naming the operation. Failures of nested
    /// invocations are tolerated unless they are structural.
    pub fn fetch<T: Entity>(
        &mut self,
        operation: Operation,
        arguments: &[Argument],
    ) -> MetadataResult<Vec<T>> {
        let descriptor = self.registry.descriptor::<T>()?;
        let mut cursor = dispatch(self.provider, operation, arguments)?;
        self.bind_all(&descriptor, &mut cursor)
    }

    /// Like [`fetch`](Self::fetch), but with the field-level tolerance of a
    /// nested invocation: a non-structural failure is recorded against
    /// `path` and yields no rows.
    pub fn fetch_nested<T: Entity>(
        &mut self,
        path: &str,
        operation: Operation,
        arguments: &[Argument],
    ) -> MetadataResult<Vec<T>> {
        let result = self.fetch::<T>(operation, arguments);
        Ok(self.tolerate(path, result)?.unwrap_or_default())
    }

    /// Bind every remaining row of `cursor` into `T`, expanding each one.
    pub fn bind_cursor<T: Entity>(
        &mut self,
        cursor: &mut CursorGuard<'_>,
    ) -> MetadataResult<Vec<T>> {
        let descriptor = self.registry.descriptor::<T>()?;
        self.bind_all(&descriptor, cursor)
    }

    /// Run the invocation directives of an instance built outside a cursor.
    pub fn expand_entity<T: Entity>(&mut self, instance: &mut T) -> MetadataResult<()> {
        let descriptor = self.registry.descriptor::<T>()?;
        self.expand(&descriptor, instance)
    }

    pub(crate) fn bind_all<T: Entity>(
        &mut self,
        descriptor: &Descriptor<T>,
        cursor: &mut CursorGuard<'_>,
    ) -> MetadataResult<Vec<T>> {
        let operation = cursor.operation();
        self.report_unknown_labels(descriptor, &**cursor);

        let mut bound = Vec::new();
        while cursor
            .next_row()
            .map_err(|e| MetadataError::provider(operation, e))?
        {
            let mut instance = T::default();
            self.bind_row(descriptor, &**cursor, &mut instance);
            self.expand(descriptor, &mut instance)?;
            bound.push(instance);
        }
        log::debug!("Bound {} '{}' rows from {}", bound.len(), T::NAME, operation);
        Ok(bound)
    }
}
