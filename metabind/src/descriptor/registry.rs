// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Descriptor registry
//!
//! Caches the validated [`Descriptor`] of every entity type the binder has
//! touched. Descriptors are built and validated on first lookup and never
//! change afterwards, so the cache is read-mostly: lookups take a shared
//! read lock and only a first-time build takes the write lock.

use super::{Descriptor, Entity};
use crate::error::{MetadataError, MetadataResult};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

static GLOBAL: Lazy<DescriptorRegistry> = Lazy::new(DescriptorRegistry::new);

type CachedDescriptor = Arc<dyn Any + Send + Sync>;

/// Compute-once cache of entity descriptors
#[derive(Default)]
pub struct DescriptorRegistry {
    /// Validated descriptors keyed by entity type
    cache: RwLock<HashMap<TypeId, CachedDescriptor>>,
}

impl DescriptorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry shared by every context that does not bring
    /// its own.
    pub fn global() -> &'static DescriptorRegistry {
        &GLOBAL
    }

    /// Get the descriptor of `T`, building and validating it on first use
    ///
    /// # Returns
    /// * `Ok(Arc<Descriptor<T>>)` - the cached descriptor
    /// * `Err(MetadataError::InvalidDescriptor)` if `T` declares malformed
    ///   directives. Invalid descriptors are not cached; every lookup
    ///   reports the same error.
    pub fn descriptor<T: Entity>(&self) -> MetadataResult<Arc<Descriptor<T>>> {
        let key = TypeId::of::<T>();
        if let Some(cached) = self.cache.read().get(&key) {
            return downcast::<T>(Arc::clone(cached));
        }

        // Built outside the lock: building a descriptor never touches the registry.
        let built: CachedDescriptor = Arc::new(Descriptor::<T>::build()?);
        let cached = {
            let mut cache = self.cache.write();
            Arc::clone(cache.entry(key).or_insert_with(|| {
                log::debug!("Cached descriptor for entity '{}'", T::NAME);
                built
            }))
        };
        downcast::<T>(cached)
    }

    pub fn is_cached<T: Entity>(&self) -> bool {
        self.cache.read().contains_key(&TypeId::of::<T>())
    }

    /// Number of cached descriptors
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }

    pub fn clear(&self) {
        self.cache.write().clear();
    }
}

fn downcast<T: Entity>(cached: CachedDescriptor) -> MetadataResult<Arc<Descriptor<T>>> {
    cached
        .downcast::<Descriptor<T>>()
        .map_err(|_| MetadataError::InvalidDescriptor {
            entity: T::NAME,
            reason: "cached descriptor has a different type".to_string(),
        })
}
