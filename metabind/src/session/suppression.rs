// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Path suppression
//!
//! A suppressed path (`"table/columns"`, `"catalog/schemas"`) is skipped by
//! the binder: a suppressed column keeps its zero value and a suppressed
//! invocation never reaches the provider. Matching is exact string
//! equality; there is no wildcard or prefix form.

use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuppressionFilter {
    paths: BTreeSet<String>,
}

impl SuppressionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn suppress<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for path in paths {
            let path = path.into();
            log::debug!("Suppressing path '{}'", path);
            self.paths.insert(path);
        }
    }

    pub fn is_suppressed(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// Suppressed paths in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SuppressionFilter {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut filter = Self::new();
        filter.suppress(iter);
        filter
    }
}
