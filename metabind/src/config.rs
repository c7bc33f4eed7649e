// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Extraction configuration

use crate::error::{MetadataError, MetadataResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables of one extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Paths (`"<entity>/<field>"`) skipped by the binder
    pub suppressed_paths: Vec<String>,

    /// Synthesize a placeholder catalog or schema where the source reports none
    pub nonempty: bool,

    /// Record row labels no directive consumes as diagnostics
    pub report_unknown_labels: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            suppressed_paths: Vec::new(),
            nonempty: true,
            report_unknown_labels: false,
        }
    }
}

impl ExtractionConfig {
    pub fn from_json_str(json: &str) -> MetadataResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| MetadataError::Config(format!("invalid extraction config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> MetadataResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            MetadataError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&content)
    }

    /// Add suppressed paths, skipping ones already present.
    pub fn suppress<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for path in paths {
            let path = path.into();
            if !self.suppressed_paths.contains(&path) {
                self.suppressed_paths.push(path);
            }
        }
        self
    }

    /// Every suppressed path must have the `<entity>/<field>` shape.
    pub fn validate(&self) -> MetadataResult<()> {
        for path in &self.suppressed_paths {
            match path.split_once('/') {
                Some((entity, field))
                    if !entity.is_empty() && !field.is_empty() && !field.contains('/') => {}
                _ => {
                    return Err(MetadataError::Config(format!(
                        "suppressed path '{}' is not of the form <entity>/<field>",
                        path
                    )))
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExtractionConfig::from_json_str("{}").unwrap();
        assert!(config.nonempty);
        assert!(!config.report_unknown_labels);
        assert!(config.suppressed_paths.is_empty());
    }

    #[test]
    fn test_parse_full_document() {
        let config = ExtractionConfig::from_json_str(
            r#"{
                "suppressed_paths": ["table/indexInfo", "schema/functions"],
                "nonempty": false,
                "report_unknown_labels": true
            }"#,
        )
        .unwrap();
        assert_eq!(config.suppressed_paths.len(), 2);
        assert!(!config.nonempty);
        assert!(config.report_unknown_labels);
    }

    #[test]
    fn test_malformed_path_rejected() {
        let err = ExtractionConfig::from_json_str(r#"{"suppressed_paths": ["columns"]}"#)
            .err()
            .unwrap();
        assert!(matches!(err, MetadataError::Config(_)));
    }

    #[test]
    fn test_suppress_deduplicates() {
        let config = ExtractionConfig::default()
            .suppress(["table/columns", "table/columns", "catalog/schemas"]);
        assert_eq!(config.suppressed_paths, vec!["table/columns", "catalog/schemas"]);
    }
}
