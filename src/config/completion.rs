//! Completion configuration module.
//!
//! This module defines how suggestions are produced from the indexed
//! literals: case handling and result truncation.

use super::{ConfigResult, Validate};
use serde::{Deserialize, Serialize};

/// Completion configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CompletionConfig {
    /// Whether the typed argument must match the literal's case exactly
    pub case_sensitive: bool,

    /// Maximum number of suggestions returned (0 for unbounded)
    pub max_results: usize,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            max_results: 0,
        }
    }
}

impl CompletionConfig {
    /// Sets whether matching is case-sensitive.
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Sets the maximum number of suggestions (0 for unbounded).
    pub fn max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }
}

impl Validate for CompletionConfig {
    fn validate(&self) -> ConfigResult<()> {
        // Every combination of values is meaningful
        Ok(())
    }
}
