//! Vocabulary configuration module.
//!
//! The vocabulary is the set of literals fed into the completion index. It
//! can be listed inline in the configuration, read from a plain text file
//! with one literal per line, or both.

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Vocabulary configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct VocabularyConfig {
    /// Literals listed directly in the configuration
    pub literals: Vec<String>,

    /// Optional file with one literal per line; blank lines and `#` comments are skipped
    pub file: Option<PathBuf>,
}

impl VocabularyConfig {
    /// Collects the inline literals followed by those read from `file`.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<String>)` - Every configured literal, in declaration order
    /// * `Err(ConfigError)` - If the vocabulary file cannot be read
    pub fn load_literals(&self) -> ConfigResult<Vec<String>> {
        let mut literals = self.literals.clone();

        if let Some(path) = &self.file {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.clone()));
            }

            let contents = std::fs::read_to_string(path)
                .map_err(|e| ConfigError::FileReadError(format!("{}: {e}", path.display())))?;

            let before = literals.len();
            literals.extend(
                contents
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty() && !line.starts_with('#'))
                    .map(str::to_owned),
            );

            tracing::debug!(
                path = %path.display(),
                count = literals.len() - before,
                "Vocabulary file read"
            );
        }

        Ok(literals)
    }
}

impl Validate for VocabularyConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.literals.iter().any(|literal| literal.is_empty()) {
            return Err(ConfigError::ValidationError(
                "vocabulary literals cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
