//! Trie Index Library
//!
//! This library contains a string-keyed trie with prefix queries and
//! fail-fast cursors, and the completion layer built on it. The binary
//! crate loads a vocabulary from configuration and answers completion
//! queries, but every component can be used on its own.
//!
//! # Architecture
//!
//! - [`data_structures::trie`]: the container itself
//! - [`completion`]: suggestion lists for partially typed arguments
//! - [`config`]: layered configuration (defaults, file, environment)
//! - [`error`]: error types shared by the layers

pub mod completion;
pub mod config;
pub mod data_structures;
pub mod error;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

use error::{TrieIndexError, TrieIndexResult};
use tracing_subscriber::EnvFilter;

/// Version information for the trie index.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the logging system.
///
/// `RUST_LOG` takes precedence over the configured level when set.
///
/// # Arguments
///
/// * `log` - Level, format and source location settings
pub fn init_logging(log: &config::LogConfig) -> TrieIndexResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(log.source_location)
        .with_line_number(log.source_location)
        .with_writer(std::io::stderr);

    let result = if log.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    result.map_err(|e| TrieIndexError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}
