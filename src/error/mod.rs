//! Error module for the trie index.
//!
//! Every layer reports failures through an explicit error enum; this module
//! gathers them under [`TrieIndexError`] so the binary can propagate them with
//! `?` and log them in one place.

use thiserror::Error;

pub mod config;

pub use crate::data_structures::trie::TrieError;

/// Result type alias used throughout the trie index.
pub type TrieIndexResult<T> = Result<T, TrieIndexError>;

/// Core error enum for the trie index.
#[derive(Error, Debug)]
pub enum TrieIndexError {
    /// Errors occurring during configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Errors raised by trie operations.
    #[error("Trie error: {0}")]
    Trie(#[from] TrieError),

    /// IO errors that may occur during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Custom error with message for cases where specific error types are not defined.
    #[error("{0}")]
    Custom(String),
}
