//! Data structures for the trie index.
//!
//! This module contains the in-process containers that back lookup and
//! completion. All implementations share the crate-wide conventions:
//! - No unsafe code
//! - Explicit `Result` returns for every fallible operation
//! - Single-owner mutation; callers synchronise externally when sharing

pub mod trie;

// Re-export common data structures
pub use trie::{Cursor, Trie, TrieError, TrieResult};
