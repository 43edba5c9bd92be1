//! Test utilities and fixtures for the trie index.
//!
//! This module provides proptest strategies for keys and operation
//! sequences, and a fixture owning a temporary directory and any
//! environment variables a test sets.

use proptest::prelude::*;
use proptest::strategy::{BoxedStrategy, Strategy};
use std::path::PathBuf;
use tempfile::TempDir;

/// Maximum key length for generated test data.
const MAX_KEY_LENGTH: usize = 8;

/// Maximum number of operations in a generated sequence.
const MAX_OPERATIONS: usize = 64;

/// Create a temporary directory for test files.
pub fn create_test_dir() -> std::io::Result<TempDir> {
    tempfile::tempdir()
}

/// Generate a strategy for non-empty trie keys.
///
/// Keys are drawn mostly from a small alphabet so that generated keys share
/// prefixes, with occasional characters outside printable ASCII to exercise
/// the sparse children.
pub fn key_strategy() -> BoxedStrategy<String> {
    let character = prop_oneof![
        8 => prop::sample::select(vec!['a', 'b', 'c', ' ', '~']),
        1 => prop::sample::select(vec!['é', 'ß', '日', '\u{1F600}']),
    ];
    prop::collection::vec(character, 1..=MAX_KEY_LENGTH)
        .prop_map(|chars| chars.into_iter().collect::<String>())
        .boxed()
}

/// A single mutation applied to both a trie and its model.
#[derive(Debug, Clone)]
pub enum Operation {
    /// Insert or replace a key
    Put(String, u32),
    /// Remove a key
    Remove(String),
}

/// Generate a strategy for sequences of trie mutations.
pub fn operations_strategy() -> BoxedStrategy<Vec<Operation>> {
    let operation = prop_oneof![
        3 => (key_strategy(), any::<u32>()).prop_map(|(key, value)| Operation::Put(key, value)),
        2 => key_strategy().prop_map(Operation::Remove),
    ];
    prop::collection::vec(operation, 0..MAX_OPERATIONS).boxed()
}

/// Test fixture for tests touching the filesystem or the environment.
pub struct TestFixture {
    /// Temporary directory for test files
    pub temp_dir: TempDir,
    /// Vector of environment variables to cleanup after tests
    env_vars: Vec<String>,
}

impl TestFixture {
    /// Create a new test fixture.
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            temp_dir: create_test_dir()?,
            env_vars: Vec::new(),
        })
    }

    /// Set an environment variable for this test.
    ///
    /// The variable will be cleaned up when the fixture is dropped.
    pub fn set_env<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        let key = key.into();
        std::env::set_var(&key, value.into());
        self.env_vars.push(key);
    }

    /// Write `contents` to `name` inside the fixture directory.
    pub fn write_file<C: AsRef<[u8]>>(&self, name: &str, contents: C) -> std::io::Result<PathBuf> {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, contents)?;
        Ok(path)
    }
}

impl Drop for TestFixture {
    fn drop(&mut self) {
        for key in &self.env_vars {
            std::env::remove_var(key);
        }
    }
}
