//! Test modules for the trie index.
//!
//! This module contains the crate-level tests that span more than one
//! component:
//! - Property-based tests of the trie against an ordered map model
//! - Configuration loading from files and the environment
//! - Completion and registry behaviour
//! - Error conversions and messages

pub mod test_utils;

// Re-export commonly used testing tools to simplify imports in test modules
pub use test_utils::TestFixture;
