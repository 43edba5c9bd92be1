//! Tab-completion on top of the trie.
//!
//! A [`Completion`] turns a partially typed argument into the list of known
//! literals it could expand to. [`CachedCompletion`] indexes a fixed set of
//! literals in a [`Trie`](crate::data_structures::Trie) and answers with a
//! prefix query; case folding and truncation happen here, never in the trie.
//!
//! # Example
//!
//! ```
//! use trie_index_lib::completion::{CachedCompletion, Completion};
//! use trie_index_lib::config::CompletionConfig;
//!
//! let completion = CachedCompletion::new(
//!     ["arg", "argument", "another argument"],
//!     &CompletionConfig::default(),
//! );
//!
//! assert_eq!(completion.complete("argu"), vec!["argument"]);
//! assert_eq!(completion.complete("a").len(), 3);
//! assert!(completion.complete("non-existent").is_empty());
//! ```

mod cached;
mod registry;

use std::fmt::Debug;
use std::sync::Arc;

use once_cell::sync::Lazy;

pub use cached::CachedCompletion;
pub use registry::{CompletionRegistry, SharedRegistry};

/// Produces suggestions for a partially typed argument.
pub trait Completion: Send + Sync + Debug {
    /// Returns the literals `argument` may complete to.
    ///
    /// # Arguments
    ///
    /// * `argument` - The text typed so far; may be empty.
    fn complete(&self, argument: &str) -> Vec<String>;
}

/// A completion that never suggests anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyCompletion;

impl Completion for EmptyCompletion {
    fn complete(&self, _argument: &str) -> Vec<String> {
        Vec::new()
    }
}

/// Shared instance of [`EmptyCompletion`], used for unknown completions.
pub static NONE: Lazy<Arc<dyn Completion>> = Lazy::new(|| Arc::new(EmptyCompletion));
