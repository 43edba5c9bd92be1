//! Named completions.
//!
//! Command definitions refer to completions by name; the registry resolves
//! those names and falls back to [`NONE`](super::NONE) for unknown ones.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use super::{Completion, NONE};
use crate::data_structures::trie::{Trie, TrieResult};

/// A registry shared between threads.
///
/// The trie performs no locking of its own, so sharing goes through a
/// single lock around the whole registry.
pub type SharedRegistry = Arc<RwLock<CompletionRegistry>>;

/// Completions indexed by name.
#[derive(Debug, Default, Clone)]
pub struct CompletionRegistry {
    completions: Trie<Arc<dyn Completion>>,
}

impl CompletionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `completion` under `name`, returning the completion it replaced.
    ///
    /// # Errors
    ///
    /// * `TrieError::InvalidKey` - If `name` is empty.
    pub fn register<C>(
        &mut self,
        name: &str,
        completion: C,
    ) -> TrieResult<Option<Arc<dyn Completion>>>
    where
        C: Completion + 'static,
    {
        self.register_shared(name, Arc::new(completion))
    }

    /// Registers an already shared completion under `name`.
    pub fn register_shared(
        &mut self,
        name: &str,
        completion: Arc<dyn Completion>,
    ) -> TrieResult<Option<Arc<dyn Completion>>> {
        let replaced = self.completions.put(name, completion)?;
        debug!(name, replaced = replaced.is_some(), "Completion registered");
        Ok(replaced)
    }

    /// Removes the completion registered under `name`.
    pub fn unregister(&mut self, name: &str) -> TrieResult<Option<Arc<dyn Completion>>> {
        self.completions.remove(name)
    }

    /// Resolves `name`, falling back to the empty completion.
    pub fn get(&self, name: &str) -> Arc<dyn Completion> {
        match self.completions.get(name) {
            Ok(Some(completion)) => Arc::clone(completion),
            _ => Arc::clone(&*NONE),
        }
    }

    /// Whether a completion is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        matches!(self.completions.contains_key(name), Ok(true))
    }

    /// Registered names starting with `prefix`, sorted.
    pub fn names_with_prefix(&self, prefix: &str) -> Vec<&str> {
        let mut names = self.completions.prefix_keys(prefix);
        names.sort_unstable();
        names
    }

    /// Completes `argument` with the completion registered under `name`.
    pub fn complete(&self, name: &str, argument: &str) -> Vec<String> {
        self.get(name).complete(argument)
    }

    /// Number of registered completions.
    pub fn len(&self) -> usize {
        self.completions.len()
    }

    /// Whether no completion is registered.
    pub fn is_empty(&self) -> bool {
        self.completions.is_empty()
    }

    /// Moves the registry behind a lock for use from several threads.
    pub fn into_shared(self) -> SharedRegistry {
        Arc::new(RwLock::new(self))
    }
}
