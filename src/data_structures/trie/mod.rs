//! String-keyed trie with prefix queries and fail-fast cursors.
//!
//! Lookup, insertion and removal cost is proportional to the length of the
//! key rather than to the number of stored entries. Every key is spelled by
//! the path of edge characters from the root to its terminal node; keys that
//! share a prefix share the nodes of that prefix.
//!
//! # Example
//!
//! ```
//! use trie_index_lib::data_structures::trie::Trie;
//!
//! let mut trie = Trie::new();
//! trie.put("cat", 1).unwrap();
//! trie.put("car", 2).unwrap();
//! trie.put("dog", 3).unwrap();
//!
//! assert_eq!(trie.get("cat").unwrap(), Some(&1));
//! assert_eq!(trie.len(), 3);
//!
//! let mut keys = trie.prefix_keys("ca");
//! keys.sort_unstable();
//! assert_eq!(keys, vec!["car", "cat"]);
//! ```
//!
//! # Mutation during iteration
//!
//! Borrowing iterators ([`Iter`], [`KeyIter`], [`ValueIter`]) hold a shared
//! borrow, so the trie cannot change underneath them. When entries must be
//! removed mid-traversal, use a [`Cursor`]: it keeps no borrow between calls
//! and fails fast with [`TrieError::ConcurrentModification`] once the trie is
//! modified by anything other than the cursor itself.
//!
//! ```
//! use trie_index_lib::data_structures::trie::{Trie, TrieError};
//!
//! let mut trie = Trie::new();
//! trie.put("alpha", 1).unwrap();
//! trie.put("beta", 2).unwrap();
//!
//! let mut cursor = trie.cursor();
//! let (key, _) = cursor.next_entry(&trie).unwrap();
//! let key = key.to_owned();
//! cursor.remove(&mut trie).unwrap();
//! assert!(!trie.contains_key(&key).unwrap());
//!
//! trie.put("gamma", 3).unwrap();
//! assert_eq!(cursor.next_key(&trie), Err(TrieError::ConcurrentModification));
//! ```

mod error;
mod iter;
mod node;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

pub use error::TrieError;
pub use iter::{Cursor, Entries, Iter, KeyIter, Keys, ValueIter, Values};
use node::{Arena, NodeId, ROOT};

/// Result type for trie operations
pub type TrieResult<T> = Result<T, TrieError>;

/// A mutable map from strings to values, organised by shared prefixes.
///
/// Children of a node are split between a directly indexed array for
/// printable ASCII characters and a hash map for every other character; both
/// are allocated on first use. Removing a key prunes every node left without
/// a key or children, so memory tracks the surviving keys only.
///
/// Traversal order is depth-first and deterministic for a given structure,
/// but otherwise unspecified. Keys are compared exactly; the trie performs no
/// case folding or normalisation.
pub struct Trie<V> {
    /// Identity checked by cursors; fresh for every trie and every clone.
    id: u64,

    /// Node storage; the root sentinel is always [`ROOT`].
    arena: Arena<V>,

    /// Number of stored keys.
    size: usize,

    /// Bumped on every structural modification.
    modifications: u64,
}

impl<V> Trie<V> {
    /// Creates a new empty `Trie`.
    pub fn new() -> Self {
        Self {
            id: next_id(),
            arena: Arena::new(),
            size: 0,
            modifications: 0,
        }
    }

    /// Returns the number of keys in the trie.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the trie holds no keys.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Retrieves the value associated with a key.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to look up.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(&V))` - The value stored under `key`.
    /// * `Ok(None)` - If `key` is not stored.
    /// * `Err(TrieError::InvalidKey)` - If `key` is empty.
    pub fn get<K>(&self, key: K) -> TrieResult<Option<&V>>
    where
        K: AsRef<str>,
    {
        let found = self.find(key.as_ref())?;
        Ok(found.and_then(|id| self.arena[id].key_value()).map(|(_, value)| value))
    }

    /// Retrieves a mutable reference to the value associated with a key.
    ///
    /// Updating a value in place is not a structural modification and does
    /// not invalidate cursors.
    pub fn get_mut<K>(&mut self, key: K) -> TrieResult<Option<&mut V>>
    where
        K: AsRef<str>,
    {
        let Some(id) = self.find(key.as_ref())? else {
            return Ok(None);
        };
        Ok(self.arena[id].entry.as_mut().map(|(_, value)| value))
    }

    /// Checks if a key exists in the trie.
    pub fn contains_key<K>(&self, key: K) -> TrieResult<bool>
    where
        K: AsRef<str>,
    {
        Ok(self.find(key.as_ref())?.is_some())
    }

    /// Checks if any key maps to `value`.
    ///
    /// Values are not indexed, so this walks the whole trie.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.values().iter().any(|stored| stored == value)
    }

    /// Inserts a key-value pair into the trie.
    ///
    /// Missing nodes along the path of `key` are created one per character.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to insert.
    /// * `value` - The value to associate with the key.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(V))` - The value previously stored under `key`.
    /// * `Ok(None)` - If `key` was not stored before.
    /// * `Err(TrieError::InvalidKey)` - If `key` is empty.
    pub fn put<K>(&mut self, key: K, value: V) -> TrieResult<Option<V>>
    where
        K: AsRef<str>,
    {
        let key = validate(key.as_ref())?;

        let mut id = ROOT;
        for character in key.chars() {
            id = self.arena.child_or_insert(id, character);
        }

        let node = &mut self.arena[id];
        let previous = match &mut node.entry {
            Some((_, stored)) => Some(std::mem::replace(stored, value)),
            None => {
                node.entry = Some((key.to_owned(), value));
                self.size += 1;
                None
            }
        };

        self.modifications += 1;
        Ok(previous)
    }

    /// Inserts every pair yielded by `entries`.
    ///
    /// Stops at the first invalid key; pairs inserted before it are kept.
    pub fn put_all<I, K>(&mut self, entries: I) -> TrieResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
    {
        for (key, value) in entries {
            self.put(key, value)?;
        }
        Ok(())
    }

    /// Removes a key from the trie.
    ///
    /// Nodes left without a key or children are unlinked, walking upward
    /// until a node that still has a key or other children, or the root.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(V))` - The value that was stored under `key`.
    /// * `Ok(None)` - If `key` was not stored; the trie is left untouched.
    /// * `Err(TrieError::InvalidKey)` - If `key` is empty.
    pub fn remove<K>(&mut self, key: K) -> TrieResult<Option<V>>
    where
        K: AsRef<str>,
    {
        let found = self.find(key.as_ref())?;
        Ok(found.and_then(|id| self.remove_node(id)))
    }

    /// Removes `key` only if it currently maps to `value`.
    ///
    /// Returns `true` if the entry was removed.
    pub fn remove_entry<K>(&mut self, key: K, value: &V) -> TrieResult<bool>
    where
        K: AsRef<str>,
        V: PartialEq,
    {
        let Some(id) = self.find(key.as_ref())? else {
            return Ok(false);
        };

        let matches = matches!(self.arena[id].key_value(), Some((_, stored)) if stored == value);
        Ok(matches && self.remove_node(id).is_some())
    }

    /// Keeps only the entries for which `keep` returns `true`.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str, &mut V) -> bool,
    {
        let mut cursor = self.cursor();
        while let Ok(id) = cursor.advance(self) {
            let retained = match &mut self.arena[id].entry {
                Some((key, value)) => keep(key, value),
                None => true,
            };

            if !retained {
                self.remove_node(id);
                cursor.resync(self);
            }
        }
    }

    /// Removes every entry.
    ///
    /// The whole node structure is replaced by a fresh root.
    pub fn clear(&mut self) {
        self.arena = Arena::new();
        self.size = 0;
        self.modifications += 1;
    }

    /// Returns the entries whose keys start with `prefix`.
    ///
    /// An empty prefix selects every entry. A prefix that leads nowhere
    /// yields an empty collection.
    pub fn prefix_entries(&self, prefix: &str) -> Vec<(&str, &V)> {
        self.prefixed(prefix, |key, value| (key, value))
    }

    /// Returns the keys that start with `prefix`.
    pub fn prefix_keys(&self, prefix: &str) -> Vec<&str> {
        self.prefixed(prefix, |key, _| key)
    }

    /// Returns the values whose keys start with `prefix`.
    pub fn prefix_values(&self, prefix: &str) -> Vec<&V> {
        self.prefixed(prefix, |_, value| value)
    }

    /// Returns a live view of the entries.
    pub fn entries(&self) -> Entries<'_, V> {
        Entries::new(self)
    }

    /// Returns a live view of the keys.
    pub fn keys(&self) -> Keys<'_, V> {
        Keys::new(self)
    }

    /// Returns a live view of the values.
    pub fn values(&self) -> Values<'_, V> {
        Values::new(self)
    }

    /// Returns an iterator over the entries.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(self)
    }

    /// Creates a fail-fast cursor positioned before the first entry.
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self)
    }

    /// Number of live nodes, root included.
    #[cfg(test)]
    pub(crate) fn node_count(&self) -> usize {
        self.arena.live()
    }

    fn descend(&self, path: &str) -> Option<NodeId> {
        path.chars()
            .try_fold(ROOT, |id, character| self.arena.child(id, character))
    }

    fn find(&self, key: &str) -> TrieResult<Option<NodeId>> {
        let key = validate(key)?;
        Ok(self
            .descend(key)
            .filter(|&id| self.arena[id].entry.is_some()))
    }

    /// Clears the entry held by `id` and prunes the path above it.
    fn remove_node(&mut self, id: NodeId) -> Option<V> {
        let (_, value) = self.arena[id].entry.take()?;

        let mut current = id;
        while current != ROOT && self.arena[current].is_prunable() {
            match self.arena.unlink(current) {
                Some(parent) => current = parent,
                None => break,
            }
        }

        self.size -= 1;
        self.modifications += 1;
        Some(value)
    }

    /// Depth-first collection of the subtree under `prefix`, pre-order.
    fn prefixed<'a, T, F>(&'a self, prefix: &str, project: F) -> Vec<T>
    where
        F: Fn(&'a str, &'a V) -> T,
    {
        let mut collected = Vec::new();
        let Some(start) = self.descend(prefix) else {
            return collected;
        };

        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            let node = &self.arena[id];
            if let Some((key, value)) = node.key_value() {
                collected.push(project(key, value));
            }

            // Reversed so the lowest character is visited first
            let mark = stack.len();
            stack.extend(node.children.iter());
            stack[mark..].reverse();
        }

        collected
    }
}

fn next_id() -> u64 {
    static NEXT_ID: AtomicU64 = AtomicU64::new(0);
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

fn validate(key: &str) -> TrieResult<&str> {
    if key.is_empty() {
        Err(TrieError::InvalidKey)
    } else {
        Ok(key)
    }
}

impl<V: Clone> Clone for Trie<V> {
    fn clone(&self) -> Self {
        Self {
            id: next_id(),
            arena: self.arena.clone(),
            size: self.size,
            modifications: self.modifications,
        }
    }
}

impl<V> Default for Trie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for Trie<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, V> IntoIterator for &'a Trie<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
