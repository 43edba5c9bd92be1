//! Views, iterators and cursors over a [`Trie`].
//!
//! All traversals share the same lazy walk: a deque seeded with the root's
//! children, where each node taken from the back pushes its own children
//! before it is yielded (if keyed) or skipped (if not). Nothing beyond the
//! pending frontier is materialised.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use super::node::{Arena, NodeId, ROOT};
use super::{Trie, TrieError, TrieResult};

/// Pending frontier of a traversal.
#[derive(Debug, Clone)]
struct Traversal {
    queue: VecDeque<NodeId>,
}

impl Traversal {
    fn new<V>(arena: &Arena<V>) -> Self {
        Self {
            queue: arena[ROOT].children.iter().collect(),
        }
    }

    fn is_exhausted(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns the next keyed node.
    fn advance<V>(&mut self, arena: &Arena<V>) -> Option<NodeId> {
        while let Some(id) = self.queue.pop_back() {
            let node = &arena[id];
            self.queue.extend(node.children.iter());
            if node.entry.is_some() {
                return Some(id);
            }
        }
        None
    }
}

/// Iterator over the entries of a [`Trie`].
///
/// Created by [`Trie::iter`] or [`Entries::iter`].
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    arena: &'a Arena<V>,
    traversal: Traversal,
    remaining: usize,
}

impl<'a, V> Iter<'a, V> {
    pub(super) fn new(trie: &'a Trie<V>) -> Self {
        Self {
            arena: &trie.arena,
            traversal: Traversal::new(&trie.arena),
            remaining: trie.size,
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        let id = self.traversal.advance(arena)?;
        self.remaining -= 1;
        arena[id].key_value()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}

/// Iterator over the keys of a [`Trie`].
#[derive(Debug, Clone)]
pub struct KeyIter<'a, V> {
    inner: Iter<'a, V>,
}

impl<'a, V> Iterator for KeyIter<'a, V> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for KeyIter<'_, V> {}

impl<V> FusedIterator for KeyIter<'_, V> {}

/// Iterator over the values of a [`Trie`].
#[derive(Debug, Clone)]
pub struct ValueIter<'a, V> {
    inner: Iter<'a, V>,
}

impl<'a, V> Iterator for ValueIter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for ValueIter<'_, V> {}

impl<V> FusedIterator for ValueIter<'_, V> {}

macro_rules! view {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $name<'a, V> {
            trie: &'a Trie<V>,
        }

        impl<'a, V> $name<'a, V> {
            pub(super) fn new(trie: &'a Trie<V>) -> Self {
                Self { trie }
            }

            /// Number of entries in the underlying trie.
            pub fn len(&self) -> usize {
                self.trie.len()
            }

            /// Whether the underlying trie is empty.
            pub fn is_empty(&self) -> bool {
                self.trie.is_empty()
            }
        }

        impl<V> Clone for $name<'_, V> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<V> Copy for $name<'_, V> {}
    };
}

view! {
    /// Live view of the entries of a [`Trie`], created by [`Trie::entries`].
    Entries
}

view! {
    /// Live view of the keys of a [`Trie`], created by [`Trie::keys`].
    Keys
}

view! {
    /// Live view of the values of a [`Trie`], created by [`Trie::values`].
    Values
}

impl<'a, V> Entries<'a, V> {
    /// Iterates the entries.
    pub fn iter(&self) -> Iter<'a, V> {
        Iter::new(self.trie)
    }

    /// Whether `key` is stored and maps to `value`.
    pub fn contains(&self, key: &str, value: &V) -> bool
    where
        V: PartialEq,
    {
        matches!(self.trie.get(key), Ok(Some(stored)) if stored == value)
    }
}

impl<'a, V> Keys<'a, V> {
    /// Iterates the keys.
    pub fn iter(&self) -> KeyIter<'a, V> {
        KeyIter {
            inner: Iter::new(self.trie),
        }
    }

    /// Whether `key` is stored. The empty key is never stored.
    pub fn contains(&self, key: &str) -> bool {
        self.trie.contains_key(key).unwrap_or(false)
    }
}

impl<'a, V> Values<'a, V> {
    /// Iterates the values.
    pub fn iter(&self) -> ValueIter<'a, V> {
        ValueIter {
            inner: Iter::new(self.trie),
        }
    }

    /// Whether any key maps to `value`.
    pub fn contains(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.iter().any(|stored| stored == value)
    }
}

impl<'a, V> IntoIterator for Entries<'a, V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, V> IntoIterator for Keys<'a, V> {
    type Item = &'a str;
    type IntoIter = KeyIter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, V> IntoIterator for Values<'a, V> {
    type Item = &'a V;
    type IntoIter = ValueIter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Fail-fast cursor over the entries of a [`Trie`].
///
/// A cursor does not borrow the trie between calls; each call takes the
/// trie it was created from. It records the trie's modification count and
/// refuses to continue once the trie has been modified by anything but
/// [`Cursor::remove`]. Passing any other trie, clones included, fails the
/// same way.
#[derive(Debug, Clone)]
pub struct Cursor {
    owner: u64,
    expected: u64,
    traversal: Traversal,
    returned: Option<NodeId>,
}

impl Cursor {
    pub(super) fn new<V>(trie: &Trie<V>) -> Self {
        Self {
            owner: trie.id,
            expected: trie.modifications,
            traversal: Traversal::new(&trie.arena),
            returned: None,
        }
    }

    /// Whether another entry remains.
    pub fn has_next(&self) -> bool {
        !self.traversal.is_exhausted()
    }

    /// Advances to the next entry.
    ///
    /// # Errors
    ///
    /// * `TrieError::ConcurrentModification` - If `trie` changed since this cursor last synchronised.
    /// * `TrieError::NoSuchElement` - If every entry has been visited.
    pub fn next_entry<'a, V>(&mut self, trie: &'a Trie<V>) -> TrieResult<(&'a str, &'a V)> {
        let id = self.advance(trie)?;
        trie.arena[id].key_value().ok_or(TrieError::NoSuchElement)
    }

    /// Advances to the next entry and returns its key.
    pub fn next_key<'a, V>(&mut self, trie: &'a Trie<V>) -> TrieResult<&'a str> {
        self.next_entry(trie).map(|(key, _)| key)
    }

    /// Advances to the next entry and returns its value.
    pub fn next_value<'a, V>(&mut self, trie: &'a Trie<V>) -> TrieResult<&'a V> {
        self.next_entry(trie).map(|(_, value)| value)
    }

    /// Removes the entry most recently returned by this cursor.
    ///
    /// The cursor stays valid afterwards.
    ///
    /// # Errors
    ///
    /// * `TrieError::ConcurrentModification` - If `trie` changed since this cursor last synchronised.
    /// * `TrieError::IllegalState` - If no entry was returned since creation or the last removal.
    pub fn remove<V>(&mut self, trie: &mut Trie<V>) -> TrieResult<V> {
        self.check(trie)?;
        let id = self.returned.take().ok_or(TrieError::IllegalState)?;
        let value = trie.remove_node(id).ok_or(TrieError::IllegalState)?;
        self.expected = trie.modifications;
        Ok(value)
    }

    pub(super) fn advance<V>(&mut self, trie: &Trie<V>) -> TrieResult<NodeId> {
        self.check(trie)?;
        let id = self
            .traversal
            .advance(&trie.arena)
            .ok_or(TrieError::NoSuchElement)?;
        self.returned = Some(id);
        Ok(id)
    }

    /// Accepts a removal the owning trie performed on the current entry.
    pub(super) fn resync<V>(&mut self, trie: &Trie<V>) {
        self.expected = trie.modifications;
        self.returned = None;
    }

    fn check<V>(&self, trie: &Trie<V>) -> TrieResult<()> {
        if self.owner == trie.id && self.expected == trie.modifications {
            Ok(())
        } else {
            Err(TrieError::ConcurrentModification)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn sample() -> Trie<u32> {
        let mut trie = Trie::new();
        for (value, key) in ["to", "tea", "ted", "ten", "i", "in", "inn", "ß"].iter().enumerate() {
            trie.put(key, value as u32).unwrap();
        }
        trie
    }

    #[test]
    fn test_iter_visits_every_entry_once() {
        let trie = sample();
        let keys: Vec<&str> = trie.keys().iter().collect();
        let unique: BTreeSet<&str> = keys.iter().copied().collect();

        assert_eq!(keys.len(), 8);
        assert_eq!(unique.len(), 8);
        assert!(unique.contains("ß"));
        assert_eq!(trie.iter().len(), 8);
        assert_eq!(trie.values().iter().sum::<u32>(), (0..8).sum::<u32>());
    }

    #[test]
    fn test_iter_order_is_deterministic() {
        let (first, second) = (sample(), sample());
        let a: Vec<&str> = first.keys().iter().collect();
        let b: Vec<&str> = (&second).into_iter().map(|(key, _)| key).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_views_reflect_live_state() {
        let mut trie = sample();
        assert_eq!(trie.keys().len(), 8);

        trie.remove("tea").unwrap();
        let keys = trie.keys();
        assert_eq!(keys.len(), 7);
        assert!(!keys.contains("tea"));
        assert!(keys.contains("ted"));
        assert!(!keys.contains(""));

        let entries = trie.entries();
        assert!(entries.contains("to", &0));
        assert!(!entries.contains("to", &1));
        assert_eq!(entries.into_iter().count(), 7);

        let values = trie.values();
        assert!(values.contains(&7));
        assert!(!values.contains(&1));
    }

    #[test]
    fn test_empty_trie_iteration() {
        let trie: Trie<u32> = Trie::new();
        assert_eq!(trie.iter().next(), None);

        let mut cursor = trie.cursor();
        assert!(!cursor.has_next());
        assert_eq!(cursor.next_entry(&trie), Err(TrieError::NoSuchElement));
    }

    #[test]
    fn test_cursor_walks_all_entries() {
        let trie = sample();
        let mut cursor = trie.cursor();
        let mut seen = BTreeSet::new();

        while cursor.has_next() {
            seen.insert(cursor.next_key(&trie).unwrap());
        }

        assert_eq!(seen.len(), trie.len());
        assert_eq!(cursor.next_value(&trie), Err(TrieError::NoSuchElement));
    }

    #[test]
    fn test_cursor_fails_after_put() {
        let mut trie = sample();
        let mut cursor = trie.cursor();

        trie.put("new", 9).unwrap();
        assert_eq!(
            cursor.next_entry(&trie),
            Err(TrieError::ConcurrentModification)
        );
    }

    #[test]
    fn test_cursor_fails_after_remove_and_clear() {
        let mut trie = sample();
        let mut cursor = trie.cursor();
        cursor.next_key(&trie).unwrap();

        trie.remove("inn").unwrap();
        assert_eq!(cursor.remove(&mut trie), Err(TrieError::ConcurrentModification));

        let mut cursor = trie.cursor();
        trie.clear();
        assert_eq!(cursor.next_key(&trie), Err(TrieError::ConcurrentModification));
    }

    #[test]
    fn test_cursor_rejects_other_trie() {
        let mut owner = sample();
        let mut other: Trie<u32> = Trie::new();
        for _ in 0..owner.modifications {
            other.put("x", 0).unwrap();
        }
        assert_eq!(owner.modifications, other.modifications);

        let mut cursor = owner.cursor();
        assert_eq!(cursor.next_key(&other), Err(TrieError::ConcurrentModification));

        cursor.next_key(&owner).unwrap();
        assert_eq!(cursor.remove(&mut other), Err(TrieError::ConcurrentModification));

        let mut copy = owner.clone();
        assert_eq!(cursor.next_key(&copy), Err(TrieError::ConcurrentModification));
        assert_eq!(cursor.remove(&mut copy), Err(TrieError::ConcurrentModification));
        assert!(cursor.remove(&mut owner).is_ok());
    }

    #[test]
    fn test_cursor_remove_requires_current_entry() {
        let mut trie = sample();
        let mut cursor = trie.cursor();

        assert_eq!(cursor.remove(&mut trie), Err(TrieError::IllegalState));

        cursor.next_entry(&trie).unwrap();
        assert!(cursor.remove(&mut trie).is_ok());
        assert_eq!(cursor.remove(&mut trie), Err(TrieError::IllegalState));
        assert_eq!(trie.len(), 7);
    }

    #[test]
    fn test_cursor_remove_keeps_cursor_valid() {
        let mut trie = sample();
        let mut cursor = trie.cursor();
        let mut removed = 0;

        while cursor.has_next() {
            let key = cursor.next_key(&trie).unwrap();
            if key.starts_with('t') {
                cursor.remove(&mut trie).unwrap();
                removed += 1;
            }
        }

        assert_eq!(removed, 4);
        assert_eq!(trie.len(), 4);
        assert!(trie.prefix_keys("t").is_empty());
        // root, i, in, inn, ß
        assert_eq!(trie.node_count(), 5);
    }

    #[test]
    fn test_cursor_sweep_empties_trie() {
        let mut trie = sample();
        let mut cursor = trie.cursor();

        while cursor.has_next() {
            cursor.next_entry(&trie).unwrap();
            cursor.remove(&mut trie).unwrap();
        }

        assert!(trie.is_empty());
        assert_eq!(trie.node_count(), 1);
    }

    #[test]
    fn test_cursor_removal_of_interior_keyed_node() {
        let mut trie = Trie::new();
        trie.put("in", 1).unwrap();
        trie.put("inn", 2).unwrap();

        let mut cursor = trie.cursor();
        assert_eq!(cursor.next_key(&trie).unwrap(), "in");
        assert_eq!(cursor.remove(&mut trie).unwrap(), 1);
        assert_eq!(cursor.next_key(&trie).unwrap(), "inn");
        assert!(!cursor.has_next());
        assert_eq!(trie.prefix_keys("i"), vec!["inn"]);
    }
}
