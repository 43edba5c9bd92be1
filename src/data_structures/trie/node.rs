// Copyright (c) 2025 Trie Index Authors
//
// Licensed under the MIT License (LICENSE or https://opensource.org/licenses/MIT)

//! Node storage for the trie.
//!
//! Nodes live in an [`Arena`] and refer to each other through [`NodeId`]
//! handles. A node owns nothing but its payload; parent links are plain
//! handles used for upward navigation while pruning.

use std::ops::{Index, IndexMut};

use fnv::FnvBuildHasher;
use hashbrown::HashMap;

/// Handle of a node inside an [`Arena`].
pub(crate) type NodeId = usize;

/// The root sentinel always occupies the first slot.
pub(crate) const ROOT: NodeId = 0;

/// First character of the directly indexed fan-out range.
pub(crate) const DENSE_START: char = ' ';

/// Last character of the directly indexed fan-out range.
pub(crate) const DENSE_END: char = '~';

/// Number of directly indexed child slots (printable ASCII).
pub(crate) const DENSE_SLOTS: usize = DENSE_END as usize - DENSE_START as usize + 1;

type Dense = [Option<NodeId>; DENSE_SLOTS];
type Sparse = HashMap<char, NodeId, FnvBuildHasher>;

/// Slot of `character` in the dense fan-out, if it falls in the printable ASCII range.
fn dense_index(character: char) -> Option<usize> {
    (DENSE_START..=DENSE_END)
        .contains(&character)
        .then(|| character as usize - DENSE_START as usize)
}

/// Lazily allocated fan-out of a node.
///
/// Printable ASCII children are addressed directly through a fixed array,
/// everything else goes through a hash map. Either part is only allocated
/// once a child needs it.
#[derive(Debug, Clone, Default)]
pub(crate) enum Children {
    /// No child has been added yet.
    #[default]
    Empty,
    /// Only printable ASCII children.
    Dense(Box<Dense>),
    /// Only children outside the printable ASCII range.
    Sparse(Box<Sparse>),
    /// Children of both kinds.
    Mixed(Box<Dense>, Box<Sparse>),
}

impl Children {
    /// Returns the child reached through `character`.
    pub(crate) fn get(&self, character: char) -> Option<NodeId> {
        match dense_index(character) {
            Some(index) => match self {
                Children::Dense(dense) | Children::Mixed(dense, _) => dense[index],
                _ => None,
            },
            None => match self {
                Children::Sparse(sparse) | Children::Mixed(_, sparse) => {
                    sparse.get(&character).copied()
                }
                _ => None,
            },
        }
    }

    /// Links `id` under `character`, returning the child it displaced.
    pub(crate) fn insert(&mut self, character: char, id: NodeId) -> Option<NodeId> {
        match dense_index(character) {
            Some(index) => self.dense_mut()[index].replace(id),
            None => self.sparse_mut().insert(character, id),
        }
    }

    /// Unlinks the child reached through `character`.
    pub(crate) fn remove(&mut self, character: char) -> Option<NodeId> {
        match dense_index(character) {
            Some(index) => match self {
                Children::Dense(dense) | Children::Mixed(dense, _) => dense[index].take(),
                _ => None,
            },
            None => match self {
                Children::Sparse(sparse) | Children::Mixed(_, sparse) => {
                    sparse.remove(&character)
                }
                _ => None,
            },
        }
    }

    /// Iterates child handles: dense slots in ascending character order, then the sparse map.
    pub(crate) fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        let (dense, sparse) = match self {
            Children::Empty => (None, None),
            Children::Dense(dense) => (Some(dense), None),
            Children::Sparse(sparse) => (None, Some(sparse)),
            Children::Mixed(dense, sparse) => (Some(dense), Some(sparse)),
        };

        dense
            .into_iter()
            .flat_map(|dense| dense.iter().flatten().copied())
            .chain(sparse.into_iter().flat_map(|sparse| sparse.values().copied()))
    }

    fn dense_mut(&mut self) -> &mut Dense {
        *self = match std::mem::take(self) {
            Children::Empty => Children::Dense(Box::new([None; DENSE_SLOTS])),
            Children::Sparse(sparse) => Children::Mixed(Box::new([None; DENSE_SLOTS]), sparse),
            allocated => allocated,
        };

        match self {
            Children::Dense(dense) | Children::Mixed(dense, _) => &mut **dense,
            _ => unreachable!("dense fan-out was allocated above"),
        }
    }

    fn sparse_mut(&mut self) -> &mut Sparse {
        *self = match std::mem::take(self) {
            Children::Empty => Children::Sparse(Box::default()),
            Children::Dense(dense) => Children::Mixed(dense, Box::default()),
            allocated => allocated,
        };

        match self {
            Children::Sparse(sparse) | Children::Mixed(_, sparse) => &mut **sparse,
            _ => unreachable!("sparse fan-out was allocated above"),
        }
    }
}

/// A node in the trie.
///
/// Each node represents one character position along the keys passing
/// through it. Terminal nodes carry the complete key with its value.
#[derive(Debug, Clone)]
pub(crate) struct Node<V> {
    /// Edge label leading here from the parent; unused for the root.
    pub(crate) character: char,

    /// The stored key and its value, if this node terminates a key.
    pub(crate) entry: Option<(String, V)>,

    /// Handle of the owning parent; `None` only for the root.
    pub(crate) parent: Option<NodeId>,

    /// Outgoing edges.
    pub(crate) children: Children,

    /// Number of occupied slots in `children`.
    pub(crate) child_count: usize,
}

impl<V> Node<V> {
    fn root() -> Self {
        Self {
            character: '\0',
            entry: None,
            parent: None,
            children: Children::Empty,
            child_count: 0,
        }
    }

    fn child_of(parent: NodeId, character: char) -> Self {
        Self {
            character,
            entry: None,
            parent: Some(parent),
            children: Children::Empty,
            child_count: 0,
        }
    }

    /// Returns the stored key and value, if this node is terminal.
    pub(crate) fn key_value(&self) -> Option<(&str, &V)> {
        self.entry.as_ref().map(|(key, value)| (key.as_str(), value))
    }

    /// Whether removal may unlink this node.
    pub(crate) fn is_prunable(&self) -> bool {
        self.entry.is_none() && self.child_count == 0
    }
}

/// Slot storage for every node of a trie.
///
/// Released slots are kept on a free list and handed out again by later
/// allocations, so handles stay stable for the lifetime of a node.
#[derive(Debug, Clone)]
pub(crate) struct Arena<V> {
    slots: Vec<Option<Node<V>>>,
    free: Vec<NodeId>,
}

impl<V> Arena<V> {
    /// Creates an arena holding only the root sentinel.
    pub(crate) fn new() -> Self {
        Self {
            slots: vec![Some(Node::root())],
            free: Vec::new(),
        }
    }

    /// Number of live nodes, root included.
    #[cfg(test)]
    pub(crate) fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Returns the child of `parent` reached through `character`.
    pub(crate) fn child(&self, parent: NodeId, character: char) -> Option<NodeId> {
        self[parent].children.get(character)
    }

    /// Returns the child of `parent` reached through `character`, creating it if missing.
    pub(crate) fn child_or_insert(&mut self, parent: NodeId, character: char) -> NodeId {
        if let Some(child) = self.child(parent, character) {
            return child;
        }

        let id = self.allocate(Node::child_of(parent, character));
        let node = &mut self[parent];
        node.children.insert(character, id);
        node.child_count += 1;
        id
    }

    /// Detaches `id` from its parent and releases its slot.
    ///
    /// Returns the parent handle, or `None` when asked to unlink the root,
    /// which is left untouched.
    pub(crate) fn unlink(&mut self, id: NodeId) -> Option<NodeId> {
        let parent = self[id].parent?;
        let character = self[id].character;
        self.slots[id] = None;
        self.free.push(id);

        let node = &mut self[parent];
        if node.children.remove(character).is_some() {
            node.child_count -= 1;
            if node.child_count == 0 {
                node.children = Children::Empty;
            }
        }

        Some(parent)
    }

    fn allocate(&mut self, node: Node<V>) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.slots[id] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }
}

impl<V> Default for Arena<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Index<NodeId> for Arena<V> {
    type Output = Node<V>;

    fn index(&self, id: NodeId) -> &Node<V> {
        match &self.slots[id] {
            Some(node) => node,
            None => panic!("node {id} was released"),
        }
    }
}

impl<V> IndexMut<NodeId> for Arena<V> {
    fn index_mut(&mut self, id: NodeId) -> &mut Node<V> {
        match &mut self.slots[id] {
            Some(node) => node,
            None => panic!("node {id} was released"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dense_range_covers_printable_ascii() {
        assert_eq!(DENSE_SLOTS, 95);
        assert_eq!(dense_index(' '), Some(0));
        assert_eq!(dense_index('~'), Some(94));
        assert_eq!(dense_index('\n'), None);
        assert_eq!(dense_index('é'), None);
    }

    #[test]
    fn test_children_allocate_lazily() {
        let mut children = Children::default();
        assert!(matches!(children, Children::Empty));

        children.insert('a', 1);
        assert!(matches!(children, Children::Dense(_)));

        children.insert('λ', 2);
        assert!(matches!(children, Children::Mixed(_, _)));

        assert_eq!(children.get('a'), Some(1));
        assert_eq!(children.get('λ'), Some(2));
        assert_eq!(children.get('b'), None);

        let mut sparse_only = Children::default();
        sparse_only.insert('ß', 3);
        assert!(matches!(sparse_only, Children::Sparse(_)));
        assert_eq!(sparse_only.get('a'), None);
    }

    #[test]
    fn test_children_iterate_dense_in_ascending_order_then_sparse() {
        let mut children = Children::default();
        children.insert('z', 1);
        children.insert('λ', 2);
        children.insert('a', 3);
        children.insert('M', 4);

        let ids: Vec<NodeId> = children.iter().collect();
        assert_eq!(ids, vec![4, 3, 1, 2]);

        assert_eq!(children.remove('a'), Some(3));
        assert_eq!(children.remove('a'), None);
        assert_eq!(children.iter().collect::<Vec<_>>(), vec![4, 1, 2]);
    }

    #[test]
    fn test_arena_reuses_released_slots() {
        let mut arena: Arena<u32> = Arena::new();
        assert_eq!(arena.live(), 1);

        let a = arena.child_or_insert(ROOT, 'a');
        let b = arena.child_or_insert(a, 'b');
        assert_eq!(arena.child_or_insert(ROOT, 'a'), a);
        assert_eq!(arena.live(), 3);
        assert_eq!(arena[ROOT].child_count, 1);

        assert_eq!(arena.unlink(b), Some(a));
        assert_eq!(arena.live(), 2);
        assert_eq!(arena[a].child_count, 0);
        assert!(matches!(arena[a].children, Children::Empty));

        let c = arena.child_or_insert(ROOT, 'c');
        assert_eq!(c, b);
        assert_eq!(arena[c].parent, Some(ROOT));
        assert_eq!(arena.live(), 3);
    }

    #[test]
    fn test_arena_never_unlinks_root() {
        let mut arena: Arena<u32> = Arena::new();
        assert_eq!(arena.unlink(ROOT), None);
        assert_eq!(arena.live(), 1);
        assert!(arena[ROOT].is_prunable());
    }
}
