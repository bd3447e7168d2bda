//! Attribute store: cached computed values plus the dependency graph.
//!
//! Every (item, attribute) pair is a node in one of three states:
//!
//! ```text
//! Dirty ──evaluate──▶ Evaluating ──finish──▶ Clean(value)
//!   ▲                                            │
//!   └───────────────── invalidate ───────────────┘
//! ```
//!
//! Reverse edges (input → dependents) are recorded while a node evaluates, so
//! invalidating an input reaches exactly the values computed from it.

use std::collections::{BTreeSet, HashMap};

use crate::env::{AttributeId, TypeId};
use crate::fit::ItemId;

/// Identifies one attribute of one item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttrKey {
    pub item: ItemId,
    pub attribute: AttributeId,
}

impl AttrKey {
    pub const fn new(item: ItemId, attribute: AttributeId) -> Self {
        Self { item, attribute }
    }
}

impl std::fmt::Display for AttrKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.item, self.attribute)
    }
}

/// Input of a computed value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeKey {
    Attr(AttrKey),
    Skill(TypeId),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodeState {
    Dirty,
    Evaluating,
    Clean(f64),
}

#[derive(Debug, Default)]
pub struct AttributeStore {
    nodes: HashMap<AttrKey, NodeState>,
    /// input → attributes computed from it
    dependents: HashMap<NodeKey, BTreeSet<AttrKey>>,
    /// attribute → inputs read by its last evaluation
    dependencies: HashMap<AttrKey, BTreeSet<NodeKey>>,
}

impl AttributeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes that were never evaluated are dirty.
    pub fn state(&self, key: AttrKey) -> NodeState {
        self.nodes.get(&key).copied().unwrap_or(NodeState::Dirty)
    }

    pub fn is_dirty(&self, key: AttrKey) -> bool {
        !matches!(self.state(key), NodeState::Clean(_))
    }

    /// Known nodes currently waiting for recomputation.
    pub fn dirty_count(&self) -> usize {
        self.nodes
            .values()
            .filter(|state| matches!(state, NodeState::Dirty))
            .count()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Marks `key` as evaluating and forgets the inputs of its previous
    /// evaluation; they are recorded again as they are read.
    pub fn begin(&mut self, key: AttrKey) {
        self.clear_dependencies(key);
        self.nodes.insert(key, NodeState::Evaluating);
    }

    /// Ends an evaluation. Unmemoized nodes go back to dirty.
    pub fn finish(&mut self, key: AttrKey, value: f64, memoize: bool) {
        let state = if memoize {
            NodeState::Clean(value)
        } else {
            NodeState::Dirty
        };
        self.nodes.insert(key, state);
    }

    pub fn record_dependency(&mut self, dependent: AttrKey, input: NodeKey) {
        self.dependents.entry(input).or_default().insert(dependent);
        self.dependencies.entry(dependent).or_default().insert(input);
    }

    pub fn dependents_of(&self, input: NodeKey) -> impl Iterator<Item = AttrKey> + '_ {
        self.dependents.get(&input).into_iter().flatten().copied()
    }

    fn clear_dependencies(&mut self, key: AttrKey) {
        let Some(inputs) = self.dependencies.remove(&key) else {
            return;
        };
        for input in inputs {
            if let Some(dependents) = self.dependents.get_mut(&input) {
                dependents.remove(&key);
                if dependents.is_empty() {
                    self.dependents.remove(&input);
                }
            }
        }
    }

    /// Marks `input` (when it is an attribute) and everything transitively
    /// computed from it dirty. Returns the attributes that held a cached value.
    ///
    /// The walk does not stop at nodes that are already dirty: a node that is
    /// never memoized still has clean dependents further up.
    pub fn invalidate(&mut self, input: NodeKey) -> BTreeSet<AttrKey> {
        let mut newly_dirty = BTreeSet::new();
        let mut visited = BTreeSet::new();
        let mut stack = vec![input];

        while let Some(node) = stack.pop() {
            if !visited.insert(node) {
                continue;
            }
            if let NodeKey::Attr(key) = node {
                if let Some(state) = self.nodes.get_mut(&key) {
                    if matches!(state, NodeState::Clean(_)) {
                        newly_dirty.insert(key);
                    }
                    *state = NodeState::Dirty;
                }
            }
            stack.extend(self.dependents_of(node).map(NodeKey::Attr));
        }

        newly_dirty
    }

    /// Known attributes of `item`, in key order.
    pub fn keys_of(&self, item: ItemId) -> Vec<AttrKey> {
        let mut keys: Vec<AttrKey> = self
            .nodes
            .keys()
            .filter(|key| key.item == item)
            .copied()
            .collect();
        keys.sort();
        keys
    }

    /// Drops every node, value and edge belonging to `item`.
    pub fn purge_item(&mut self, item: ItemId) {
        let keys: Vec<AttrKey> = self
            .nodes
            .keys()
            .chain(self.dependencies.keys())
            .filter(|key| key.item == item)
            .copied()
            .collect();
        for key in keys {
            self.clear_dependencies(key);
            self.nodes.remove(&key);
            self.dependents.remove(&NodeKey::Attr(key));
        }
        for dependents in self.dependents.values_mut() {
            dependents.retain(|key| key.item != item);
        }
        self.dependents.retain(|_, dependents| !dependents.is_empty());
    }
}
