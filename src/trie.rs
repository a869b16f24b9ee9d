//! Prefix index over case-folded string keys
//!
//! Used for candidate-name search. Keys are lowercased character by
//! character on every operation, so `"Ann"`, `"ANN"` and `"ann"` address
//! the same entry. Nodes are created lazily along insertion paths and are
//! never removed.
//!
//! `starts_with` walks the matching subtree depth-first in pre-order with
//! children visited in ascending character order: an entry always comes
//! before the entries it is a prefix of, and siblings come out sorted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct Node<V> {
    children: BTreeMap<char, Node<V>>,
    /// `Some` exactly when an inserted key ends at this node
    value: Option<V>,
}

impl<V> Default for Node<V> {
    fn default() -> Self {
        Self {
            children: BTreeMap::new(),
            value: None,
        }
    }
}

impl<V> Node<V> {
    fn is_terminal(&self) -> bool {
        self.value.is_some()
    }

    fn max_depth(&self) -> usize {
        self.children
            .values()
            .map(|child| child.max_depth() + 1)
            .max()
            .unwrap_or(0)
    }

    fn collect<'a>(&'a self, key: &mut String, out: &mut Vec<PrefixMatch<'a, V>>) {
        if let Some(value) = &self.value {
            out.push(PrefixMatch {
                key: key.clone(),
                value,
            });
        }

        for (ch, child) in &self.children {
            key.push(*ch);
            child.collect(key, out);
            key.pop();
        }
    }
}

/// One `starts_with` hit: the full case-folded key and its payload
#[derive(Debug, PartialEq, Serialize)]
pub struct PrefixMatch<'a, V> {
    pub key: String,
    pub value: &'a V,
}

// Only the borrowed payload is shared, so `V` itself need not be `Clone`.
impl<V> Clone for PrefixMatch<'_, V> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            value: self.value,
        }
    }
}

/// Trie statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixStats {
    pub word_count: usize,
    /// Longest root-to-leaf path in characters, 0 when empty
    pub max_depth: usize,
}

/// Character trie mapping lowercase string keys to values
#[derive(Debug, Clone)]
pub struct PrefixIndex<V> {
    root: Node<V>,
    word_count: usize,
}

impl<V> Default for PrefixIndex<V> {
    fn default() -> Self {
        Self::new()
    }
}

fn fold(key: &str) -> impl Iterator<Item = char> + '_ {
    key.chars().flat_map(char::to_lowercase)
}

impl<V> PrefixIndex<V> {
    pub fn new() -> Self {
        Self {
            root: Node::default(),
            word_count: 0,
        }
    }

    /// Number of keys currently stored
    pub fn len(&self) -> usize {
        self.word_count
    }

    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Insert `key` with `value`, returning the payload it replaced
    ///
    /// The empty key is valid and marks the root itself.
    pub fn insert(&mut self, key: &str, value: V) -> Option<V> {
        let mut node = &mut self.root;
        for ch in fold(key) {
            node = node.children.entry(ch).or_default();
        }

        let previous = node.value.replace(value);
        if previous.is_none() {
            self.word_count += 1;
        }
        previous
    }

    fn find_node(&self, key: &str) -> Option<&Node<V>> {
        let mut node = &self.root;
        for ch in fold(key) {
            node = node.children.get(&ch)?;
        }
        Some(node)
    }

    /// Exact lookup; a key that is only a prefix of stored keys is absent
    pub fn search(&self, key: &str) -> Option<&V> {
        self.find_node(key).and_then(|node| node.value.as_ref())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.find_node(key).is_some_and(Node::is_terminal)
    }

    /// Every stored key that starts with `prefix`, with its payload
    pub fn starts_with(&self, prefix: &str) -> Vec<PrefixMatch<'_, V>> {
        let mut results = Vec::new();
        if let Some(node) = self.find_node(prefix) {
            let mut key: String = fold(prefix).collect();
            node.collect(&mut key, &mut results);
        }
        results
    }

    pub fn max_depth(&self) -> usize {
        self.root.max_depth()
    }

    pub fn stats(&self) -> PrefixStats {
        PrefixStats {
            word_count: self.word_count,
            max_depth: self.max_depth(),
        }
    }
}
