//! Inverted indices for fast node lookup
//!
//! Classification rules ask questions like "which nodes carry coreference
//! index 3" or "where are the `NP-OBJ` brackets". The index answers them
//! without rescanning the whole fragment. Every posting list is in document
//! order, because nodes are indexed in id order.

use crate::tree::{Node, NodeId, Tree};
use rustc_hash::FxHashMap;

/// Inverted index for tree nodes
#[derive(Debug, Clone, Default)]
pub struct TreeIndex {
    /// Index by full label, e.g. `NP-SBJ-3`
    by_label: FxHashMap<String, Vec<NodeId>>,
    /// Index by label without coreference index, e.g. `NP-SBJ`
    by_base: FxHashMap<String, Vec<NodeId>>,
    /// Index by coreference index
    by_coref: FxHashMap<u32, Vec<NodeId>>,
}

impl TreeIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from a tree
    pub fn build(tree: &Tree) -> Self {
        let mut index = Self::new();

        for node in &tree.nodes {
            index.add_node(node);
        }

        index
    }

    fn add_node(&mut self, node: &Node) {
        self.by_label
            .entry(node.label.as_str().to_string())
            .or_default()
            .push(node.id);

        if let Some(coref) = node.label.index() {
            self.by_base
                .entry(node.label.base().to_string())
                .or_default()
                .push(node.id);
            self.by_coref.entry(coref).or_default().push(node.id);
        }
    }

    /// Nodes whose label is exactly `label`
    pub fn get_by_label(&self, label: &str) -> &[NodeId] {
        self.by_label.get(label).map(Vec::as_slice).unwrap_or_default()
    }

    /// Indexed nodes whose label without its index is `base`
    pub fn get_by_base(&self, base: &str) -> &[NodeId] {
        self.by_base.get(base).map(Vec::as_slice).unwrap_or_default()
    }

    /// Nodes carrying coreference index `coref`
    pub fn get_by_coref(&self, coref: u32) -> &[NodeId] {
        self.by_coref.get(&coref).map(Vec::as_slice).unwrap_or_default()
    }

    /// Labels starting with `prefix`, merged into document order
    pub fn get_by_label_prefix(&self, prefix: &str) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self
            .by_label
            .iter()
            .filter(|(label, _)| label.starts_with(prefix))
            .flat_map(|(_, ids)| ids.iter().copied())
            .collect();
        ids.sort_unstable();
        ids
    }
}
