//! Trie builder merging content rows into a decision tree.

use indexmap::IndexMap;
use tracing::{instrument, trace};

use crate::domain::item::ItemId;
use crate::domain::tree::DecisionTree;

const ROOT: usize = 0;

/// Lookup node used only while building: maps a column value to the node below it.
#[derive(Debug, Default)]
struct ConstructionNode {
    /// Item this node stands for, `None` only for the root
    item: Option<ItemId>,
    /// Child nodes keyed by value, in first-seen order
    lookup: IndexMap<String, usize>,
}

/// Constructs a [`DecisionTree`] from rows of column values, sharing common prefixes.
///
/// A value seen again at the same trie position reuses the existing item; its label
/// stays whatever the first occurrence supplied.
#[derive(Debug)]
pub struct TrieBuilder {
    tree: DecisionTree,
    nodes: Vec<ConstructionNode>,
}

impl Default for TrieBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TrieBuilder {
    pub fn new() -> Self {
        Self {
            tree: DecisionTree::new(),
            nodes: vec![ConstructionNode::default()],
        }
    }

    /// Merge one row of values into the trie, labelling newly created items from `titles`.
    #[instrument(level = "trace", skip(self))]
    pub fn add_row(&mut self, values: &[String], titles: Option<&[String]>) {
        let mut current = ROOT;
        for (i, value) in values.iter().enumerate() {
            current = match self.nodes[current].lookup.get(value) {
                Some(&next) => next,
                None => {
                    let label = titles.and_then(|t| t.get(i)).map_or("", String::as_str);
                    let item = self.tree.add_item(label, value);
                    let next = self.nodes.len();
                    self.nodes.push(ConstructionNode {
                        item: Some(item),
                        lookup: IndexMap::new(),
                    });
                    self.nodes[current].lookup.insert(value.clone(), next);
                    trace!("new item {:?} for value {:?} in column {}", item, value, i);
                    next
                }
            };
        }
    }

    /// Link all items into their parents and hand out the finished tree.
    #[instrument(level = "debug", skip(self))]
    pub fn build(mut self) -> DecisionTree {
        let roots = self.materialize(ROOT);
        self.tree.link_roots(roots);
        self.tree
    }

    fn materialize(&mut self, node: usize) -> Vec<ItemId> {
        let children: Vec<usize> = self.nodes[node].lookup.values().copied().collect();
        let mut items = Vec::with_capacity(children.len());
        for child in children {
            let Some(item) = self.nodes[child].item else {
                continue;
            };
            let grandchildren = self.materialize(child);
            self.tree.link_children(item, grandchildren);
            items.push(item);
        }
        items
    }
}
