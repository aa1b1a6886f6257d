use itertools::Itertools;
use termtree::Tree;
use tracing::instrument;

use crate::domain::item::ItemId;
use crate::domain::tree::DecisionTree;

pub trait TreeDisplay {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeDisplay for DecisionTree {
    /// Root node lists the variable names, followed by one node per item (display label).
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        let names = self.variable_names();
        let root = if names.is_empty() {
            "(no variables)".to_string()
        } else {
            names.iter().join(" > ")
        };

        fn build_tree(tree: &DecisionTree, id: ItemId) -> Option<Tree<String>> {
            let item = tree.item(id)?;
            let leaves: Vec<Tree<String>> = item
                .children()
                .iter()
                .filter_map(|&child| build_tree(tree, child))
                .collect();
            Some(Tree::new(item.display_label().to_string()).with_leaves(leaves))
        }

        let leaves: Vec<Tree<String>> = self
            .item_list()
            .iter()
            .filter_map(|&id| build_tree(self, id))
            .collect();
        Tree::new(root).with_leaves(leaves)
    }
}
