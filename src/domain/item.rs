use std::fmt;

use generational_arena::Index;

/// Stable handle of a [`DecisionItem`] inside its owning tree's arena.
pub type ItemId = Index;

/// One selectable entry in a column of the choice tree.
///
/// Children are owned through the tree arena; `parent` is a non-owning back link
/// used only for walking from a leaf up to its root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionItem {
    /// Label shown in the selection list; empty means "fall back to the value"
    pub label: String,
    /// Value assigned to the column's variable when this item is selected
    pub value: String,
    pub(crate) parent: Option<ItemId>,
    pub(crate) children: Vec<ItemId>,
}

impl DecisionItem {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<ItemId> {
        self.parent
    }

    pub fn children(&self) -> &[ItemId] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Label for display, falling back to the value when no label is set.
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.value
        } else {
            &self.label
        }
    }
}

impl fmt::Display for DecisionItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "label='{}', value='{}', children={}",
            self.label,
            self.value,
            self.children.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_label_falls_back_to_value() {
        let item = DecisionItem::new("", "WSC Wien");
        assert_eq!(item.display_label(), "WSC Wien");

        let item = DecisionItem::new("Alternative team name", "WSC Wien");
        assert_eq!(item.display_label(), "Alternative team name");
    }

    #[test]
    fn test_new_item_is_detached_leaf() {
        let item = DecisionItem::new("Hello", "Value");
        assert!(item.is_root());
        assert!(item.is_leaf());
        assert!(item.children().is_empty());
    }

    #[test]
    fn test_display() {
        let item = DecisionItem::new("label", "value");
        assert_eq!(item.to_string(), "label='label', value='value', children=0");
    }
}
