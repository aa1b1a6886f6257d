//! Arena-backed decision tree: items per column plus the variable descriptors.

use std::collections::BTreeMap;

use generational_arena::Arena;
use tracing::{debug, instrument, trace};

use crate::domain::descriptor::VariableDescriptor;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::item::{DecisionItem, ItemId};

/// Outcome of visiting a single item during traversal.
///
/// Aborting a traversal is expressed by returning `Err` from the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Continue into the item's children
    Descend,
    /// Do not descend below this item, but keep visiting its siblings
    Skip,
}

/// Tree of all valid value combinations, one level per variable column.
///
/// Items live in a generational arena and are referenced by [`ItemId`]. Items are
/// never removed from the arena; replacing the item list leaves detached items
/// behind until the tree is dropped.
#[derive(Debug, Clone)]
pub struct DecisionTree {
    arena: Arena<DecisionItem>,
    item_list: Vec<ItemId>,
    variable_descriptions: Vec<VariableDescriptor>,
}

impl Default for DecisionTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            item_list: Vec::new(),
            variable_descriptions: Vec::new(),
        }
    }

    /// Store a new detached item and return its handle.
    #[instrument(level = "trace", skip(self))]
    pub fn add_item(&mut self, label: &str, value: &str) -> ItemId {
        self.arena.insert(DecisionItem::new(label, value))
    }

    pub fn item(&self, id: ItemId) -> Option<&DecisionItem> {
        self.arena.get(id)
    }

    /// Mutable access to an item's label and value; structure stays under tree control.
    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut DecisionItem> {
        self.arena.get_mut(id)
    }

    /// Items of the first column.
    pub fn item_list(&self) -> &[ItemId] {
        &self.item_list
    }

    pub fn variable_descriptions(&self) -> &[VariableDescriptor] {
        &self.variable_descriptions
    }

    /// Replace the children of `parent`, pointing every child's parent link back at it.
    ///
    /// Descriptor initial values are not recomputed; replace the item list or the
    /// descriptors afterwards to refresh them.
    pub fn set_children(&mut self, parent: ItemId, children: Vec<ItemId>) -> DomainResult<()> {
        self.ensure_known(parent)?;
        for &child in &children {
            self.ensure_known(child)?;
        }
        self.link_children(parent, children);
        Ok(())
    }

    /// Replace the first column's items and recompute descriptor initial values.
    pub fn set_item_list(&mut self, items: Vec<ItemId>) -> DomainResult<()> {
        for &id in &items {
            self.ensure_known(id)?;
        }
        self.link_roots(items);
        Ok(())
    }

    /// Replace the column descriptors, re-numbering their column indices by position.
    pub fn set_variable_descriptions(&mut self, mut descriptions: Vec<VariableDescriptor>) {
        for (i, descriptor) in descriptions.iter_mut().enumerate() {
            descriptor.set_column_index(i);
        }
        self.variable_descriptions = descriptions;
        self.update_initial_values();
    }

    /// Labels of all descriptors that have one, in column order.
    pub fn variable_labels(&self) -> Vec<&str> {
        self.variable_descriptions
            .iter()
            .filter_map(|d| d.label.as_deref())
            .collect()
    }

    /// Variable names of all descriptors that have one, in column order.
    pub fn variable_names(&self) -> Vec<&str> {
        self.variable_descriptions
            .iter()
            .filter_map(|d| d.variable_name.as_deref())
            .collect()
    }

    pub(crate) fn link_roots(&mut self, roots: Vec<ItemId>) {
        for &id in &roots {
            if let Some(item) = self.arena.get_mut(id) {
                item.parent = None;
            }
        }
        self.item_list = roots;
        self.update_initial_values();
    }

    pub(crate) fn link_children(&mut self, parent: ItemId, children: Vec<ItemId>) {
        for &child in &children {
            if let Some(item) = self.arena.get_mut(child) {
                item.parent = Some(parent);
            }
        }
        if let Some(item) = self.arena.get_mut(parent) {
            item.children = children;
        }
    }

    fn ensure_known(&self, id: ItemId) -> DomainResult<()> {
        if self.arena.contains(id) {
            Ok(())
        } else {
            Err(DomainError::UnknownItem(id))
        }
    }

    /// Items offered in `column` when the first option was picked in every column before it.
    pub fn initial_values_for_column(&self, column: usize) -> &[ItemId] {
        let mut items = self.item_list.as_slice();
        for _ in 0..column {
            match items.first().and_then(|&id| self.arena.get(id)) {
                Some(first) => items = &first.children,
                None => break,
            }
        }
        items
    }

    #[instrument(level = "trace", skip(self))]
    fn update_initial_values(&mut self) {
        if self.item_list.is_empty() || self.variable_descriptions.is_empty() {
            return;
        }
        let initial_values: Vec<Vec<ItemId>> = (0..self.variable_descriptions.len())
            .map(|column| self.initial_values_for_column(column).to_vec())
            .collect();
        for (descriptor, values) in self.variable_descriptions.iter_mut().zip(initial_values) {
            descriptor.set_initial_values(values);
        }
    }

    /// Depth-first walk over every item, pairing each level with its column descriptor.
    ///
    /// Each branch receives its own view of the remaining descriptors; once they run
    /// out the visitor sees `None`. An `Err` from the visitor aborts the walk.
    pub fn visit_sub_tree<E, F>(&self, mut visitor: F) -> Result<(), E>
    where
        F: FnMut(ItemId, &DecisionItem, Option<&VariableDescriptor>) -> Result<Visit, E>,
    {
        self.visit_items(&self.item_list, &self.variable_descriptions, &mut visitor)
    }

    fn visit_items<E, F>(
        &self,
        items: &[ItemId],
        columns: &[VariableDescriptor],
        visitor: &mut F,
    ) -> Result<(), E>
    where
        F: FnMut(ItemId, &DecisionItem, Option<&VariableDescriptor>) -> Result<Visit, E>,
    {
        let (column, remaining) = split_column(columns);
        for &id in items {
            let Some(item) = self.arena.get(id) else {
                continue;
            };
            if visitor(id, item, column)? == Visit::Descend {
                self.visit_items(&item.children, remaining, visitor)?;
            }
        }
        Ok(())
    }

    /// Walk one item per level, chosen by the indices in `item_path`.
    ///
    /// Stops without error when the path is exhausted. An index beyond the number
    /// of items at its level fails with [`DomainError::IndexOutOfBounds`].
    pub fn visit_selected_items<E, F>(&self, item_path: &[usize], mut visitor: F) -> Result<(), E>
    where
        E: From<DomainError>,
        F: FnMut(ItemId, &DecisionItem, Option<&VariableDescriptor>) -> Result<Visit, E>,
    {
        self.visit_path(
            &self.item_list,
            &self.variable_descriptions,
            item_path,
            &mut visitor,
        )
    }

    fn visit_path<E, F>(
        &self,
        items: &[ItemId],
        columns: &[VariableDescriptor],
        item_path: &[usize],
        visitor: &mut F,
    ) -> Result<(), E>
    where
        E: From<DomainError>,
        F: FnMut(ItemId, &DecisionItem, Option<&VariableDescriptor>) -> Result<Visit, E>,
    {
        let Some((&index, remaining_path)) = item_path.split_first() else {
            return Ok(());
        };
        let id = *items.get(index).ok_or(DomainError::IndexOutOfBounds {
            index,
            len: items.len(),
        })?;
        let item = self.arena.get(id).ok_or(DomainError::UnknownItem(id))?;
        let (column, remaining_columns) = split_column(columns);

        match visitor(id, item, column)? {
            Visit::Descend => {
                self.visit_path(&item.children, remaining_columns, remaining_path, visitor)
            }
            Visit::Skip => Ok(()),
        }
    }

    /// Look up the item reached by following one child index per column.
    ///
    /// Returns `Ok(None)` for an empty path or when the columns run out before the
    /// last coordinate is reached.
    #[instrument(level = "debug", skip(self))]
    pub fn item_by_coordinates(&self, coordinates: &[usize]) -> DomainResult<Option<ItemId>> {
        let Some(target_column) = coordinates.len().checked_sub(1) else {
            return Ok(None);
        };
        let mut found = None;
        self.visit_selected_items(coordinates, |id, _item, column| {
            if column.is_some_and(|c| c.column_index() == target_column) {
                found = Some(id);
                return Ok::<_, DomainError>(Visit::Skip);
            }
            Ok(Visit::Descend)
        })?;
        Ok(found)
    }

    /// Map a `{variable name -> child index}` selection to `{variable name -> value}`.
    ///
    /// Indices are taken in column order; variables missing from the selection are
    /// dropped from the path rather than defaulted, so omitting a non-trailing column
    /// shifts the remaining indices one level up.
    #[instrument(level = "debug", skip(self))]
    pub fn resolve_values(
        &self,
        selected_values: &BTreeMap<String, usize>,
    ) -> DomainResult<BTreeMap<String, String>> {
        let index_order: Vec<usize> = self
            .variable_descriptions
            .iter()
            .filter_map(|d| d.variable_name.as_ref())
            .filter_map(|name| selected_values.get(name).copied())
            .collect();
        debug!("index_order: {:?}", index_order);

        let mut properties = BTreeMap::new();
        self.visit_selected_items(&index_order, |_id, item, column| {
            if let Some(name) = column.and_then(|c| c.variable_name.as_ref()) {
                trace!("{} = {}", name, item.value);
                properties.insert(name.clone(), item.value.clone());
            }
            Ok::<_, DomainError>(Visit::Descend)
        })?;
        Ok(properties)
    }

    /// Items from `id` up to its root, leaf first.
    pub fn path_to_root(&self, id: ItemId) -> Vec<&DecisionItem> {
        let mut path = Vec::new();
        let mut current = self.arena.get(id);
        while let Some(item) = current {
            path.push(item);
            current = item.parent.and_then(|parent| self.arena.get(parent));
        }
        path
    }

    /// Longest root-to-leaf path; should equal the number of descriptors.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.item_list
            .iter()
            .map(|&id| self.calculate_depth(id))
            .max()
            .unwrap_or(0)
    }

    fn calculate_depth(&self, id: ItemId) -> usize {
        if let Some(item) = self.arena.get(id) {
            1 + item
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// All leaves in pre-order, i.e. one per complete value combination.
    pub fn leaves(&self) -> Vec<ItemId> {
        let mut leaves = Vec::new();
        for &id in &self.item_list {
            self.collect_leaves(id, &mut leaves);
        }
        leaves
    }

    fn collect_leaves(&self, id: ItemId, leaves: &mut Vec<ItemId>) {
        if let Some(item) = self.arena.get(id) {
            if item.children.is_empty() {
                leaves.push(id);
            } else {
                for &child in &item.children {
                    self.collect_leaves(child, leaves);
                }
            }
        }
    }
}

fn split_column(columns: &[VariableDescriptor]) -> (Option<&VariableDescriptor>, &[VariableDescriptor]) {
    match columns.split_first() {
        Some((column, remaining)) => (Some(column), remaining),
        None => (None, &[]),
    }
}
