use crate::domain::item::ItemId;

/// Metadata about one column of the tree: its display label and the variable it fills.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableDescriptor {
    /// Column label (`H` row)
    pub label: Option<String>,
    /// Build variable name (`V` row)
    pub variable_name: Option<String>,
    column_index: usize,
    initial_values: Vec<ItemId>,
}

impl VariableDescriptor {
    pub fn new(label: Option<String>, variable_name: Option<String>, column_index: usize) -> Self {
        Self {
            label,
            variable_name,
            column_index,
            initial_values: Vec::new(),
        }
    }

    /// Position of this descriptor in the tree's descriptor list.
    pub fn column_index(&self) -> usize {
        self.column_index
    }

    /// Items offered in this column before the user picks anything.
    pub fn initial_values(&self) -> &[ItemId] {
        &self.initial_values
    }

    pub(crate) fn set_column_index(&mut self, column_index: usize) {
        self.column_index = column_index;
    }

    pub(crate) fn set_initial_values(&mut self, initial_values: Vec<ItemId>) {
        self.initial_values = initial_values;
    }
}
