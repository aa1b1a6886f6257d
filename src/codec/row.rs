//! Row kinds of the configuration grammar, selected by the marker in the first cell.

use std::fmt;

/// Kind of a configuration row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowType {
    /// Labels for the column selection lists
    Header,
    /// Build variable names, one per column
    VariableName,
    /// Optional item titles for the following content row
    Title,
    /// Values of one complete combination
    Content,
    /// Anything else; ignored
    Unknown,
}

const MARKERS: [(&str, RowType); 4] = [
    ("H", RowType::Header),
    ("V", RowType::VariableName),
    ("T", RowType::Title),
    ("C", RowType::Content),
];

impl RowType {
    pub fn of(marker: &str) -> Self {
        MARKERS
            .iter()
            .find(|(m, _)| *m == marker)
            .map_or(RowType::Unknown, |&(_, row_type)| row_type)
    }

    /// Marker written in the first cell, `None` for [`RowType::Unknown`].
    pub fn marker(self) -> Option<&'static str> {
        MARKERS
            .iter()
            .find(|(_, row_type)| *row_type == self)
            .map(|&(m, _)| m)
    }
}

impl fmt::Display for RowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.marker().unwrap_or("?"))
    }
}
