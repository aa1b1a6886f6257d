//! Row decoder: classifies configuration rows and feeds content rows into the trie builder.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info, instrument};

use crate::codec::error::CodecResult;
use crate::codec::row::RowType;
use crate::domain::{DecisionTree, TrieBuilder, VariableDescriptor};

/// Default cell delimiter.
pub const DEFAULT_DELIMITER: u8 = b',';

/// Validation message when the configuration has no `V` row.
pub const NO_VARIABLES_DEFINED: &str = "no variables defined";

/// Validation message for a title or content row wider than the variable list.
pub fn too_few_columns(row_index: usize) -> String {
    format!("row {} has too few columns", row_index)
}

/// Result of decoding: a best-effort tree plus the last structural problem found, if any.
#[derive(Debug)]
pub struct Decoded {
    pub tree: DecisionTree,
    pub validation: Option<String>,
}

/// Stateful decoder consuming one row at a time.
#[derive(Debug)]
pub struct RowDecoder {
    headers: Option<Vec<String>>,
    variable_names: Option<Vec<String>>,
    /// Titles for the next content row only
    pending_titles: Option<Vec<String>>,
    validation: Option<String>,
    /// 1-based, counts every row with at least two cells
    row_index: usize,
    builder: TrieBuilder,
}

impl Default for RowDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl RowDecoder {
    pub fn new() -> Self {
        Self {
            headers: None,
            variable_names: None,
            pending_titles: None,
            validation: None,
            row_index: 1,
            builder: TrieBuilder::new(),
        }
    }

    /// Process one row of cells; rows with fewer than two cells are ignored.
    #[instrument(level = "trace", skip(self))]
    pub fn push_row(&mut self, cells: &[String]) {
        let Some((marker, rest)) = cells.split_first() else {
            return;
        };
        if rest.is_empty() {
            return;
        }

        let row_type = RowType::of(marker);
        let cells = rest.to_vec();
        match row_type {
            RowType::Header => self.headers = Some(cells),
            RowType::VariableName => self.variable_names = Some(cells),
            RowType::Title => {
                self.check_column_count(cells.len());
                self.pending_titles = Some(cells);
            }
            RowType::Content => {
                self.check_column_count(cells.len());
                let titles = self.pending_titles.take();
                self.builder.add_row(&cells, titles.as_deref());
            }
            RowType::Unknown => {
                info!("Ignoring row {} with unknown marker {:?}", self.row_index, marker);
            }
        }

        self.row_index += 1;
    }

    fn check_column_count(&mut self, count: usize) {
        if let Some(names) = &self.variable_names {
            if count > names.len() {
                debug!("row {}: {} cells for {} variables", self.row_index, count, names.len());
                self.validation = Some(too_few_columns(self.row_index));
            }
        }
    }

    /// Build the descriptors and the tree from everything seen so far.
    #[instrument(level = "debug", skip(self))]
    pub fn finish(self) -> Decoded {
        let mut validation = self.validation;
        if self.variable_names.is_none() {
            validation = Some(NO_VARIABLES_DEFINED.to_string());
        }

        let headers = self.headers.unwrap_or_default();
        let names = self.variable_names.unwrap_or_default();
        let descriptors: Vec<VariableDescriptor> = (0..headers.len().max(names.len()))
            .map(|i| VariableDescriptor::new(headers.get(i).cloned(), names.get(i).cloned(), i))
            .collect();

        let mut tree = self.builder.build();
        tree.set_variable_descriptions(descriptors);

        if !tree.item_list().is_empty() && tree.depth() != tree.variable_descriptions().len() {
            debug!(
                "tree depth {} does not match {} variable columns",
                tree.depth(),
                tree.variable_descriptions().len()
            );
        }

        Decoded { tree, validation }
    }
}

/// Decode configuration text from `reader`, splitting cells on `delimiter`.
///
/// Structural problems never fail decoding; they are reported in
/// [`Decoded::validation`]. Errors are limited to reading the input.
#[instrument(level = "debug", skip(reader))]
pub fn decode<R: Read>(reader: R, delimiter: u8) -> CodecResult<Decoded> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader);

    let mut decoder = RowDecoder::new();
    let mut record = StringRecord::new();
    while csv_reader.read_record(&mut record)? {
        let cells: Vec<String> = record.iter().map(str::to_string).collect();
        decoder.push_row(&cells);
    }
    Ok(decoder.finish())
}
