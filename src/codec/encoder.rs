//! Row encoder: writes a tree back into the configuration grammar.

use std::fmt;
use std::io::Write;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use tracing::{instrument, warn};

use crate::codec::decoder::{decode, DEFAULT_DELIMITER};
use crate::codec::error::{CodecError, CodecResult};
use crate::codec::row::RowType;
use crate::domain::{DecisionTree, ItemId, Visit};

type CsvWriter<W> = csv::Writer<W>;

/// Serialize `tree` as configuration rows, the exact inverse of [`decode`].
///
/// Writes `H` and `V` rows when descriptors carry labels or names, then per leaf
/// (pre-order) an optional `T` row and a `C` row built from the leaf-to-root path.
#[instrument(level = "debug", skip(tree, writer))]
pub fn encode<W: Write>(tree: &DecisionTree, writer: W, delimiter: u8) -> CodecResult<()> {
    let mut csv_writer = WriterBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    write_list(&mut csv_writer, RowType::Header, &tree.variable_labels())?;
    write_list(&mut csv_writer, RowType::VariableName, &tree.variable_names())?;

    tree.visit_sub_tree(|id, item, _column| {
        if item.is_leaf() {
            write_leaf(&mut csv_writer, tree, id)?;
        }
        Ok::<_, CodecError>(Visit::Descend)
    })?;

    csv_writer.flush()?;
    Ok(())
}

fn write_list<W: Write>(
    writer: &mut CsvWriter<W>,
    row_type: RowType,
    values: &[&str],
) -> CodecResult<()> {
    if values.is_empty() {
        return Ok(());
    }
    write_row(writer, row_type, values.iter().copied())
}

fn write_leaf<W: Write>(writer: &mut CsvWriter<W>, tree: &DecisionTree, leaf: ItemId) -> CodecResult<()> {
    let path = tree.path_to_root(leaf);
    let has_labels = path.iter().any(|item| !item.label.is_empty());

    if has_labels {
        write_row(writer, RowType::Title, path.iter().rev().map(|item| item.label.as_str()))?;
    }
    write_row(writer, RowType::Content, path.iter().rev().map(|item| item.value.as_str()))
}

fn write_row<'a, W: Write>(
    writer: &mut CsvWriter<W>,
    row_type: RowType,
    cells: impl Iterator<Item = &'a str>,
) -> CodecResult<()> {
    let marker = row_type.marker().unwrap_or_default();
    writer.write_record(std::iter::once(marker).chain(cells))?;
    Ok(())
}

/// Encode into a string using `delimiter`.
pub fn encode_to_string(tree: &DecisionTree, delimiter: u8) -> CodecResult<String> {
    let mut buffer = Vec::new();
    encode(tree, &mut buffer, delimiter)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Decode and re-encode `text`, yielding the canonical form stored by callers.
#[instrument(level = "debug", skip(text))]
pub fn canonicalize(text: &str, delimiter: u8) -> CodecResult<String> {
    let decoded = decode(text.as_bytes(), delimiter)?;
    encode_to_string(&decoded.tree, delimiter)
}

/// String conversion boundary: encoding failures are logged and yield an empty string.
fn or_empty(result: CodecResult<String>) -> String {
    result.unwrap_or_else(|e| {
        warn!("Error serializing configuration: {}", e);
        String::new()
    })
}

impl fmt::Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&or_empty(encode_to_string(self, DEFAULT_DELIMITER)))
    }
}
