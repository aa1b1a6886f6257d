//! Codec layer: the row-oriented configuration grammar
//!
//! Each row starts with a marker cell (`H` labels, `V` variable names, `T` titles,
//! `C` content) followed by one cell per column. Cells use common CSV quoting.

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod row;

pub use decoder::{decode, too_few_columns, Decoded, RowDecoder, DEFAULT_DELIMITER, NO_VARIABLES_DEFINED};
pub use encoder::{canonicalize, encode, encode_to_string};
pub use error::{CodecError, CodecResult};
pub use row::RowType;

/// Decode text using the default delimiter.
pub fn decode_str(text: &str) -> CodecResult<Decoded> {
    decode(text.as_bytes(), DEFAULT_DELIMITER)
}
