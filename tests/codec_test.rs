//! Round trip and validation behavior of the row codec.

mod common;

use rstest::rstest;

use choicetree::codec::{
    canonicalize, decode, decode_str, encode_to_string, too_few_columns, DEFAULT_DELIMITER,
    NO_VARIABLES_DEFINED,
};
use common::{INPUT_CSV, INPUT_NO_TITLES, INPUT_QUOTED};

#[rstest]
#[case::full_example(INPUT_CSV)]
#[case::no_titles(INPUT_NO_TITLES)]
#[case::empty("")]
#[case::only_names("V,A,B\n")]
#[case::only_labels("H,Hello,World\n")]
#[case::only_content("C,a,b\n")]
#[case::quoted_cells(INPUT_QUOTED)]
fn given_canonical_text_when_decoding_and_encoding_then_reproduces_input(#[case] input: &str) {
    // Act
    let decoded = decode_str(input).unwrap();

    // Assert
    assert_eq!(
        encode_to_string(&decoded.tree, DEFAULT_DELIMITER).unwrap(),
        input
    );
    assert_eq!(decoded.tree.to_string(), input);
}

#[rstest]
#[case::only_titles("T,a,b\n")]
#[case::unknown_marker("X,a,b\n")]
#[case::short_rows("H\nT\n")]
fn given_non_canonical_text_when_round_tripping_then_output_differs(#[case] input: &str) {
    let decoded = decode_str(input).unwrap();
    let output = decoded.tree.to_string();

    assert_ne!(output, input);
    assert_eq!(output, "");
}

#[test]
fn given_only_short_rows_when_decoding_then_no_labels() {
    let decoded = decode_str("H\nT\n").unwrap();
    assert!(decoded.tree.variable_labels().is_empty());
    assert!(decoded.tree.variable_descriptions().is_empty());
}

#[test]
fn given_full_example_when_decoding_then_no_validation_message() {
    let decoded = decode_str(INPUT_CSV).unwrap();
    assert_eq!(decoded.validation, None);
    assert_eq!(decoded.tree.depth(), 4);
}

#[test]
fn given_content_wider_than_variables_when_decoding_then_names_row() {
    // Arrange: row 3 is the second content row
    let input = "V,A,B\nC,a,b\nC,a,b,c\nC,x,y\n";

    // Act
    let decoded = decode_str(input).unwrap();

    // Assert
    assert_eq!(decoded.validation, Some(too_few_columns(3)));
    assert_eq!(decoded.validation.as_deref(), Some("row 3 has too few columns"));
}

#[test]
fn given_no_variable_row_when_decoding_then_no_variables_message_wins() {
    let decoded = decode_str("H,A\nC,a,b,c\n").unwrap();
    assert_eq!(decoded.validation.as_deref(), Some(NO_VARIABLES_DEFINED));
}

#[test]
fn given_headers_and_names_of_different_length_when_decoding_then_uses_longer() {
    let decoded = decode_str("H,A\nV,X,Y,Z\n").unwrap();
    let descriptors = decoded.tree.variable_descriptions();

    assert_eq!(descriptors.len(), 3);
    assert_eq!(descriptors[0].label.as_deref(), Some("A"));
    assert_eq!(descriptors[1].label, None);
    assert_eq!(descriptors[2].variable_name.as_deref(), Some("Z"));
    assert_eq!(descriptors[2].column_index(), 2);
}

#[test]
fn given_semicolon_delimiter_when_canonicalizing_then_keeps_delimiter() {
    let input = "V;A;B\r\nC;\"a\";b\r\n";
    assert_eq!(canonicalize(input, b';').unwrap(), "V;A;B\nC;a;b\n");
}

#[test]
fn given_invalid_utf8_when_decoding_then_error() {
    let bytes: &[u8] = b"V,A\nC,\xff\xfe\n";
    assert!(decode(bytes, DEFAULT_DELIMITER).is_err());
}

#[test]
fn given_repeated_title_rows_when_decoding_then_only_last_applies() {
    let decoded = decode_str("V,A\nT,first\nT,second\nC,a\n").unwrap();
    let tree = decoded.tree;
    let leaf = tree.item_list()[0];

    assert_eq!(tree.item(leaf).unwrap().label, "second");
}
