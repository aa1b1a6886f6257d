//! Derived queries on a decoded decision tree.

mod common;

use std::collections::BTreeMap;

use rstest::rstest;

use choicetree::codec::decode_str;
use choicetree::domain::{DomainError, TrieBuilder, Visit};
use common::{sample_tree, values};

fn selection(pairs: &[(&str, usize)]) -> BTreeMap<String, usize> {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

#[rstest]
#[case(0, &["Water", "Ball"])]
#[case(1, &["Wakeboarding", "Waterball", "Surfing"])]
#[case(2, &["Germany", "Austria"])]
#[case(3, &["WSC Duisburg Rheinhausen", "WSC Paderborn"])]
fn given_decoded_tree_when_reading_initial_values_then_follows_first_options(
    #[case] column: usize,
    #[case] expected: &[&str],
) {
    let tree = sample_tree();
    let descriptor = &tree.variable_descriptions()[column];

    assert_eq!(values(&tree, descriptor.initial_values()), expected);
}

#[test]
fn given_decoded_tree_when_reading_first_column_initial_values_then_equals_item_list() {
    let tree = sample_tree();
    assert_eq!(
        tree.variable_descriptions()[0].initial_values(),
        tree.item_list()
    );
}

#[test]
fn given_coordinates_to_titled_item_when_looking_up_then_display_label_is_title() {
    let tree = sample_tree();

    let id = tree.item_by_coordinates(&[0, 1, 0, 0]).unwrap().unwrap();
    let item = tree.item(id).unwrap();

    assert_eq!(item.display_label(), "Alternative team name");
    assert_eq!(item.value, "Waterball Team");
}

#[test]
fn given_coordinates_to_untitled_item_when_looking_up_then_label_is_empty() {
    let tree = sample_tree();

    let id = tree.item_by_coordinates(&[0, 0, 0, 0]).unwrap().unwrap();
    let item = tree.item(id).unwrap();

    assert_eq!(item.value, "WSC Duisburg Rheinhausen");
    assert_eq!(item.label, "");
    assert!(item.is_leaf());
}

#[test]
fn given_partial_coordinates_when_looking_up_then_returns_inner_item() {
    let tree = sample_tree();
    let id = tree.item_by_coordinates(&[1, 1]).unwrap().unwrap();
    assert_eq!(tree.item(id).unwrap().value, "Handball");
}

#[test]
fn given_empty_coordinates_when_looking_up_then_none() {
    let tree = sample_tree();
    assert_eq!(tree.item_by_coordinates(&[]), Ok(None));
}

#[test]
fn given_out_of_range_coordinates_when_looking_up_then_index_error() {
    let tree = sample_tree();
    assert_eq!(
        tree.item_by_coordinates(&[0, 3]),
        Err(DomainError::IndexOutOfBounds { index: 3, len: 3 })
    );
}

#[test]
fn given_full_selection_when_resolving_then_maps_every_variable() {
    // Arrange
    let tree = sample_tree();
    let selected = selection(&[
        ("SELECTED_TYPE", 0),
        ("SELECTED_SPORT", 0),
        ("SELECTED_COUNTRY", 1),
        ("SELECTED_TEAM", 0),
    ]);

    // Act
    let resolved = tree.resolve_values(&selected).unwrap();

    // Assert
    let expected: BTreeMap<String, String> = [
        ("SELECTED_TYPE", "Water"),
        ("SELECTED_SPORT", "Wakeboarding"),
        ("SELECTED_COUNTRY", "Austria"),
        ("SELECTED_TEAM", "WSC Wien"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    assert_eq!(resolved, expected);
}

#[test]
fn given_index_beyond_children_when_resolving_then_index_error() {
    let tree = sample_tree();
    let selected = selection(&[
        ("SELECTED_TYPE", 0),
        ("SELECTED_SPORT", 0),
        ("SELECTED_COUNTRY", 1),
        ("SELECTED_TEAM", 1),
    ]);

    assert_eq!(
        tree.resolve_values(&selected),
        Err(DomainError::IndexOutOfBounds { index: 1, len: 1 })
    );
}

#[rstest]
#[case::empty(&[])]
#[case::unknown_names(&[("UNKNOWN", 3), ("OTHER", 0)])]
fn given_selection_without_known_variables_when_resolving_then_empty(
    #[case] pairs: &[(&str, usize)],
) {
    let tree = sample_tree();
    assert!(tree.resolve_values(&selection(pairs)).unwrap().is_empty());
}

#[test]
fn given_trailing_variables_missing_when_resolving_then_stops_early() {
    let tree = sample_tree();
    let resolved = tree
        .resolve_values(&selection(&[("SELECTED_TYPE", 1), ("SELECTED_SPORT", 1)]))
        .unwrap();

    assert_eq!(resolved.len(), 2);
    assert_eq!(resolved["SELECTED_SPORT"], "Handball");
}

#[test]
fn given_non_trailing_variable_missing_when_resolving_then_indices_shift_up() {
    let tree = sample_tree();
    let resolved = tree
        .resolve_values(&selection(&[("SELECTED_TYPE", 1), ("SELECTED_COUNTRY", 0)]))
        .unwrap();

    // COUNTRY's index lands on the SPORT column
    let expected: BTreeMap<String, String> = [("SELECTED_TYPE", "Ball"), ("SELECTED_SPORT", "Football")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    assert_eq!(resolved, expected);
    assert!(!resolved.contains_key("SELECTED_COUNTRY"));
}

#[test]
fn given_shared_prefixes_when_decoding_then_nodes_are_merged() {
    let tree = sample_tree();

    assert_eq!(values(&tree, tree.item_list()), vec!["Water", "Ball"]);
    let water = tree.item(tree.item_list()[0]).unwrap();
    assert_eq!(water.children().len(), 3);
    assert_eq!(tree.leaves().len(), 7);
}

#[test]
fn given_value_repeated_with_other_title_when_building_then_first_label_sticks() {
    let first = vec!["a".to_string(), "b".to_string()];
    let second = vec!["a".to_string(), "c".to_string()];
    let first_titles = vec!["Alt".to_string(), String::new()];
    let second_titles = vec!["Other".to_string(), String::new()];

    let mut builder = TrieBuilder::new();
    builder.add_row(&first, Some(first_titles.as_slice()));
    builder.add_row(&second, Some(second_titles.as_slice()));
    let tree = builder.build();

    assert_eq!(tree.item_list().len(), 1);
    assert_eq!(tree.item(tree.item_list()[0]).unwrap().label, "Alt");
}

#[test]
fn given_visitor_skipping_roots_when_visiting_then_children_not_seen() {
    let tree = sample_tree();
    let mut seen = Vec::new();

    tree.visit_sub_tree(|_id, item, column| {
        seen.push((item.value.clone(), column.map(|c| c.column_index())));
        Ok::<_, DomainError>(Visit::Skip)
    })
    .unwrap();

    assert_eq!(
        seen,
        vec![("Water".to_string(), Some(0)), ("Ball".to_string(), Some(0))]
    );
}

#[test]
fn given_more_columns_than_descriptors_when_visiting_then_descriptor_absent() {
    let tree = decode_str("V,A\nC,a,b\n").unwrap().tree;
    let mut columns = Vec::new();

    tree.visit_sub_tree(|_id, _item, column| {
        columns.push(column.and_then(|c| c.variable_name.clone()));
        Ok::<_, DomainError>(Visit::Descend)
    })
    .unwrap();

    assert_eq!(columns, vec![Some("A".to_string()), None]);
}

#[test]
fn given_visitor_error_when_visiting_then_walk_aborts() {
    let tree = sample_tree();
    let mut count = 0;

    let result = tree.visit_sub_tree(|_id, _item, _column| {
        count += 1;
        if count == 3 {
            return Err("stop");
        }
        Ok(Visit::Descend)
    });

    assert_eq!(result, Err("stop"));
    assert_eq!(count, 3);
}

#[test]
fn given_leaf_when_walking_to_root_then_path_is_leaf_first() {
    let tree = sample_tree();
    let leaf = tree.item_by_coordinates(&[1, 0, 0, 0]).unwrap().unwrap();

    let path: Vec<&str> = tree
        .path_to_root(leaf)
        .iter()
        .map(|item| item.value.as_str())
        .collect();

    assert_eq!(path, vec!["Paris St. Germain", "France", "Football", "Ball"]);
    assert!(tree.path_to_root(leaf).last().unwrap().is_root());
}
