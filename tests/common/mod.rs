//! Shared fixtures for integration tests
#![allow(dead_code)]

use choicetree::codec::decode_str;
use choicetree::domain::DecisionTree;

/// Four-column configuration with two title rows.
pub const INPUT_CSV: &str = "H,Type,Sport,Country,Team\n\
V,SELECTED_TYPE,SELECTED_SPORT,SELECTED_COUNTRY,SELECTED_TEAM\n\
C,Water,Wakeboarding,Germany,WSC Duisburg Rheinhausen\n\
C,Water,Wakeboarding,Germany,WSC Paderborn\n\
C,Water,Wakeboarding,Austria,WSC Wien\n\
T,,,,Alternative team name\n\
C,Water,Waterball,Germany,Waterball Team\n\
C,Water,Surfing,England,Bristol Surf Team\n\
C,Ball,Football,France,Paris St. Germain\n\
T,,,,Alternative team name\n\
C,Ball,Handball,Germany,THW Kiel\n";

/// Same combinations as [`INPUT_CSV`] without title rows.
pub const INPUT_NO_TITLES: &str = "H,Type,Sport,Country,Team\n\
V,SELECTED_TYPE,SELECTED_SPORT,SELECTED_COUNTRY,SELECTED_TEAM\n\
C,Water,Wakeboarding,Germany,WSC Duisburg Rheinhausen\n\
C,Water,Wakeboarding,Germany,WSC Paderborn\n\
C,Water,Wakeboarding,Austria,WSC Wien\n\
C,Water,Waterball,Germany,Waterball Team\n\
C,Water,Surfing,England,Bristol Surf Team\n\
C,Ball,Football,France,Paris St. Germain\n\
C,Ball,Handball,Germany,THW Kiel\n";

/// Cells containing the delimiter.
pub const INPUT_QUOTED: &str = "H,Component,Container,Machine\n\
V,SELECTED_COMPONENT,SELECTED_CONTAINER,MACHINES\n\
C,component1,container1,\"machine1,machine2\"\n\
C,component2,container1,\"machine3,machine4\"\n\
C,component3,container2,\"machine1,machine2\"\n";

pub fn sample_tree() -> DecisionTree {
    choicetree::util::testing::init_test_setup();
    decode_str(INPUT_CSV).expect("decode sample").tree
}

/// Values of `ids`, in order.
pub fn values(tree: &DecisionTree, ids: &[choicetree::domain::ItemId]) -> Vec<String> {
    ids.iter()
        .map(|&id| tree.item(id).expect("known item").value.clone())
        .collect()
}
