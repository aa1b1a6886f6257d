//! Domain layer: decision items, column descriptors, the tree and its builder
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod descriptor;
pub mod error;
pub mod item;
pub mod tree;
pub mod tree_traits;

pub use builder::TrieBuilder;
pub use descriptor::VariableDescriptor;
pub use error::{DomainError, DomainResult};
pub use item::{DecisionItem, ItemId};
pub use tree::{DecisionTree, Visit};
pub use tree_traits::TreeDisplay;
