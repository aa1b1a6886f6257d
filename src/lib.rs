//! Cascading choice trees
//!
//! A configuration is a list of value combinations, one per `C` row, with one
//! column per variable. Decoding merges shared prefixes into a decision trie;
//! a selection of one child index per column resolves to `{variable -> value}`.
//!
//! Layers, innermost first: [`domain`] (tree, trie builder, traversal),
//! [`codec`] (row grammar), [`application`] (selection, validation, services),
//! [`infrastructure`] (filesystem, wiring) and [`cli`].

pub mod application;
pub mod cli;
pub mod codec;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
