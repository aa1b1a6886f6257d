//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};
use clap_complete::Shell;

/// Cascading choice trees: check, format and resolve row-oriented choice configurations
#[derive(Parser, Debug)]
#[command(name = "choicetree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Turn debugging information on (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Cell delimiter, overrides configured settings
    #[arg(long, global = true)]
    pub delimiter: Option<char>,

    /// Print author and version
    #[arg(long)]
    pub info: bool,

    /// Generate shell completions
    #[arg(long = "generator", value_enum)]
    pub generator: Option<Shell>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a configuration file
    Check {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Print the canonical form of a configuration
    Fmt {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Write the canonical form back to the file
        #[arg(short, long)]
        write: bool,
    },

    /// Resolve a selection to variable assignments
    Resolve {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Selected child index per variable, e.g. SELECTED_SPORT=1
        #[arg(value_parser = parse_selection)]
        selections: Vec<(String, usize)>,
        /// Submitted form field, e.g. SELECTED_SPORT=1; inconsistent selections resolve to nothing
        #[arg(long = "form", value_name = "KEY=VALUE", value_parser = parse_form_field, conflicts_with = "selections")]
        form: Vec<(String, String)>,
    },

    /// List the options for the column after the given coordinates
    Options {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Child index per column, starting with the first
        coordinates: Vec<usize>,
    },

    /// Show the configuration as a tree
    Tree {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings as TOML
    Show,
    /// Show settings file locations
    Path,
}

/// Parse `NAME=INDEX`.
pub fn parse_selection(s: &str) -> Result<(String, usize), String> {
    let (name, index) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=INDEX, got {:?}", s))?;
    if name.is_empty() {
        return Err(format!("missing variable name in {:?}", s));
    }
    let index = index
        .parse::<usize>()
        .map_err(|e| format!("invalid index in {:?}: {}", s, e))?;
    Ok((name.to_string(), index))
}

/// Parse `KEY=VALUE`; the value may be empty.
pub fn parse_form_field(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {:?}", s))?;
    if key.is_empty() {
        return Err(format!("missing field name in {:?}", s));
    }
    Ok((key.to_string(), value.to_string()))
}
