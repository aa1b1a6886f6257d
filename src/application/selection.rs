//! Selection handling: next-column options, form parsing and resolution fallbacks.

use std::borrow::Cow;
use std::collections::BTreeMap;

use tracing::{debug, instrument, warn};

use crate::domain::{DecisionTree, DomainError, DomainResult, Visit};

/// Index selection per variable name, as submitted by the host form.
pub type Selection = BTreeMap<String, usize>;

/// Resolved variable values, ready to inject into a build environment.
pub type ResolvedValues = BTreeMap<String, String>;

/// Display labels offered in the column after the one reached by `coordinates`.
///
/// An empty path yields the first column's options.
#[instrument(level = "debug", skip(tree))]
pub fn options_for(tree: &DecisionTree, coordinates: &[usize]) -> DomainResult<Vec<String>> {
    let mut last = None;
    tree.visit_selected_items(coordinates, |id, _item, _column| {
        last = Some(id);
        Ok::<_, DomainError>(Visit::Descend)
    })?;

    let items = match last {
        Some(id) => tree.item(id).map_or(&[][..], |item| item.children()),
        None => tree.item_list(),
    };
    Ok(items
        .iter()
        .filter_map(|&id| tree.item(id))
        .map(|item| item.display_label().to_string())
        .collect())
}

/// Convert submitted form fields into a selection.
///
/// The field named `parameter_name` and empty values are skipped; values that are
/// not non-negative integers are logged and skipped.
#[instrument(level = "debug", skip(form))]
pub fn selection_from_form(form: &BTreeMap<String, String>, parameter_name: &str) -> Selection {
    let mut selection = Selection::new();
    for (key, value) in form {
        if key == parameter_name || value.is_empty() {
            continue;
        }
        match value.parse::<usize>() {
            Ok(index) => {
                selection.insert(key.clone(), index);
            }
            Err(e) => warn!("Invalid index value {:?} for {}: {}", value, key, e),
        }
    }
    selection
}

/// Resolve a selection, falling back to an empty result when it does not fit the tree.
#[instrument(level = "debug", skip(tree))]
pub fn resolve_or_default(tree: &DecisionTree, selection: &Selection) -> ResolvedValues {
    match tree.resolve_values(selection) {
        Ok(values) => values,
        Err(e) => {
            warn!("Selection inconsistent with configuration: {}", e);
            ResolvedValues::new()
        }
    }
}

/// Render resolved values as `<prefix>NAME=value` lines, sorted by name.
///
/// Values are shell-quoted so each line can be evaluated by a POSIX shell.
pub fn render_exports(values: &ResolvedValues, prefix: &str) -> String {
    let mut env_vars = String::new();
    for (k, v) in values {
        let quoted = shell_escape::unix::escape(Cow::Borrowed(v.as_str()));
        env_vars.push_str(&format!("{}{}={}\n", prefix, k, quoted));
    }
    debug!("rendered {} variables", values.len());
    env_vars
}
