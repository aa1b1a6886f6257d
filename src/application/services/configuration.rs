//! Configuration file service
//!
//! Loads configuration files through the filesystem boundary and runs the
//! decode, check, format and selection use cases on them.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::selection::{
    options_for, resolve_or_default, selection_from_form, ResolvedValues, Selection,
};
use crate::application::validation::{check_configuration, Validation};
use crate::application::{ApplicationResult, IoResultExt};
use crate::codec::{decode, encode_to_string, Decoded};
use crate::domain::TreeDisplay;
use crate::infrastructure::traits::FileSystem;

/// Service operating on configuration files.
pub struct ConfigurationService {
    fs: Arc<dyn FileSystem>,
    delimiter: u8,
}

impl ConfigurationService {
    /// Create a new configuration service splitting cells on `delimiter`.
    pub fn new(fs: Arc<dyn FileSystem>, delimiter: u8) -> Self {
        Self { fs, delimiter }
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    fn read(&self, path: &Path) -> ApplicationResult<Vec<u8>> {
        self.fs
            .read(path)
            .with_path_context("read configuration", path)
    }

    /// Decode the configuration stored at `path`.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<Decoded> {
        let bytes = self.read(path)?;
        let decoded = decode(bytes.as_slice(), self.delimiter)?;
        debug!(
            "load: {} roots, {} variables",
            decoded.tree.item_list().len(),
            decoded.tree.variable_descriptions().len()
        );
        Ok(decoded)
    }

    pub fn check(&self, path: &Path) -> ApplicationResult<Validation> {
        let bytes = self.read(path)?;
        match std::str::from_utf8(&bytes) {
            Ok(text) => Ok(check_configuration(text, self.delimiter)),
            Err(e) => Ok(Validation::Error(format!(
                "configuration is not valid UTF-8: {}",
                e
            ))),
        }
    }

    /// Canonical text of the configuration; written back to `path` when `write` is set.
    #[instrument(level = "debug", skip(self))]
    pub fn format(&self, path: &Path, write: bool) -> ApplicationResult<String> {
        let bytes = self.read(path)?;
        let decoded = decode(bytes.as_slice(), self.delimiter)?;
        let canonical = encode_to_string(&decoded.tree, self.delimiter)?;
        if write && canonical.as_bytes() != bytes.as_slice() {
            self.fs
                .write(path, &canonical)
                .with_path_context("write configuration", path)?;
            debug!("format: rewrote {}", path.display());
        }
        Ok(canonical)
    }

    /// Resolve a selection strictly: out-of-range indices are errors.
    pub fn resolve(&self, path: &Path, selection: &Selection) -> ApplicationResult<ResolvedValues> {
        let decoded = self.load(path)?;
        Ok(decoded.tree.resolve_values(selection)?)
    }

    /// Resolve submitted form fields leniently.
    ///
    /// The `parameter_name` field is skipped, unparsable values are dropped and a
    /// selection that does not fit the tree yields an empty result.
    #[instrument(level = "debug", skip(self, form))]
    pub fn resolve_form(
        &self,
        path: &Path,
        form: &BTreeMap<String, String>,
        parameter_name: &str,
    ) -> ApplicationResult<ResolvedValues> {
        let decoded = self.load(path)?;
        let selection = selection_from_form(form, parameter_name);
        Ok(resolve_or_default(&decoded.tree, &selection))
    }

    pub fn options(&self, path: &Path, coordinates: &[usize]) -> ApplicationResult<Vec<String>> {
        let decoded = self.load(path)?;
        Ok(options_for(&decoded.tree, coordinates)?)
    }

    pub fn tree(&self, path: &Path) -> ApplicationResult<String> {
        let decoded = self.load(path)?;
        Ok(decoded.tree.to_tree_string().to_string())
    }
}
