//! Configuration checks reported back to whoever edits the configuration.

use std::fmt;

use tracing::{debug, instrument};

use crate::codec::decode;

/// Message for blank configuration text.
pub const CONFIGURATION_IS_EMPTY: &str = "configuration is empty";

/// Outcome of checking configuration text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Ok,
    /// Usable, but structurally suspicious.
    Warning(String),
    Error(String),
}

impl Validation {
    pub fn is_error(&self) -> bool {
        matches!(self, Validation::Error(_))
    }
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validation::Ok => write!(f, "ok"),
            Validation::Warning(msg) => write!(f, "warning: {}", msg),
            Validation::Error(msg) => write!(f, "error: {}", msg),
        }
    }
}

/// Check configuration text as it would be stored.
///
/// Blank text is an error; a decoder validation message is a warning.
#[instrument(level = "debug", skip(text))]
pub fn check_configuration(text: &str, delimiter: u8) -> Validation {
    if text.trim().is_empty() {
        return Validation::Error(CONFIGURATION_IS_EMPTY.to_string());
    }
    match decode(text.as_bytes(), delimiter) {
        Ok(decoded) => match decoded.validation {
            Some(msg) => {
                debug!("validation message: {}", msg);
                Validation::Warning(msg)
            }
            None => Validation::Ok,
        },
        Err(e) => Validation::Error(e.to_string()),
    }
}
