//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod error;
pub mod error_ext;
pub mod selection;
pub mod services;
pub mod validation;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use selection::{
    options_for, render_exports, resolve_or_default, selection_from_form, ResolvedValues,
    Selection,
};
pub use validation::{check_configuration, Validation, CONFIGURATION_IS_EMPTY};
