//! CLI-level errors (wraps application and infrastructure errors)

use std::io;

use thiserror::Error;

use crate::application::ApplicationError;
use crate::codec::CodecError;
use crate::domain::DomainError;
use crate::exitcode;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("{0}")]
    Infra(#[from] InfraError),

    /// Configuration content rejected by a check
    #[error("{0}")]
    InvalidData(String),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Usage(_) => exitcode::USAGE,
            CliError::InvalidData(_) => exitcode::DATAERR,
            CliError::Application(e) => application_exit_code(e),
            CliError::Infra(e) => match e {
                InfraError::Io { .. } => exitcode::IOERR,
                InfraError::Application(e) => application_exit_code(e),
            },
        }
    }
}

fn application_exit_code(e: &ApplicationError) -> i32 {
    match e {
        ApplicationError::Domain(e) | ApplicationError::Codec(CodecError::Domain(e)) => match e {
            DomainError::IndexOutOfBounds { .. } => exitcode::DATAERR,
            DomainError::UnknownItem(_) => exitcode::SOFTWARE,
        },
        ApplicationError::Codec(CodecError::Csv(_)) => exitcode::DATAERR,
        ApplicationError::Codec(CodecError::Io(_)) => exitcode::IOERR,
        ApplicationError::Config { .. } => exitcode::CONFIG,
        ApplicationError::OperationFailed { source, .. } => match source.downcast_ref::<io::Error>() {
            Some(io_err) if io_err.kind() == io::ErrorKind::NotFound => exitcode::NOINPUT,
            _ => exitcode::IOERR,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_selection_is_data_error() {
        let err = CliError::from(ApplicationError::Domain(DomainError::IndexOutOfBounds {
            index: 3,
            len: 2,
        }));
        assert_eq!(err.exit_code(), exitcode::DATAERR);
        assert_eq!(
            err.to_string(),
            "index out of bounds: index 3, but only 2 items available"
        );
    }

    #[test]
    fn test_missing_file_is_no_input() {
        let err = CliError::from(ApplicationError::OperationFailed {
            context: "read configuration: teams.csv".into(),
            source: Box::new(io::Error::new(io::ErrorKind::NotFound, "missing")),
        });
        assert_eq!(err.exit_code(), exitcode::NOINPUT);
    }

    #[test]
    fn test_config_error_through_infra() {
        let err = CliError::from(InfraError::from(ApplicationError::Config {
            message: "bad delimiter".into(),
        }));
        assert_eq!(err.exit_code(), exitcode::CONFIG);
        assert_eq!(CliError::Usage("x".into()).exit_code(), exitcode::USAGE);
    }
}
