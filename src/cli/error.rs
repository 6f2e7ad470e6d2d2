//! CLI-level errors (wraps domain, dataset and config errors)

use thiserror::Error;

use crate::config::ConfigLoadError;
use crate::dataset::DatasetError;
use crate::domain::TreeError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Tree(#[from] TreeError),

    #[error("{0}")]
    Dataset(#[from] DatasetError),

    #[error("{0}")]
    Config(#[from] ConfigLoadError),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) => crate::exitcode::CONFIG,
            CliError::Dataset(e) => match e {
                DatasetError::Read { .. } => crate::exitcode::NOINPUT,
                DatasetError::Parse { .. } => crate::exitcode::DATAERR,
            },
            CliError::Tree(e) => match e {
                TreeError::NodeNotFound(_) => crate::exitcode::USAGE,
                TreeError::CycleDetected(_) | TreeError::DuplicateId(_) => {
                    crate::exitcode::DATAERR
                }
            },
        }
    }
}
