//! Error types for the command-line front end.

use nd_core::CoreError;
use nd_dynamics::DynError;
use nd_vectors::VectorError;
use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Run file error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid run file: {what}")]
    InvalidConfig { what: String },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Dynamics(#[from] DynError),

    #[error(transparent)]
    Vectors(#[from] VectorError),
}
