//! Error types for the oracle CLI

use feels_oracle_adapter::AdapterError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error(transparent)]
    Adapter(#[from] AdapterError),
}

impl CliError {
    pub fn invalid_parameter(parameter: &str, value: &str, expected: &str) -> Self {
        CliError::InvalidConfig(format!("{parameter} = {value}, expected {expected}"))
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::SerializationError(err.to_string())
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::InvalidConfig(err.to_string())
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(err: toml::ser::Error) -> Self {
        CliError::SerializationError(err.to_string())
    }
}

pub type CliResult<T> = Result<T, CliError>;
