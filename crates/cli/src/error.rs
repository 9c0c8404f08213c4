use connectors::sql::base::error::{ConnectorError, DbError};
use engine_runtime::error::RuntimeError;
use model::errors::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to write the report: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize the report to JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid selection: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to run the alteration: {0}")]
    Runtime(#[from] RuntimeError),

    #[error("Failed to connect: {0}")]
    Connector(#[from] ConnectorError),

    #[error("Database error: {0}")]
    Database(#[from] DbError),
}
