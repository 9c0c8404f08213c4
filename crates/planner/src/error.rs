use model::errors::ValidationError;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failures while reading `information_schema`.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog query failed: {source}")]
    Query {
        #[source]
        source: BoxError,
    },

    #[error("failed to read catalog row: {source}")]
    Scan {
        #[source]
        source: BoxError,
    },
}

impl CatalogError {
    pub fn query(err: impl Into<BoxError>) -> Self {
        CatalogError::Query { source: err.into() }
    }

    pub fn scan(err: impl Into<BoxError>) -> Self {
        CatalogError::Scan { source: err.into() }
    }
}

/// Anything that stops a planning pass. Nothing has been altered when one of these is returned.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("invalid selection: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    CatalogRead(#[from] CatalogError),
}
