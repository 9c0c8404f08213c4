use thiserror::Error;

/// All errors coming from the database/query layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// Any MySQL driver error.
    #[error("MySQL error: {0}")]
    MySql(#[from] mysql_async::Error),

    /// The driver reported an affected-row count we cannot represent.
    #[error("Rows affected error: {0}")]
    RowsAffected(String),

    /// A catalog value could not be decoded into the expected type.
    #[error("Failed to decode column '{column}': {message}")]
    Decode { column: String, message: String },

    /// A pool cannot be sized to zero connections.
    #[error("Invalid pool size: {0}")]
    InvalidPoolSize(usize),
}

/// Errors happening during adapter or connection setup.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// The connection URL could not be parsed.
    #[error("Invalid connection URL: {0}")]
    Url(#[from] mysql_async::UrlError),

    /// The server could not be reached.
    #[error("Connection failed: {0}")]
    Connect(#[from] mysql_async::Error),

    /// The pool could not be configured.
    #[error("Pool setup failed: {0}")]
    Pool(#[from] DbError),
}
