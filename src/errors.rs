use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphQueryError {
    #[error("connection error: {0}")]
    ConnectionError(String),
    #[error("schema error: {0}")]
    SchemaError(String),
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
    #[error("unsupported index: {0}")]
    UnsupportedIndex(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Failure reported by SQLite while executing a statement, passed through as-is.
    #[error(transparent)]
    Backend(#[from] rusqlite::Error),
}

impl GraphQueryError {
    pub fn connection<T: Into<String>>(msg: T) -> Self {
        GraphQueryError::ConnectionError(msg.into())
    }

    pub fn schema<T: Into<String>>(msg: T) -> Self {
        GraphQueryError::SchemaError(msg.into())
    }

    pub fn invalid_pattern<T: Into<String>>(msg: T) -> Self {
        GraphQueryError::InvalidPattern(msg.into())
    }

    pub fn unsupported_index<T: Into<String>>(msg: T) -> Self {
        GraphQueryError::UnsupportedIndex(msg.into())
    }

    pub fn invalid_input<T: Into<String>>(msg: T) -> Self {
        GraphQueryError::InvalidInput(msg.into())
    }
}
