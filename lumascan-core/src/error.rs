use thiserror::Error;

/// Custom error types for lumascan.
///
/// Every variant is terminal for the current scan: the library surfaces one
/// error value and produces no partial event list.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed report: {message}")]
    Malformed {
        message: String,
        /// Byte offset into the document, when the reader can supply one.
        offset: Option<u64>,
    },

    #[error("Incomplete media information: {0}")]
    IncompleteMedia(String),

    #[error("Scan cancelled")]
    Cancelled,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CoreError {
    /// Shorthand for a syntax-level report error with a known byte offset.
    pub(crate) fn malformed_at(message: impl Into<String>, offset: u64) -> Self {
        let message = message.into();
        CoreError::Malformed {
            message: format!("{message} (byte {offset})"),
            offset: Some(offset),
        }
    }
}

/// Result type for lumascan operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;
