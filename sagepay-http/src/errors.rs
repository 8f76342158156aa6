/// Error types for mapping Sage Pay messages onto HTTP.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Errors raised by the message types themselves.
    #[error(transparent)]
    Core(#[from] sagepay_core::errors::Error),

    /// The HTTP request could not be assembled.
    #[error("HTTP error: {0}")]
    Http(#[from] http::Error),

    /// A header value contained characters HTTP does not allow.
    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),
}

/// A specialized `Result` type for Sage Pay HTTP operations.
pub type Result<T> = std::result::Result<T, Error>;
