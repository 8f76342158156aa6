/// Error types for Sage Pay core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An inbound 3-D Secure result carries neither a `cres` nor a `PaRes` value.
    #[error("Validation error: {0}")]
    Validation(String),

    /// JSON serialization/deserialization errors, including malformed error bodies.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Endpoint or resource URL could not be built.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Missing or unusable configuration value.
    #[error("Config error: {0}")]
    Config(String),
}

/// A specialized `Result` type for Sage Pay core operations.
pub type Result<T> = std::result::Result<T, Error>;
