use serde::{Deserialize, Serialize};

/// Result alias used throughout the sieve engine.
pub type SieveResult<T> = Result<T, SieveError>;

/// Errors that can occur while sieving, rendering or persisting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum SieveError {
    /// A limit or count outside the accepted domain (e.g. negative).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The requested visualization format is not recognised.
    #[error("unsupported visualization format: {0}")]
    UnsupportedFormat(String),

    /// A configured cap was hit or the allocator refused the sieve buffer.
    #[error("resource exhausted: {0}")]
    ResourceExhausted(String),

    /// The PNG encoder rejected the bitmap.
    #[error("image encoding failed: {0}")]
    Encoding(String),

    /// The injected image store failed to persist the image.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl From<png::EncodingError> for SieveError {
    fn from(err: png::EncodingError) -> Self {
        SieveError::Encoding(err.to_string())
    }
}
