//! Unified error type.

use thiserror::Error;

/// Boxed error produced by a request body stream.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The error type returned by the crate's fallible operations.
///
/// Application-level outcomes (404, 405, etc.) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// infrastructure failures and the two ways a request body can be unusable.
#[derive(Debug, Error)]
pub enum Error {
    /// Binding the listener failed. Accept errors are logged, not returned.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// The request body could not be read to completion.
    #[error("failed to read request body: {0}")]
    BodyRead(#[source] BoxError),

    /// The request body is not a JSON article.
    #[error("failed to decode request body: {0}")]
    Decode(#[from] serde_json::Error),
}
