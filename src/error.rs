//! Error type for configuration of geometry providers.

use thiserror::Error;

/// Result type for model construction and validated setters.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported when a geometry configuration is rejected.
///
/// Geometry itself never fails: degenerate quads are classified, not
/// reported.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A parameter lies outside its allowed range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }
}
