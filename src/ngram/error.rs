//! Error types for language-model construction.

use thiserror::Error;

/// Errors that can occur while building an n-gram model.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// The window size is not a positive integer.
    ///
    /// A window of zero tokens can tabulate nothing; construction fails
    /// immediately rather than producing a model that never predicts.
    #[error("window size must be positive, got {0}")]
    InvalidWindowSize(usize),
}

/// A specialized `Result` type for language-model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
