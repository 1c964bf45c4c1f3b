//! Error types for the Lorikeet library.
//!
//! All errors are represented by the [`LorikeetError`] enum, which provides
//! detailed information about what went wrong.
//!
//! # Examples
//!
//! ```
//! use lorikeet::error::{LorikeetError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(LorikeetError::corpus("missing intents file"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for Lorikeet operations.
///
/// This enum represents all possible errors that can occur in the library.
/// It uses the `thiserror` crate for automatic `Error` trait implementation
/// and provides convenient constructor methods for creating specific error
/// types.
#[derive(Error, Debug)]
pub enum LorikeetError {
    /// I/O errors (file operations, network, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Incompatible operand shapes for a matrix product
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Incompatible dimensions for an elementwise matrix operation
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Text analysis errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Stemming capability failures
    #[error("Stemming error: {0}")]
    Stemming(String),

    /// Missing or malformed corpus resources
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// Training run failures
    #[error("Training error: {0}")]
    Training(String),

    /// Control endpoint errors
    #[error("Server error: {0}")]
    Server(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with LorikeetError.
pub type Result<T> = std::result::Result<T, LorikeetError>;

impl LorikeetError {
    /// Create a new shape mismatch error.
    pub fn shape_mismatch<S: Into<String>>(msg: S) -> Self {
        LorikeetError::ShapeMismatch(msg.into())
    }

    /// Create a new dimension mismatch error.
    pub fn dimension_mismatch<S: Into<String>>(msg: S) -> Self {
        LorikeetError::DimensionMismatch(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        LorikeetError::Analysis(msg.into())
    }

    /// Create a new stemming error.
    pub fn stemming<S: Into<String>>(msg: S) -> Self {
        LorikeetError::Stemming(msg.into())
    }

    /// Create a new corpus error.
    pub fn corpus<S: Into<String>>(msg: S) -> Self {
        LorikeetError::Corpus(msg.into())
    }

    /// Create a new training error.
    pub fn training<S: Into<String>>(msg: S) -> Self {
        LorikeetError::Training(msg.into())
    }

    /// Create a new server error.
    pub fn server<S: Into<String>>(msg: S) -> Self {
        LorikeetError::Server(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LorikeetError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = LorikeetError::shape_mismatch("2x3 by 2x3");
        assert_eq!(error.to_string(), "Shape mismatch: 2x3 by 2x3");

        let error = LorikeetError::corpus("missing intents file");
        assert_eq!(error.to_string(), "Corpus error: missing intents file");

        let error = LorikeetError::stemming("unsupported locale");
        assert_eq!(error.to_string(), "Stemming error: unsupported locale");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let lorikeet_error = LorikeetError::from(io_error);

        match lorikeet_error {
            LorikeetError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
