//! Error types for the feature-extraction pipeline

use std::fmt;

/// Errors that can occur during feature extraction
#[derive(Debug, Clone)]
pub enum ExtractionError {
    /// Invalid input parameters (bad sizes, empty buffers, zero windows)
    InvalidInput(String),

    /// Audio decoding error
    DecodingError(String),

    /// Domain error on silent input: the requested quantity involves a
    /// division by zero or a logarithm of zero on an all-zero signal
    SilentInput(String),

    /// Numerical error (degenerate variance, transform failure, etc.)
    NumericalError(String),
}

impl fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            ExtractionError::DecodingError(msg) => write!(f, "Decoding error: {}", msg),
            ExtractionError::SilentInput(msg) => write!(f, "Silent input: {}", msg),
            ExtractionError::NumericalError(msg) => write!(f, "Numerical error: {}", msg),
        }
    }
}

impl std::error::Error for ExtractionError {}
