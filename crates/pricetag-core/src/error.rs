//! Error types for the pricetag-core library.

use thiserror::Error;

/// Main error type for the pricetag library.
///
/// Unparseable prices are not errors: they come back as `None` fields on
/// [`crate::Price`]. Only caller mistakes and configuration problems land here.
#[derive(Error, Debug)]
pub enum PriceError {
    /// Decimal separator other than `.` or `,`.
    #[error("invalid decimal separator {0:?}: expected '.' or ','")]
    InvalidDecimalSeparator(String),

    /// Configuration content is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Currency table pattern could not be compiled.
    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the pricetag library.
pub type Result<T> = std::result::Result<T, PriceError>;
