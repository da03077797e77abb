// File: src/error.rs
// Purpose: Error type for caller mistakes at the raw-flag boundary

use thiserror::Error;

/// Errors raised by the form helpers.
///
/// These signal a bug in the calling code, not bad user input. Submitted
/// data that is missing or malformed is absorbed as an absent value instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Unknown data type: {0:#06b}")]
    UnknownDataType(u8),
}

pub type Result<T> = std::result::Result<T, FormError>;
