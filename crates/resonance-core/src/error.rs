use std::fmt;

use crate::field::FieldName;

/// Precondition violations raised by the scorer. None of these are transient:
/// retrying with the same input yields the same error.
#[derive(Debug)]
pub enum ScoreError {
    /// Two vectors (or a vector and the CI dimension) disagree on length.
    DimensionMismatch { left: usize, right: usize },
    /// Zero-norm or non-finite vector; cosine direction is undefined.
    DegenerateVector,
    /// A field present in one map is absent from the other.
    MissingField(FieldName),
    /// Gate identifier outside the closed 1..=64 catalog.
    OutOfRange(i64),
    /// A field state value outside its documented range.
    InvalidField { field: FieldName, reason: String },
    /// Malformed wire document.
    Json(serde_json::Error),
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreError::DimensionMismatch { left, right } => {
                write!(f, "dimension mismatch: {left} vs {right}")
            }
            ScoreError::DegenerateVector => write!(f, "degenerate vector: zero or non-finite norm"),
            ScoreError::MissingField(name) => write!(f, "missing field: {name}"),
            ScoreError::OutOfRange(gate) => write!(f, "gate {gate} out of range 1..=64"),
            ScoreError::InvalidField { field, reason } => {
                write!(f, "invalid field {field}: {reason}")
            }
            ScoreError::Json(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for ScoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScoreError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ScoreError {
    fn from(e: serde_json::Error) -> Self {
        ScoreError::Json(e)
    }
}

pub type Result<T> = std::result::Result<T, ScoreError>;
