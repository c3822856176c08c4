use thiserror::Error;

use crate::polygon::PolygonFailureType;

/// Errors from polygon construction and mutation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PolygonError {
    #[error("polygon validation failed: {0}")]
    Invalid(PolygonFailureType),

    #[error("triangle index {index} is out of range for {len} vertices")]
    IndexOutOfRange { index: u32, len: usize },

    #[error("triangulation failed: {0}")]
    Triangulation(String),
}

impl PolygonError {
    /// The validation classification behind this error, if any
    pub fn failure_type(&self) -> Option<PolygonFailureType> {
        match self {
            PolygonError::Invalid(kind) => Some(*kind),
            _ => None,
        }
    }
}
