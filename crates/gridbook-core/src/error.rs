//! Error types for gridbook-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Which half of a coordinate an index belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Row => f.write_str("row"),
            Axis::Column => f.write_str("column"),
        }
    }
}

/// Errors that can occur in gridbook-core
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A negative row or column index was handed to the reference codec
    #[error("Negative {axis} index: {index}")]
    NegativeIndex { axis: Axis, index: i64 },

    /// A column or row label that cannot be decoded
    #[error("Invalid cell reference: {0}")]
    InvalidReference(String),

    /// Coordinates were requested from a reference parser that holds none
    #[error("Reference parser is not bound to a cell")]
    Unbound,

    /// Sheet index out of bounds
    #[error("Sheet index {0} out of bounds (count: {1})")]
    SheetOutOfBounds(usize, usize),

    /// Duplicate sheet name
    #[error("Sheet name already exists: {0}")]
    DuplicateSheetName(String),
}

impl Error {
    pub(crate) fn negative(axis: Axis, index: i64) -> Self {
        Error::NegativeIndex { axis, index }
    }
}
