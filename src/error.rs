//! Error types for the simulation engine

use thiserror::Error;

/// Errors raised by grid construction and cell accessors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    InvalidDimension { rows: usize, cols: usize },
    #[error("cell ({row}, {col}) is out of range for a {rows}x{cols} grid")]
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("seeding density {0} must be between 0.0 and 1.0")]
    InvalidDensity(f64),
}

pub type EngineResult<T> = Result<T, EngineError>;
