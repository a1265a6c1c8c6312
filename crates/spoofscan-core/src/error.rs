use thiserror::Error;

/// Precondition failures raised by the LBP engine and its helpers.
///
/// None of these are transient: a failing call fails the same way on retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LbpError {
    #[error("pixel ({row}, {col}) has no full 8-neighborhood in a {rows}x{cols} cell")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("invalid cell size {rows}x{cols} (cells must be square and at most 20 pixels)")]
    InvalidCellSize { rows: usize, cols: usize },

    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}
