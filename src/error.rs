//! Error types shared by the board constructors and the puzzle parsers.
use thiserror::Error;

/// Reasons a grid cannot be turned into a [`Board`](crate::engine::Board).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("board has no cells")]
    Empty,

    #[error("row {row} has {found} cells (expected {expected})")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("board must be at least 2x2, got {rows}x{cols}")]
    TooSmall { rows: usize, cols: usize },

    #[error("value {value} is out of range for a {rows}x{cols} board")]
    ValueOutOfRange { value: u32, rows: usize, cols: usize },

    #[error("value {0} appears more than once")]
    DuplicateValue(u32),

    /// Flat cells handed to a goal layout of a different size.
    #[error("goal layout holds {expected} cells, got {found}")]
    CellCount { expected: usize, found: usize },
}

/// Errors raised while reading a textual puzzle description.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("puzzle description is empty")]
    Empty,

    #[error("missing '{0}' in puzzle description")]
    MissingDelimiter(char),

    #[error("dimensions must look like \"(rows, cols)\", found \"{0}\"")]
    BadDimensions(String),

    #[error("'{token}' is not a tile number (line {line})")]
    InvalidNumber { token: String, line: usize },

    #[error("expected {expected} tile values, found {found}")]
    CountMismatch { expected: usize, found: usize },

    #[error(transparent)]
    Board(#[from] BoardError),
}
