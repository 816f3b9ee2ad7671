use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid board dimensions {rows}x{cols}, both must be positive")]
    InvalidDimension { rows: usize, cols: usize },

    #[error("cell ({row}, {col}) is outside the {rows}x{cols} board")]
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
