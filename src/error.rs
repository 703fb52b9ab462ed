use std::path::PathBuf;

/// Errors produced by the board model, the searches and configuration loading
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid move, column {column} full")]
    IllegalMove { column: usize },

    #[error("Invalid move, column {column} out of range. Columns must be in 0..{cols}")]
    ColumnOutOfRange { column: usize, cols: usize },

    #[error("cannot undo a move in empty column {column}")]
    EmptyColumn { column: usize },

    #[error("no legal move available, the board is full")]
    NoLegalMove,

    #[error("invalid board dimensions {rows}x{cols}, both must be at least {}", crate::WINDOW)]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("invalid board: {0}")]
    InvalidBoard(String),

    #[error("invalid search configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
