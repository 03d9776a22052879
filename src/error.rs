use std::path::PathBuf;

use crate::board::{Pos, Side};

/// Errors from parsing a board diagram.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardParseError {
    #[error("expected 6 rows, found {found}")]
    RowCount { found: usize },

    #[error("row {row} has {found} cells, expected 6")]
    RowLength { row: usize, found: usize },

    #[error("invalid cell {found:?} at row {row}, col {col}")]
    InvalidCell { row: usize, col: usize, found: char },
}

/// A strategy or player broke the rules. The driver treats this as a forfeit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleViolation {
    #[error("{side} chose no move despite having legal moves")]
    NoMoveChosen { side: Side },

    #[error("{side} chose illegal move {pos}")]
    IllegalMove { side: Side, pos: Pos },

    #[error("{side} cannot pass while legal moves exist")]
    PassWithLegalMoves { side: Side },

    #[error("the game is already over")]
    GameOver,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
