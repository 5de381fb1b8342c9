use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("invalid FEN `{fen}`: {reason}")]
    InvalidFen { fen: String, reason: String },
    #[error("`{mv}` is not a coordinate move")]
    BadMoveSyntax { mv: String },
    #[error("illegal move `{mv}` in `{fen}`")]
    IllegalMove { mv: String, fen: String },
}

/// A stored field that does not parse into the in-memory record shape.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("invalid move `{token}` in move list")]
    InvalidMove { token: String },
    #[error("field `{field}` is not a number: `{value}`")]
    InvalidNumber { field: &'static str, value: String },
    #[error("invalid move options: {0}")]
    InvalidOptions(String),
}

/// Why a single puzzle could not be expanded into decision examples.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("puzzle {puzzle_id}: malformed record: {reason}")]
    MalformedRecord { puzzle_id: String, reason: String },
    #[error("puzzle {puzzle_id}: {source}")]
    InvalidPosition { puzzle_id: String, source: BoardError },
    #[error("puzzle {puzzle_id}: move `{mv}` at ply {ply} is not legal")]
    IllegalReplayMove { puzzle_id: String, ply: usize, mv: String },
    #[error("puzzle {puzzle_id}: no legal moves at ply {ply}")]
    EmptyLegalMoveSet { puzzle_id: String, ply: usize },
}

impl BuildError {
    pub fn puzzle_id(&self) -> &str {
        match self {
            BuildError::MalformedRecord { puzzle_id, .. }
            | BuildError::InvalidPosition { puzzle_id, .. }
            | BuildError::IllegalReplayMove { puzzle_id, .. }
            | BuildError::EmptyLegalMoveSet { puzzle_id, .. } => puzzle_id,
        }
    }
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("{labels} control-group labels for {records} records")]
    LabelMismatch { records: usize, labels: usize },
}

#[derive(Debug, Error)]
pub enum IoError {
    #[error("{}: {source}", .path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("{}:{line}: {source}", .path.display())]
    Json { path: PathBuf, line: usize, source: serde_json::Error },
    #[error("no usable examples in {}", .path.display())]
    EmptyDevset { path: PathBuf },
}
