use serde::{Deserialize, Serialize};
use crate::board::is_uci_move;
use crate::error::RecordError;

/// Attribute fields carried through to every example of a puzzle.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleAttributes {
    pub rating: u32,
    pub popularity: i32,
    pub rating_deviation: u32,
    pub themes: Vec<String>,
}

/// One source puzzle: a start position and its canonical solution line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleRecord {
    pub id: String,
    pub start_position: String,
    pub solution_moves: Vec<String>,
    pub attributes: PuzzleAttributes,
}

impl PuzzleRecord {
    pub fn new(id: &str, start_position: &str, solution_moves: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            start_position: start_position.to_string(),
            solution_moves: solution_moves.iter().map(|m| m.to_string()).collect(),
            attributes: PuzzleAttributes::default(),
        }
    }

    pub fn with_attributes(mut self, attributes: PuzzleAttributes) -> Self {
        self.attributes = attributes;
        self
    }
}

/// Parses a space-separated UCI move list. Any token that is not a
/// coordinate move rejects the whole list.
pub fn parse_move_list(raw: &str) -> Result<Vec<String>, RecordError> {
    raw.split_whitespace()
        .map(|tok| {
            if is_uci_move(tok) { Ok(tok.to_string()) } else { Err(RecordError::InvalidMove { token: tok.to_string() }) }
        })
        .collect()
}

pub fn parse_themes(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}
