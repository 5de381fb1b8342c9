use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::board::is_uci_move;
use crate::error::RecordError;
use crate::puzzle::{PuzzleAttributes, PuzzleRecord};

/// Legal moves at a decision point, keyed by a dense index starting at 0.
///
/// Serialized as a `{"0": "e2e4", "1": "d2d4", ...}` object. Deserializing
/// validates that the keys are exactly `0..n` and every value is a
/// coordinate move.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct MoveOptions {
    moves: Vec<String>,
}

impl MoveOptions {
    pub fn from_moves(moves: Vec<String>) -> Self { Self { moves } }

    pub fn len(&self) -> usize { self.moves.len() }

    pub fn is_empty(&self) -> bool { self.moves.is_empty() }

    pub fn get(&self, index: usize) -> Option<&str> { self.moves.get(index).map(String::as_str) }

    pub fn index_of(&self, mv: &str) -> Option<usize> { self.moves.iter().position(|m| m == mv) }

    pub fn contains(&self, mv: &str) -> bool { self.index_of(mv).is_some() }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.moves.iter().enumerate().map(|(i, m)| (i, m.as_str()))
    }

    /// Parses a serialized options object.
    pub fn parse(raw: &str) -> Result<Self, RecordError> {
        serde_json::from_str(raw).map_err(|e| RecordError::InvalidOptions(e.to_string()))
    }
}

impl TryFrom<BTreeMap<String, String>> for MoveOptions {
    type Error = RecordError;

    fn try_from(raw: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        let mut indexed = Vec::with_capacity(raw.len());
        for (key, mv) in raw {
            let idx = key.trim().parse::<usize>()
                .map_err(|_| RecordError::InvalidOptions(format!("key `{key}` is not an index")))?;
            if !is_uci_move(&mv) {
                return Err(RecordError::InvalidMove { token: mv });
            }
            indexed.push((idx, mv));
        }
        indexed.sort_by_key(|(idx, _)| *idx);
        if indexed.iter().enumerate().any(|(i, (idx, _))| i != *idx) {
            return Err(RecordError::InvalidOptions("indices are not dense from 0".to_string()));
        }
        Ok(Self { moves: indexed.into_iter().map(|(_, mv)| mv).collect() })
    }
}

impl From<MoveOptions> for BTreeMap<String, String> {
    fn from(options: MoveOptions) -> Self {
        options.moves.into_iter().enumerate().map(|(i, mv)| (i.to_string(), mv)).collect()
    }
}

/// Everything about the source puzzle a downstream analysis may want.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleMetadata {
    pub attributes: PuzzleAttributes,
    pub solution_moves: Vec<String>,
    pub start_position: String,
    /// Opponent move already applied to reach the first decision position,
    /// when the example came from a precomputed single-ply row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setup_move: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_group: Option<String>,
}

impl ExampleMetadata {
    pub fn from_record(record: &PuzzleRecord, control_group: Option<&str>) -> Self {
        Self {
            attributes: record.attributes.clone(),
            solution_moves: record.solution_moves.clone(),
            start_position: record.start_position.clone(),
            setup_move: None,
            control_group: control_group.map(str::to_string),
        }
    }
}

/// One position at which a move must be chosen from the legal options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionExample {
    pub position: String,
    pub options: MoveOptions,
    pub expected_option: String,
    pub puzzle_id: String,
    pub ply_index: usize,
    pub metadata: ExampleMetadata,
}

impl DecisionExample {
    pub fn expected_index(&self) -> Option<usize> { self.options.index_of(&self.expected_option) }

    pub fn is_valid(&self) -> bool { !self.options.is_empty() && self.expected_index().is_some() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn opts(moves: &[&str]) -> MoveOptions {
        MoveOptions::from_moves(moves.iter().map(|m| m.to_string()).collect())
    }

    #[test]
    fn options_serialize_as_indexed_object() {
        let json = serde_json::to_string(&opts(&["e2e4", "d2d4"])).unwrap();
        assert_eq!(json, r#"{"0":"e2e4","1":"d2d4"}"#);
    }

    #[test]
    fn options_parse_orders_numerically() {
        let moves: Vec<String> = (0..12).map(|i| format!("a2a{}", (i % 6) + 3)).collect();
        let raw = serde_json::to_string(&MoveOptions::from_moves(moves.clone())).unwrap();
        let parsed = MoveOptions::parse(&raw).unwrap();
        assert_eq!(parsed.get(10), Some(moves[10].as_str()));
        assert_eq!(parsed.len(), 12);
    }

    #[test]
    fn options_parse_rejects_gaps_and_garbage() {
        assert!(MoveOptions::parse(r#"{"0":"e2e4","2":"d2d4"}"#).is_err());
        assert!(MoveOptions::parse(r#"{"x":"e2e4"}"#).is_err());
        assert!(MoveOptions::parse(r#"{"0":"castle"}"#).is_err());
        assert!(MoveOptions::parse("{0: 'e2e4'}").is_err());
    }

    #[test]
    fn index_lookup() {
        let o = opts(&["g1f3", "e2e4"]);
        assert_eq!(o.index_of("e2e4"), Some(1));
        assert!(!o.contains("a2a4"));
        assert_eq!(o.iter().collect::<Vec<_>>(), vec![(0, "g1f3"), (1, "e2e4")]);
    }
}
