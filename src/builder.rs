//! Expands a puzzle into one decision example per ply by replaying its
//! solution line from the start position.

use crate::board::Position;
use crate::error::BuildError;
use crate::example::{DecisionExample, ExampleMetadata, MoveOptions};
use crate::puzzle::PuzzleRecord;

/// Builds the decision examples for `record`.
///
/// Returns `Ok(None)` when the record has no solution moves. On success the
/// sequence has exactly one example per solution move; any failure discards
/// the whole record.
pub fn build_examples(record: &PuzzleRecord, control_group: Option<&str>) -> Result<Option<Vec<DecisionExample>>, BuildError> {
    if record.solution_moves.is_empty() { return Ok(None); }
    let metadata = ExampleMetadata::from_record(record, control_group);
    let mut pos = Position::from_fen(&record.start_position)
        .map_err(|source| BuildError::InvalidPosition { puzzle_id: record.id.clone(), source })?;

    let last = record.solution_moves.len() - 1;
    let mut examples = Vec::with_capacity(record.solution_moves.len());
    for (ply, expected) in record.solution_moves.iter().enumerate() {
        examples.push(snapshot(&pos, expected, &record.id, ply, metadata.clone())?);
        if ply < last {
            // the expected move is already known to be among the options
            pos.play_uci(expected).map_err(|_| BuildError::IllegalReplayMove {
                puzzle_id: record.id.clone(), ply, mv: expected.clone(),
            })?;
        }
    }
    Ok(Some(examples))
}

/// Captures one decision point at `pos`. Fails if there is nothing to choose
/// from or if `expected` is not one of the legal options.
pub fn snapshot(pos: &Position, expected: &str, puzzle_id: &str, ply_index: usize, metadata: ExampleMetadata) -> Result<DecisionExample, BuildError> {
    let options = MoveOptions::from_moves(pos.legal_moves());
    if options.is_empty() {
        return Err(BuildError::EmptyLegalMoveSet { puzzle_id: puzzle_id.to_string(), ply: ply_index });
    }
    if !options.contains(expected) {
        return Err(BuildError::IllegalReplayMove { puzzle_id: puzzle_id.to_string(), ply: ply_index, mv: expected.to_string() });
    }
    Ok(DecisionExample {
        position: pos.to_fen(),
        options,
        expected_option: expected.to_string(),
        puzzle_id: puzzle_id.to_string(),
        ply_index,
        metadata,
    })
}
