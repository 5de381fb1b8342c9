//! Reproducible subset selection over a puzzle population.
//!
//! Randomness always comes from a caller-owned RNG, so two runs seeded the
//! same way (`SmallRng::seed_from_u64(seed)`) draw the same rows in the same
//! order.

use std::borrow::Borrow;
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use crate::board::Position;
use crate::builder::snapshot;
use crate::dataset::{assemble, Assembly};
use crate::error::{BuildError, DatasetError};
use crate::example::{DecisionExample, ExampleMetadata};
use crate::puzzle::{PuzzleAttributes, PuzzleRecord};

pub const DEFAULT_SAMPLE_SIZE: usize = 1000;
pub const DEFAULT_SEED: u64 = 42;

/// Uniform draw without replacement. A size larger than the population is
/// clamped to the population size.
#[derive(Clone, Copy, Debug)]
pub struct UniformSampler {
    pub size: usize,
}

impl Default for UniformSampler {
    fn default() -> Self { Self { size: DEFAULT_SAMPLE_SIZE } }
}

impl UniformSampler {
    pub fn new(size: usize) -> Self { Self { size } }

    pub fn sample<'a, T, R: Rng + ?Sized>(&self, population: &'a [T], rng: &mut R) -> Vec<&'a T> {
        let amount = self.size.min(population.len());
        rand::seq::index::sample(rng, population.len(), amount)
            .into_iter()
            .map(|i| &population[i])
            .collect()
    }
}

/// A puzzle stored with the opponent's setup move already applied: one
/// decision, no replay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrecomputedRow {
    pub puzzle_id: String,
    pub initial_position: String,
    pub setup_move: String,
    pub puzzle_position: String,
    pub expected_move: String,
    pub attributes: PuzzleAttributes,
}

impl PrecomputedRow {
    /// Applies the record's first move (the opponent's) and takes the second
    /// as the move to find.
    pub fn from_record(record: &PuzzleRecord) -> Result<Self, BuildError> {
        let (setup, expected) = match record.solution_moves.as_slice() {
            [setup, expected, ..] => (setup, expected),
            _ => return Err(BuildError::MalformedRecord {
                puzzle_id: record.id.clone(),
                reason: format!("{} solution moves, need a setup move and a reply", record.solution_moves.len()),
            }),
        };
        let mut pos = Position::from_fen(&record.start_position)
            .map_err(|source| BuildError::InvalidPosition { puzzle_id: record.id.clone(), source })?;
        pos.play_uci(setup).map_err(|_| BuildError::IllegalReplayMove {
            puzzle_id: record.id.clone(), ply: 0, mv: setup.clone(),
        })?;
        Ok(Self {
            puzzle_id: record.id.clone(),
            initial_position: record.start_position.clone(),
            setup_move: setup.clone(),
            puzzle_position: pos.to_fen(),
            expected_move: expected.clone(),
            attributes: record.attributes.clone(),
        })
    }

    pub fn to_example(&self) -> Result<DecisionExample, BuildError> {
        let pos = Position::from_fen(&self.puzzle_position)
            .map_err(|source| BuildError::InvalidPosition { puzzle_id: self.puzzle_id.clone(), source })?;
        let metadata = ExampleMetadata {
            attributes: self.attributes.clone(),
            solution_moves: vec![self.expected_move.clone()],
            start_position: self.initial_position.clone(),
            setup_move: Some(self.setup_move.clone()),
            control_group: None,
        };
        snapshot(&pos, &self.expected_move, &self.puzzle_id, 0, metadata)
    }
}

#[derive(Debug, Default)]
pub struct SinglePlySample {
    pub examples: Vec<DecisionExample>,
    pub skipped: Vec<BuildError>,
}

/// Draws rows and turns each into a single example. Rows that cannot be
/// turned into a valid example are skipped.
pub fn sample_single_ply<R: Rng + ?Sized>(rows: &[PrecomputedRow], sampler: &UniformSampler, rng: &mut R) -> SinglePlySample {
    let mut out = SinglePlySample::default();
    for row in sampler.sample(rows, rng) {
        match row.to_example() {
            Ok(ex) => out.examples.push(ex),
            Err(e) => {
                debug!("skipping row {}: {}", row.puzzle_id, e);
                out.skipped.push(e);
            }
        }
    }
    out
}

/// Draws records and expands each by full replay, in draw order.
pub fn sample_records<T: Borrow<PuzzleRecord>, R: Rng + ?Sized>(
    records: &[T],
    sampler: &UniformSampler,
    labels: Option<&[String]>,
    rng: &mut R,
) -> Result<Assembly, DatasetError> {
    let drawn: Vec<&PuzzleRecord> = sampler.sample(records, rng).into_iter().map(|r| r.borrow()).collect();
    assemble(&drawn, labels)
}
