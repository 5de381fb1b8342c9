use std::borrow::Borrow;
use std::fmt;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use rayon::prelude::*;
use crate::builder::build_examples;
use crate::error::{BuildError, DatasetError};
use crate::example::DecisionExample;
use crate::puzzle::PuzzleRecord;

#[derive(Debug)]
pub enum SkipReason {
    EmptySolution,
    Build(BuildError),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::EmptySolution => write!(f, "empty solution"),
            SkipReason::Build(e) => write!(f, "{e}"),
        }
    }
}

#[derive(Debug)]
pub struct SkippedRecord {
    /// Position of the record in the assembler's input.
    pub index: usize,
    pub puzzle_id: String,
    pub reason: SkipReason,
}

/// Flat example list plus the records that contributed nothing.
#[derive(Debug, Default)]
pub struct Assembly {
    pub examples: Vec<DecisionExample>,
    pub skipped: Vec<SkippedRecord>,
}

type Outcome = Result<Option<Vec<DecisionExample>>, BuildError>;

/// Expands every record in input order, keeping ply order within a record.
/// Records that fail to build are skipped and reported in `skipped`.
pub fn assemble<R: Borrow<PuzzleRecord>>(records: &[R], labels: Option<&[String]>) -> Result<Assembly, DatasetError> {
    check_labels(records.len(), labels)?;
    let outcomes = records.iter().enumerate()
        .map(|(i, r)| build_examples(r.borrow(), label_at(labels, i)));
    Ok(flatten_outcomes(records, outcomes))
}

/// Parallel `assemble`. Produces the same output in the same order.
pub fn assemble_par<R: Borrow<PuzzleRecord> + Sync>(records: &[R], labels: Option<&[String]>) -> Result<Assembly, DatasetError> {
    check_labels(records.len(), labels)?;
    let mut outcomes: Vec<(usize, Outcome)> = records.par_iter().enumerate()
        .map(|(i, r)| (i, build_examples(r.borrow(), label_at(labels, i))))
        .collect();
    outcomes.sort_by_key(|(i, _)| *i);
    Ok(flatten_outcomes(records, outcomes.into_iter().map(|(_, o)| o)))
}

/// Deals `groups` over `n` records: a seeded shuffle, then round robin, so
/// group sizes differ by at most one.
pub fn assign_control_groups<R: Rng + ?Sized>(n: usize, groups: &[String], rng: &mut R) -> Vec<String> {
    if groups.is_empty() { return Vec::new(); }
    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);
    let mut labels = vec![String::new(); n];
    for (slot, &record) in order.iter().enumerate() {
        labels[record] = groups[slot % groups.len()].clone();
    }
    labels
}

fn check_labels(records: usize, labels: Option<&[String]>) -> Result<(), DatasetError> {
    match labels {
        Some(l) if l.len() != records => Err(DatasetError::LabelMismatch { records, labels: l.len() }),
        _ => Ok(()),
    }
}

fn label_at(labels: Option<&[String]>, i: usize) -> Option<&str> {
    labels.map(|l| l[i].as_str())
}

fn flatten_outcomes<R: Borrow<PuzzleRecord>>(records: &[R], outcomes: impl Iterator<Item = Outcome>) -> Assembly {
    let mut out = Assembly::default();
    for (index, outcome) in outcomes.enumerate() {
        let puzzle_id = &records[index].borrow().id;
        let reason = match outcome {
            Ok(Some(examples)) => { out.examples.extend(examples); continue; }
            Ok(None) => SkipReason::EmptySolution,
            Err(e) => SkipReason::Build(e),
        };
        debug!("skipping puzzle {}: {}", puzzle_id, reason);
        out.skipped.push(SkippedRecord { index, puzzle_id: puzzle_id.clone(), reason });
    }
    out
}
