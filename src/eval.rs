use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;
use crate::example::{DecisionExample, MoveOptions};

/// Something that picks one of the offered options for a position, e.g. a
/// language model behind a prompt. `None` means it failed to answer.
pub trait MoveSelector: Sync {
    fn select(&self, position: &str, options: &MoveOptions) -> Option<usize>;
}

/// Uniformly random baseline. The choice depends only on the seed and the
/// position, so results do not depend on evaluation order.
#[derive(Clone, Copy, Debug)]
pub struct RandomSelector {
    pub seed: u64,
}

impl MoveSelector for RandomSelector {
    fn select(&self, position: &str, options: &MoveOptions) -> Option<usize> {
        if options.is_empty() { return None; }
        let mut h = DefaultHasher::new();
        position.hash(&mut h);
        let mut rng = SmallRng::seed_from_u64(self.seed ^ h.finish());
        Some(rng.gen_range(0..options.len()))
    }
}

pub fn is_correct(example: &DecisionExample, predicted: usize) -> bool {
    example.expected_index() == Some(predicted)
}

#[derive(Clone, Debug, Serialize)]
pub struct EvalOutcome {
    pub puzzle_id: String,
    pub ply_index: usize,
    pub predicted: Option<String>,
    pub correct: bool,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct EvalSummary {
    pub outcomes: Vec<EvalOutcome>,
}

impl EvalSummary {
    pub fn total(&self) -> usize { self.outcomes.len() }

    pub fn answered(&self) -> usize { self.outcomes.iter().filter(|o| o.predicted.is_some()).count() }

    pub fn correct(&self) -> usize { self.outcomes.iter().filter(|o| o.correct).count() }

    /// Correct answers over all examples; unanswered ones count as wrong.
    pub fn accuracy(&self) -> f64 {
        if self.outcomes.is_empty() { 0.0 } else { self.correct() as f64 / self.total() as f64 }
    }
}

/// Runs the selector over every example in parallel. Outcomes keep the
/// order of `examples`.
pub fn evaluate<S: MoveSelector + ?Sized>(selector: &S, examples: &[DecisionExample]) -> EvalSummary {
    let outcomes = examples.par_iter().map(|ex| {
        // an out-of-range index is a failed answer
        let predicted = selector.select(&ex.position, &ex.options).filter(|&i| i < ex.options.len());
        EvalOutcome {
            puzzle_id: ex.puzzle_id.clone(),
            ply_index: ex.ply_index,
            predicted: predicted.and_then(|i| ex.options.get(i)).map(str::to_string),
            correct: predicted.map_or(false, |i| is_correct(ex, i)),
        }
    }).collect();
    EvalSummary { outcomes }
}
