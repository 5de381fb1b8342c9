use serde::{Deserialize, Serialize};

/// Count, moments and five-number summary of a dataset.
///
/// The standard deviation divides by `n` (population convention).
/// Percentiles interpolate linearly between the two closest ranks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl DescriptiveStats {
    /// Returns `None` for an empty dataset.
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    pub fn from_sorted(sorted: &[f64]) -> Option<Self> {
        debug_assert!(sorted.windows(2).all(|w| w[0] <= w[1]), "values must be sorted in ascending order");
        let min = *sorted.first()?;
        let max = *sorted.last()?;
        let n = sorted.len() as f64;
        let mean = sorted.iter().sum::<f64>() / n;
        let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Some(Self {
            count: sorted.len(),
            mean,
            std_dev: variance.sqrt(),
            min,
            q25: percentile(sorted, 25.0),
            median: percentile(sorted, 50.0),
            q75: percentile(sorted, 75.0),
            max,
        })
    }
}

/// `p` in 0..=100 over non-empty sorted values.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let rank = (p / 100.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
}
