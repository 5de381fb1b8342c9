//! Population-vs-sample comparison of puzzle attributes.
//!
//! Purely diagnostic: nothing here resamples, corrects or flags a sample.

use std::fmt;
use serde::Serialize;
use crate::example::DecisionExample;
use crate::puzzle::{PuzzleAttributes, PuzzleRecord};
use crate::stats::DescriptiveStats;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Attribute {
    Rating,
    Popularity,
    RatingDeviation,
}

impl Attribute {
    pub const ALL: [Attribute; 3] = [Attribute::Rating, Attribute::Popularity, Attribute::RatingDeviation];

    pub fn name(self) -> &'static str {
        match self {
            Attribute::Rating => "rating",
            Attribute::Popularity => "popularity",
            Attribute::RatingDeviation => "rating_deviation",
        }
    }

    pub fn value(self, attrs: &PuzzleAttributes) -> f64 {
        match self {
            Attribute::Rating => f64::from(attrs.rating),
            Attribute::Popularity => f64::from(attrs.popularity),
            Attribute::RatingDeviation => f64::from(attrs.rating_deviation),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct AttributeComparison {
    pub attribute: Attribute,
    /// `None` when that side had no rows.
    pub population: Option<DescriptiveStats>,
    pub sample: Option<DescriptiveStats>,
}

#[derive(Clone, Debug, Serialize)]
pub struct DistributionReport {
    pub comparisons: Vec<AttributeComparison>,
}

impl DistributionReport {
    pub fn get(&self, attribute: Attribute) -> Option<&AttributeComparison> {
        self.comparisons.iter().find(|c| c.attribute == attribute)
    }
}

/// Every example counts once, so a multi-ply puzzle weighs as many times as
/// it has plies on the sample side.
pub fn analyze(population: &[PuzzleRecord], sample: &[DecisionExample]) -> DistributionReport {
    let comparisons = Attribute::ALL.iter().map(|&attribute| AttributeComparison {
        attribute,
        population: DescriptiveStats::new(population.iter().map(|r| attribute.value(&r.attributes))),
        sample: DescriptiveStats::new(sample.iter().map(|e| attribute.value(&e.metadata.attributes))),
    }).collect();
    DistributionReport { comparisons }
}

impl fmt::Display for DistributionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.comparisons {
            writeln!(f, "{}", c.attribute.name())?;
            writeln!(f, "  {:<6} {:>12} {:>12}", "", "population", "sample")?;
            let rows: [(&str, fn(&DescriptiveStats) -> f64); 8] = [
                ("count", |s| s.count as f64),
                ("mean", |s| s.mean),
                ("std", |s| s.std_dev),
                ("min", |s| s.min),
                ("25%", |s| s.q25),
                ("50%", |s| s.median),
                ("75%", |s| s.q75),
                ("max", |s| s.max),
            ];
            for (label, get) in rows {
                writeln!(f, "  {:<6} {:>12} {:>12}", label, cell(c.population.as_ref(), get), cell(c.sample.as_ref(), get))?;
            }
        }
        Ok(())
    }
}

fn cell(stats: Option<&DescriptiveStats>, get: fn(&DescriptiveStats) -> f64) -> String {
    stats.map(|s| format!("{:.2}", get(s))).unwrap_or_else(|| "-".to_string())
}
