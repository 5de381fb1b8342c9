// Chess puzzle decision-point datasets: build, sample, compare, score.
pub mod board;
pub mod builder;
pub mod dataset;
pub mod distribution;
pub mod error;
pub mod eval;
pub mod example;
pub mod io;
pub mod puzzle;
pub mod sampler;
pub mod stats;

pub use board::Position;
pub use builder::build_examples;
pub use dataset::{assemble, assemble_par, Assembly};
pub use distribution::{analyze, DistributionReport};
pub use error::{BoardError, BuildError, DatasetError, IoError, RecordError};
pub use example::{DecisionExample, ExampleMetadata, MoveOptions};
pub use puzzle::{PuzzleAttributes, PuzzleRecord};
pub use sampler::{PrecomputedRow, UniformSampler};
