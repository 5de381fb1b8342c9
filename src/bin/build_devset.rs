use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use puzzle_eval::dataset::{assemble_par, assign_control_groups};
use puzzle_eval::distribution::analyze;
use puzzle_eval::io::{load_lichess_csv, write_devset_jsonl};
use puzzle_eval::sampler::{sample_single_ply, PrecomputedRow, UniformSampler, DEFAULT_SAMPLE_SIZE, DEFAULT_SEED};
use puzzle_eval::DecisionExample;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::path::PathBuf;

const CHUNK: usize = 256;

#[derive(Parser, Debug)]
#[command(name = "build_devset", about = "Sample Lichess puzzles and expand them into decision examples")]
struct Args {
    /// Lichess puzzle CSV export
    #[arg(long)]
    input: PathBuf,
    #[arg(long, default_value = "data/devset.jsonl")]
    out: PathBuf,
    #[arg(long, default_value_t = DEFAULT_SAMPLE_SIZE)]
    sample_size: usize,
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
    /// One decision per puzzle, taken after the opponent's setup move
    #[arg(long)]
    single_ply: bool,
    /// Comma-separated control-group labels dealt over the sampled puzzles
    #[arg(long, value_delimiter = ',')]
    control_groups: Vec<String>,
    #[arg(long)]
    threads: Option<usize>,
    /// Also write the distribution report as JSON
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let a = Args::parse();
    if let Some(t) = a.threads {
        rayon::ThreadPoolBuilder::new().num_threads(t).build_global().context("configuring thread pool")?;
    }

    let loaded = load_lichess_csv(&a.input).with_context(|| format!("loading {}", a.input.display()))?;
    let mut rng = SmallRng::seed_from_u64(a.seed);
    let sampler = UniformSampler::new(a.sample_size);

    let examples = if a.single_ply {
        let rows: Vec<PrecomputedRow> = loaded.records.iter()
            .filter_map(|r| PrecomputedRow::from_record(r).map_err(|e| debug!("{}", e)).ok())
            .collect();
        let sample = sample_single_ply(&rows, &sampler, &mut rng);
        info!("{} examples, {} sampled rows skipped", sample.examples.len(), sample.skipped.len());
        let mut examples = sample.examples;
        if !a.control_groups.is_empty() {
            let labels = assign_control_groups(examples.len(), &a.control_groups, &mut rng);
            for (ex, label) in examples.iter_mut().zip(labels) { ex.metadata.control_group = Some(label); }
        }
        examples
    } else {
        expand_replay(&loaded.records, &sampler, &a.control_groups, &mut rng)?
    };

    write_devset_jsonl(&a.out, &examples).with_context(|| format!("writing {}", a.out.display()))?;
    eprintln!("Wrote {} examples to {}", examples.len(), a.out.display());

    let report = analyze(&loaded.records, &examples);
    println!("{}", report);
    if let Some(path) = a.report {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}

fn expand_replay(
    records: &[puzzle_eval::PuzzleRecord],
    sampler: &UniformSampler,
    groups: &[String],
    rng: &mut SmallRng,
) -> anyhow::Result<Vec<DecisionExample>> {
    let drawn = sampler.sample(records, rng);
    let labels = if groups.is_empty() { None } else { Some(assign_control_groups(drawn.len(), groups, rng)) };
    let pb = ProgressBar::new(drawn.len() as u64);
    pb.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} puzzles ({eta})")?);

    let mut examples = Vec::new();
    let mut skipped = 0usize;
    for (ci, chunk) in drawn.chunks(CHUNK).enumerate() {
        let start = ci * CHUNK;
        let chunk_labels = labels.as_deref().map(|l| &l[start..start + chunk.len()]);
        let asm = assemble_par(chunk, chunk_labels)?;
        skipped += asm.skipped.len();
        examples.extend(asm.examples);
        pb.inc(chunk.len() as u64);
    }
    pb.finish_and_clear();
    info!("{} examples from {} puzzles, {} puzzles skipped", examples.len(), drawn.len(), skipped);
    Ok(examples)
}
