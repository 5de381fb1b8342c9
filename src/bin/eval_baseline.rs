use anyhow::Context;
use clap::Parser;
use puzzle_eval::eval::{evaluate, RandomSelector};
use puzzle_eval::io::load_devset_jsonl;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "eval_baseline", about = "Score a uniformly random move selector on a devset")]
struct Args {
    #[arg(long, default_value = "data/devset.jsonl")]
    devset: PathBuf,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(long)]
    threads: Option<usize>,
    /// Write per-example outcomes as JSON
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let a = Args::parse();
    if let Some(t) = a.threads {
        rayon::ThreadPoolBuilder::new().num_threads(t).build_global().context("configuring thread pool")?;
    }
    let examples = load_devset_jsonl(&a.devset).with_context(|| format!("loading {}", a.devset.display()))?;
    let summary = evaluate(&RandomSelector { seed: a.seed }, &examples);
    println!("random baseline: {}/{} correct ({:.4}), {} answered",
        summary.correct(), summary.total(), summary.accuracy(), summary.answered());
    if let Some(path) = a.out {
        let json = serde_json::to_string_pretty(&summary.outcomes)?;
        std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}
