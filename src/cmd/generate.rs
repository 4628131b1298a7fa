use crate::reports;
use clap::Args;
use dicelist::api::Prepared;
use dicelist::config::Config;
use dicelist::error::DlResult;
use dicelist::optimizer::{Progress, ProgressCallback, SearchOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub config: Config,

    /// Tab-separated corpus with `id`, `word` and `count` columns.
    pub corpus: PathBuf,

    #[arg(short, long, default_value = "dicelist.txt")]
    pub output: PathBuf,

    /// Stop the search after this many seconds.
    #[arg(short = 'T', long)]
    pub time: Option<u64>,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    /// Rewrite the output after every N accepted improvements (0 = only at the end).
    #[arg(long, default_value_t = 0)]
    pub checkpoint_every: usize,

    /// Closest pairs to print after the run.
    #[arg(long, default_value_t = 10)]
    pub show_pairs: usize,
}

struct CliProgress<'a> {
    prepared: &'a Prepared,
    output: &'a Path,
    checkpoint_every: usize,
    step_thresh: Option<usize>,
    last_print: Instant,
}

impl ProgressCallback for CliProgress<'_> {
    fn on_improvement(&mut self, p: &Progress<'_>) -> bool {
        if self.last_print.elapsed() >= Duration::from_secs(1) {
            let cap = self
                .step_thresh
                .map_or_else(|| "-".to_string(), |s| s.to_string());
            info!(
                "Optimizing: {:.6e} [{}/{}] ({} attempts)",
                p.score, p.accepted, cap, p.attempts
            );
            self.last_print = Instant::now();
        }

        if self.checkpoint_every > 0 && p.accepted % self.checkpoint_every == 0 {
            let saved = self
                .prepared
                .project(p.selected)
                .and_then(|list| list.save(self.output));
            if let Err(e) = saved {
                warn!("⚠️  Checkpoint to '{}' failed: {}", self.output.display(), e);
            }
        }
        true
    }
}

pub fn run(args: GenerateArgs, config: Config) -> DlResult<()> {
    let started = Instant::now();
    let prepared = Prepared::from_corpus_file(&args.corpus, &config)?;

    let mut options = SearchOptions::from(&config);
    if let Some(t) = args.time {
        options.max_time = Some(Duration::from_secs(t));
    }

    let progress = CliProgress {
        prepared: &prepared,
        output: &args.output,
        checkpoint_every: args.checkpoint_every,
        step_thresh: config.search.step_thresh,
        last_print: Instant::now(),
    };
    let generation = prepared.search(options, args.seed, progress)?;

    generation.list.save(&args.output)?;
    info!(
        "💾 Wrote {} words to {}",
        generation.list.len(),
        args.output.display()
    );

    let search = &generation.search;
    reports::print_summary(
        "FINAL RESULT",
        &[
            ("Candidates", prepared.candidates.len().to_string()),
            ("Words", generation.list.len().to_string()),
            ("Metric", config.similarity.metric.to_string()),
            ("Score", format!("{:.6e}", search.score)),
            ("Accepted", search.accepted().to_string()),
            ("Attempts", search.attempts.to_string()),
            ("Stopped", search.stop_reason.to_string()),
            ("Elapsed", format!("{:.2}s", started.elapsed().as_secs_f32())),
        ],
    );
    // Plain line for scripts.
    println!("Score: {:.6e}", search.score);

    let pairs: Vec<(&str, &str, f32)> = prepared
        .matrix
        .closest_pairs(&search.selected, args.show_pairs)
        .into_iter()
        .map(|(a, b, s)| (prepared.candidates.text(a), prepared.candidates.text(b), s))
        .collect();
    reports::print_closest_pairs(&pairs);

    Ok(())
}
