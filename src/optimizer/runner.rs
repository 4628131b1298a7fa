use crate::config::Config;
use crate::optimizer::Climber;
use crate::similarity::SimilarityMatrix;
use std::sync::Arc;
use std::time::{Duration, Instant};
use strum_macros::Display;
use tracing::{debug, info};

/// Attempts between wall-clock checks.
const TIME_CHECK_INTERVAL: usize = 1024;

/// Accepted swaps between full recomputations of the cached affinities.
const RESYNC_INTERVAL: usize = 1024;

#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub stale_thresh: usize,
    pub step_thresh: Option<usize>,
    pub max_attempts: Option<usize>,
    pub max_time: Option<Duration>,
    pub epsilon: f64,
}

impl From<&Config> for SearchOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            stale_thresh: cfg.search.stale_thresh,
            step_thresh: cfg.search.step_thresh,
            max_attempts: cfg.search.max_attempts,
            max_time: None,
            epsilon: cfg.search.epsilon,
        }
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum StopReason {
    /// `stale_thresh` consecutive swaps were rejected.
    Stale,
    StepLimit,
    AttemptLimit,
    TimeLimit,
    Cancelled,
    /// No reserve candidates, so no swap can change the subset.
    Exhausted,
}

pub struct Progress<'a> {
    pub accepted: usize,
    pub attempts: usize,
    pub score: f64,
    pub selected: &'a [usize],
}

/// Receives updates during the search.
pub trait ProgressCallback {
    /// Called after every accepted swap. Returning false ends the search.
    fn on_improvement(&mut self, progress: &Progress<'_>) -> bool;

    /// Polled before every swap attempt.
    fn keep_going(&self) -> bool {
        true
    }
}

impl<T: ProgressCallback + ?Sized> ProgressCallback for &mut T {
    fn on_improvement(&mut self, progress: &Progress<'_>) -> bool {
        (**self).on_improvement(progress)
    }

    fn keep_going(&self) -> bool {
        (**self).keep_going()
    }
}

/// Callback that never interrupts.
pub struct Silent;

impl ProgressCallback for Silent {
    fn on_improvement(&mut self, _progress: &Progress<'_>) -> bool {
        true
    }
}

#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Exact full-resum score of the final subset.
    pub score: f64,
    /// Candidate ranks of the final subset, in slot order.
    pub selected: Vec<usize>,
    /// Every score accepted along the way, in order.
    pub accepted_scores: Vec<f64>,
    pub attempts: usize,
    pub stop_reason: StopReason,
    pub elapsed: Duration,
}

impl SearchResult {
    pub fn accepted(&self) -> usize {
        self.accepted_scores.len()
    }
}

pub struct Optimizer {
    matrix: Arc<SimilarityMatrix>,
    selected: usize,
    options: SearchOptions,
}

impl Optimizer {
    /// `selected` is K. With fewer than K candidates the run stops at once
    /// with [`StopReason::Exhausted`].
    pub fn new(matrix: Arc<SimilarityMatrix>, selected: usize, options: SearchOptions) -> Self {
        Self {
            matrix,
            selected,
            options,
        }
    }

    pub fn run<CB: ProgressCallback>(&self, seed: Option<u64>, mut callback: CB) -> SearchResult {
        let opts = &self.options;
        let n = self.matrix.len();
        let k = self.selected;
        let start = Instant::now();

        info!(
            "🔍 Selecting {} of {} candidates (stale threshold {})",
            k, n, opts.stale_thresh
        );

        // Asking for more than N leaves nothing to swap; the loop reports it as exhausted.
        let mut climber = Climber::new(self.matrix.clone(), k.min(n), opts.epsilon, seed);
        let mut accepted_scores = Vec::new();
        let mut attempts = 0usize;

        let stop_reason = 'search: loop {
            if climber.stale() >= opts.stale_thresh {
                break StopReason::Stale;
            }
            if let Some(cap) = opts.step_thresh {
                if accepted_scores.len() >= cap {
                    break StopReason::StepLimit;
                }
            }
            if n <= k || k == 0 {
                break StopReason::Exhausted;
            }

            let inner = climber.pick_inner();
            for outer in k..n {
                if let Some(cap) = opts.max_attempts {
                    if attempts >= cap {
                        break 'search StopReason::AttemptLimit;
                    }
                }
                if !callback.keep_going() {
                    break 'search StopReason::Cancelled;
                }
                if let Some(limit) = opts.max_time {
                    if attempts % TIME_CHECK_INTERVAL == 0 && start.elapsed() >= limit {
                        break 'search StopReason::TimeLimit;
                    }
                }

                attempts += 1;
                if climber.try_swap(inner, outer) {
                    let score = climber.current_score();
                    accepted_scores.push(score);

                    let accepted = accepted_scores.len();
                    if accepted % RESYNC_INTERVAL == 0 {
                        climber.resync();
                    }
                    debug!(
                        "Optimizing: {:.6e} [{} accepted / {} attempts]",
                        score, accepted, attempts
                    );

                    let progress = Progress {
                        accepted,
                        attempts,
                        score,
                        selected: climber.assignment().selected(),
                    };
                    if !callback.on_improvement(&progress) {
                        break 'search StopReason::Cancelled;
                    }
                    break;
                }
            }
        };

        let score = climber.rescore();
        let elapsed = start.elapsed();
        info!(
            "   -> Stopped ({}) after {} attempts, {} accepted, score {:.6e} in {:.2}s",
            stop_reason,
            attempts,
            accepted_scores.len(),
            score,
            elapsed.as_secs_f32()
        );

        SearchResult {
            score,
            selected: climber.assignment().selected().to_vec(),
            accepted_scores,
            attempts,
            stop_reason,
            elapsed,
        }
    }
}
