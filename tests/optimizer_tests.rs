mod common;

use dicelist::corpus::rank_candidates;
use dicelist::optimizer::{
    Climber, Optimizer, Progress, ProgressCallback, SearchOptions, Silent, StopReason,
};
use dicelist::similarity::{Metric, SimilarityMatrix};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

fn matrix_of(n: usize) -> Arc<SimilarityMatrix> {
    let candidates = rank_candidates(common::synthetic_words(n), 1).unwrap();
    Arc::new(SimilarityMatrix::build(
        &candidates,
        &Default::default(),
    ))
}

fn options(stale_thresh: usize) -> SearchOptions {
    SearchOptions {
        stale_thresh,
        ..Default::default()
    }
}

#[test]
fn test_swap_delta_matches_full_rescore() {
    let matrix = matrix_of(80);
    let mut climber = Climber::new(matrix.clone(), 36, 1e-12, Some(7));
    let mut rng = fastrand::Rng::with_seed(99);

    for _ in 0..200 {
        let inner = rng.usize(0..36);
        let outer = rng.usize(36..80);

        let mut trial = climber.assignment().clone();
        trial.swap(inner, outer);
        let expected = matrix.subset_sum(trial.selected()) - climber.rescore();
        let delta = climber.swap_delta(inner, outer);
        assert!((delta - expected).abs() < 1e-6, "{} vs {}", delta, expected);

        climber.try_swap(inner, outer);
        assert!(climber.assignment().is_bijection());
        assert!((climber.current_score() - climber.rescore()).abs() < 1e-6);
    }
}

fn tiny(words: &[&str]) -> Arc<SimilarityMatrix> {
    Arc::new(SimilarityMatrix::from_words(
        words,
        Metric::DamerauLevenshtein,
        10.0,
    ))
}

#[test]
fn test_first_evaluated_swap_is_taken() {
    let matrix = tiny(&["abc", "pqrs", "wxyz", "abd", "mnop"]);
    let mut climber = Climber::new(matrix, 3, 1e-12, Some(1));
    let initial = climber.current_score();
    assert!(climber.score().is_none());

    // Bringing "abd" next to "abc" makes things worse, but there is no
    // accepted score to compare against yet.
    assert!(climber.swap_delta(1, 3) > 0.0);
    assert!(climber.try_swap(1, 3));
    assert!(climber.score().unwrap() > initial);
    assert_eq!(climber.stale(), 0);
    assert_eq!(climber.assignment().candidate_at(1), 3);
    assert!(climber.assignment().is_selected(3));
    assert!(!climber.assignment().is_selected(1));
}

#[test]
fn test_rejections_count_as_stale() {
    let matrix = tiny(&["abc", "abd", "abe", "pqrs", "wxyz"]);
    let mut climber = Climber::new(matrix, 3, 1e-12, Some(1));
    assert!(climber.try_swap(0, 3));
    let before = climber.assignment().clone();

    // Swapping "abc" back in undoes the improvement.
    assert!(!climber.try_swap(0, 3));
    assert_eq!(climber.stale(), 1);
    assert_eq!(climber.assignment(), &before);
}

#[test]
fn test_run_improves_and_keeps_invariants() {
    let matrix = matrix_of(120);
    let start = matrix.subset_sum(&(0..36).collect::<Vec<_>>());
    let result = Optimizer::new(matrix.clone(), 36, options(2_000)).run(Some(42), Silent);

    assert_eq!(result.stop_reason, StopReason::Stale);
    assert!(result.accepted() > 0);
    assert!(result.score < start);

    let unique: HashSet<usize> = result.selected.iter().copied().collect();
    assert_eq!(unique.len(), 36);
    assert!(result.selected.iter().all(|&c| c < 120));

    // Later acceptances beat earlier ones by more than epsilon.
    for w in result.accepted_scores.windows(2) {
        assert!(w[1] < w[0] - 1e-12);
    }
    let last = *result.accepted_scores.last().unwrap();
    assert!((last - result.score).abs() < 1e-6);
    assert!((matrix.subset_sum(&result.selected) - result.score).abs() < 1e-9);
}

#[test]
fn test_zero_stale_threshold_returns_initial_subset() {
    let matrix = matrix_of(60);
    let result = Optimizer::new(matrix, 36, options(0)).run(Some(3), Silent);

    assert_eq!(result.stop_reason, StopReason::Stale);
    assert_eq!(result.attempts, 0);
    assert_eq!(result.accepted(), 0);
    assert_eq!(result.selected, (0..36).collect::<Vec<_>>());
}

#[test]
fn test_no_reserve_is_exhausted() {
    let matrix = matrix_of(36);
    let result = Optimizer::new(matrix, 36, options(10_000)).run(Some(3), Silent);

    assert_eq!(result.stop_reason, StopReason::Exhausted);
    assert_eq!(result.attempts, 0);
    assert_eq!(result.selected, (0..36).collect::<Vec<_>>());
}

#[test]
fn test_sweep_finishes_before_stale_stop() {
    // Every pair containing "qqqqqqqq" is eight edits apart; all others are at most four.
    let words = ["aaaa", "aaab", "zzzz", "aaac", "qqqqqqqq"];
    let matrix = tiny(&words);

    for seed in 0..20 {
        let result = Optimizer::new(matrix.clone(), 2, options(1)).run(Some(seed), Silent);

        assert_eq!(result.stop_reason, StopReason::Stale);
        assert!(result.selected.contains(&4), "seed {}: {:?}", seed, result.selected);
        assert!(result.score < 1e-7, "seed {}: {}", seed, result.score);
        assert!(result.attempts >= 3);
    }
}

#[test]
fn test_more_slots_than_candidates_is_exhausted() {
    let matrix = matrix_of(36);
    let result = Optimizer::new(matrix, 40, options(10_000)).run(Some(3), Silent);

    assert_eq!(result.stop_reason, StopReason::Exhausted);
    assert_eq!(result.attempts, 0);
    assert_eq!(result.selected, (0..36).collect::<Vec<_>>());
}

#[test]
fn test_step_limit() {
    let matrix = matrix_of(100);
    let opts = SearchOptions {
        step_thresh: Some(3),
        ..options(10_000)
    };
    let result = Optimizer::new(matrix, 36, opts).run(Some(5), Silent);

    assert_eq!(result.stop_reason, StopReason::StepLimit);
    assert_eq!(result.accepted(), 3);
}

#[test]
fn test_attempt_limit() {
    let matrix = matrix_of(100);
    let opts = SearchOptions {
        max_attempts: Some(250),
        ..options(1_000_000)
    };
    let result = Optimizer::new(matrix, 36, opts).run(Some(5), Silent);

    assert_eq!(result.stop_reason, StopReason::AttemptLimit);
    assert_eq!(result.attempts, 250);
}

#[test]
fn test_single_attempt_is_always_accepted() {
    let matrix = matrix_of(100);
    let opts = SearchOptions {
        max_attempts: Some(1),
        ..options(10_000)
    };
    let result = Optimizer::new(matrix, 36, opts).run(Some(11), Silent);

    assert_eq!(result.attempts, 1);
    assert_eq!(result.accepted(), 1);
}

#[test]
fn test_time_limit() {
    let matrix = matrix_of(100);
    let opts = SearchOptions {
        max_time: Some(Duration::ZERO),
        ..options(10_000)
    };
    let result = Optimizer::new(matrix, 36, opts).run(Some(5), Silent);

    assert_eq!(result.stop_reason, StopReason::TimeLimit);
    assert_eq!(result.attempts, 0);
}

struct StopAfter {
    improvements: usize,
    seen: usize,
}

impl ProgressCallback for StopAfter {
    fn on_improvement(&mut self, progress: &Progress<'_>) -> bool {
        self.seen += 1;
        assert_eq!(progress.accepted, self.seen);
        assert_eq!(progress.selected.len(), 36);
        self.seen < self.improvements
    }
}

struct Interrupted;

impl ProgressCallback for Interrupted {
    fn on_improvement(&mut self, _progress: &Progress<'_>) -> bool {
        true
    }

    fn keep_going(&self) -> bool {
        false
    }
}

#[test]
fn test_callback_cancels() {
    let matrix = matrix_of(100);
    let optimizer = Optimizer::new(matrix, 36, options(10_000));

    let mut cb = StopAfter {
        improvements: 2,
        seen: 0,
    };
    let result = optimizer.run(Some(8), &mut cb);
    assert_eq!(result.stop_reason, StopReason::Cancelled);
    assert_eq!(result.accepted(), 2);
    assert_eq!(cb.seen, 2);

    let result = optimizer.run(Some(8), Interrupted);
    assert_eq!(result.stop_reason, StopReason::Cancelled);
    assert_eq!(result.attempts, 0);
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let matrix = matrix_of(150);
    let optimizer = Optimizer::new(matrix, 36, options(1_500));

    let a = optimizer.run(Some(2024), Silent);
    let b = optimizer.run(Some(2024), Silent);
    assert_eq!(a.selected, b.selected);
    assert_eq!(a.accepted_scores, b.accepted_scores);
    assert_eq!(a.attempts, b.attempts);
}

#[test]
fn test_stop_reason_names() {
    assert_eq!(StopReason::Stale.to_string(), "stale");
    assert_eq!(StopReason::AttemptLimit.to_string(), "attempt_limit");
}
