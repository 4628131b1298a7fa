use super::assignment::SlotAssignment;
use crate::similarity::SimilarityMatrix;
use std::sync::Arc;

/// First-improvement hill climb over "which K of N candidates are selected".
///
/// The matrix never moves. `affinity[c]` caches the summed similarity of
/// candidate `c` to the selected subset, which makes evaluating a swap O(1)
/// and committing one O(N).
pub struct Climber {
    matrix: Arc<SimilarityMatrix>,
    assignment: SlotAssignment,
    affinity: Vec<f64>,
    current: f64,
    score: Option<f64>,
    stale: usize,
    epsilon: f64,
    rng: fastrand::Rng,
}

impl Climber {
    pub fn new(
        matrix: Arc<SimilarityMatrix>,
        selected: usize,
        epsilon: f64,
        seed: Option<u64>,
    ) -> Self {
        let rng = if let Some(s) = seed {
            fastrand::Rng::with_seed(s)
        } else {
            fastrand::Rng::new()
        };

        let assignment = SlotAssignment::identity(matrix.len(), selected);
        let mut c = Climber {
            matrix,
            assignment,
            affinity: Vec::new(),
            current: 0.0,
            score: None,
            stale: 0,
            epsilon,
            rng,
        };
        c.resync();
        c
    }

    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    pub fn assignment(&self) -> &SlotAssignment {
        &self.assignment
    }

    /// Last accepted score. `None` until the first evaluated swap, which is
    /// always taken.
    pub fn score(&self) -> Option<f64> {
        self.score
    }

    /// Consecutive rejected swaps since the last acceptance.
    pub fn stale(&self) -> usize {
        self.stale
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Score of the current subset as tracked incrementally.
    pub fn current_score(&self) -> f64 {
        self.current
    }

    /// Recomputes the cached affinities and the running score from the
    /// matrix, discarding accumulated rounding.
    pub fn resync(&mut self) {
        let selected = self.assignment.selected();
        self.affinity = (0..self.matrix.len())
            .map(|c| {
                let row = self.matrix.row(c);
                selected.iter().map(|&s| row[s] as f64).sum()
            })
            .collect();
        self.current = selected.iter().map(|&s| self.affinity[s]).sum();
    }

    /// Full resum of the selected submatrix.
    pub fn rescore(&self) -> f64 {
        self.matrix.subset_sum(self.assignment.selected())
    }

    #[inline(always)]
    pub fn pick_inner(&mut self) -> usize {
        self.rng.usize(0..self.assignment.selected_len())
    }

    /// Change in score if the occupants of a selected slot and a reserve slot
    /// traded places. Every ordered pair counts, hence the factor of two.
    #[inline(always)]
    pub fn swap_delta(&self, inner: usize, outer: usize) -> f64 {
        let evicted = self.assignment.candidate_at(inner);
        let admitted = self.assignment.candidate_at(outer);
        let cross = self.matrix.get(admitted, evicted) as f64;
        2.0 * (self.affinity[admitted] - cross - self.affinity[evicted])
    }

    /// Evaluates one swap and commits it only if it improves the accepted
    /// score by more than `epsilon`. Returns whether it was accepted.
    #[inline(always)]
    pub fn try_swap(&mut self, inner: usize, outer: usize) -> bool {
        let candidate = self.current + self.swap_delta(inner, outer);

        let improves = match self.score {
            None => true,
            Some(score) => candidate < score - self.epsilon,
        };

        if improves {
            self.commit(inner, outer);
            self.current = candidate;
            self.score = Some(candidate);
            self.stale = 0;
        } else {
            self.stale += 1;
        }
        improves
    }

    fn commit(&mut self, inner: usize, outer: usize) {
        let evicted = self.assignment.candidate_at(inner);
        let admitted = self.assignment.candidate_at(outer);
        let row_out = self.matrix.row(evicted);
        let row_in = self.matrix.row(admitted);

        for (c, a) in self.affinity.iter_mut().enumerate() {
            *a += row_in[c] as f64 - row_out[c] as f64;
        }
        self.assignment.swap(inner, outer);
    }
}
