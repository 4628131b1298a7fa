use crate::config::SimilarityParams;
use crate::corpus::CandidateSet;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::{debug, info};

/// Pairwise word closeness. Every metric scores identical words 1.0 and
/// approaches 0.0 for unrelated ones.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Unrestricted Damerau-Levenshtein (transpositions count as one edit).
    DamerauLevenshtein,
    Levenshtein,
    /// Optimal string alignment: transpositions, but no substring edited twice.
    Osa,
    JaroWinkler,
}

impl Metric {
    pub fn similarity(&self, a: &str, b: &str, decay_base: f32) -> f32 {
        // Fixed argument order keeps every metric exactly symmetric.
        let (a, b) = if a <= b { (a, b) } else { (b, a) };
        let distance = match self {
            Self::DamerauLevenshtein => strsim::damerau_levenshtein(a, b),
            Self::Levenshtein => strsim::levenshtein(a, b),
            Self::Osa => strsim::osa_distance(a, b),
            Self::JaroWinkler => return strsim::jaro_winkler(a, b) as f32,
        };
        let exponent = i32::try_from(distance).unwrap_or(i32::MAX);
        decay_base.powi(-exponent)
    }
}

/// Symmetric N×N table indexed by candidate rank. The diagonal is zero so a
/// word never counts against itself.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    n: usize,
    values: Vec<f32>,
}

impl SimilarityMatrix {
    pub fn build(candidates: &CandidateSet, params: &SimilarityParams) -> Self {
        let texts: Vec<&str> = candidates.texts().collect();
        Self::from_words(&texts, params.metric, params.decay_base)
    }

    /// Scores each unordered pair once and mirrors it. Rows of the upper
    /// triangle are distributed over the rayon pool.
    pub fn from_words(words: &[&str], metric: Metric, decay_base: f32) -> Self {
        let n = words.len();
        let start = Instant::now();
        info!("🧮 Calculating similarity for {} candidates ({})", n, metric);

        let done = AtomicUsize::new(0);
        let report_every = (n / 10).max(1);

        let rows: Vec<Vec<f32>> = (0..n)
            .into_par_iter()
            .map(|i| {
                let row: Vec<f32> = words[i + 1..]
                    .iter()
                    .map(|other| metric.similarity(words[i], other, decay_base))
                    .collect();

                let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
                if finished % report_every == 0 {
                    debug!(
                        "Calculating similarity: {:5.1}%",
                        100.0 * finished as f32 / n as f32
                    );
                }
                row
            })
            .collect();

        let mut values = vec![0.0f32; n * n];
        for (i, row) in rows.into_iter().enumerate() {
            for (offset, v) in row.into_iter().enumerate() {
                let j = i + 1 + offset;
                values[i * n + j] = v;
                values[j * n + i] = v;
            }
        }

        info!(
            "   -> Similarity matrix ready in {:.2}s",
            start.elapsed().as_secs_f32()
        );
        Self { n, values }
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline(always)]
    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.values[i * self.n + j]
    }

    #[inline(always)]
    pub fn row(&self, i: usize) -> &[f32] {
        &self.values[i * self.n..(i + 1) * self.n]
    }

    /// Sum over every ordered pair of `members`, i.e. the sum of the
    /// submatrix restricted to those rows and columns.
    pub fn subset_sum(&self, members: &[usize]) -> f64 {
        members
            .iter()
            .map(|&i| {
                let row = self.row(i);
                members.iter().map(|&j| row[j] as f64).sum::<f64>()
            })
            .sum()
    }

    /// The `limit` most similar unordered pairs among `members`, most
    /// similar first.
    pub fn closest_pairs(&self, members: &[usize], limit: usize) -> Vec<(usize, usize, f32)> {
        let mut best: Vec<(usize, usize, f32)> = Vec::with_capacity(limit + 1);
        if limit == 0 {
            return best;
        }

        for (a, &i) in members.iter().enumerate() {
            for &j in &members[a + 1..] {
                let v = self.get(i, j);
                if best.len() == limit && v <= best[limit - 1].2 {
                    continue;
                }
                // Ties keep the pair found first.
                let pos = best.partition_point(|p| p.2 >= v);
                best.insert(pos, (i, j, v));
                best.truncate(limit);
            }
        }
        best
    }
}
