use crate::config::CorpusParams;
use crate::dice;
use crate::error::{DicelistError, DlResult};
use regex::Regex;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateWord {
    pub text: String,
    pub frequency: u64,
}

impl CandidateWord {
    pub fn new(text: impl Into<String>, frequency: u64) -> Self {
        Self {
            text: text.into(),
            frequency,
        }
    }
}

/// Decides which corpus entries may enter the list.
#[derive(Debug, Clone)]
pub struct AdmissionFilter {
    pattern: Regex,
    len_min: usize,
    len_max: usize,
    count_thresh: u64,
}

impl AdmissionFilter {
    pub fn new(pattern: &str, len_min: usize, len_max: usize, count_thresh: u64) -> DlResult<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            len_min,
            len_max,
            count_thresh,
        })
    }

    pub fn from_params(params: &CorpusParams) -> DlResult<Self> {
        Self::new(
            &params.word_pattern,
            params.len_min,
            params.len_max,
            params.count_thresh,
        )
    }

    /// Length is counted in characters, so "äbc" has length 3.
    pub fn admits(&self, word: &str, count: u64) -> bool {
        let len = word.chars().count();
        count > self.count_thresh
            && len >= self.len_min
            && len <= self.len_max
            && self.pattern.is_match(word)
    }
}

/// Reads `id<TAB>word<TAB>count` lines and keeps the admissible entries in
/// corpus order.
pub fn read_corpus<R: Read>(reader: R, filter: &AdmissionFilter) -> DlResult<Vec<CandidateWord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .from_reader(reader);

    let mut words = Vec::new();
    let mut lines_read = 0;
    let mut skipped = 0;

    for result in rdr.records() {
        lines_read += 1;
        let rec = match result {
            Ok(rec) => rec,
            Err(e) => {
                debug!("Corpus line {}: {}", lines_read, e);
                skipped += 1;
                continue;
            }
        };
        if rec.len() < 3 {
            skipped += 1;
            continue;
        }

        let word = rec[1].trim();
        let count: u64 = match rec[2].trim().parse() {
            Ok(v) => v,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };

        if filter.admits(word, count) {
            words.push(CandidateWord::new(word, count));
        }
    }

    debug!(
        "Scanned {} corpus lines ({} malformed), {} admissible",
        lines_read,
        skipped,
        words.len()
    );
    Ok(words)
}

pub fn load_corpus<P: AsRef<Path>>(path: P, filter: &AdmissionFilter) -> DlResult<Vec<CandidateWord>> {
    let path = path.as_ref();
    info!("📂 Loading corpus: {}", path.display());
    let file = File::open(path)?;
    read_corpus(file, filter)
}

/// Admissible words ordered by descending frequency. Rank `i` is the
/// candidate index used by the similarity matrix and the optimizer.
#[derive(Debug, Clone)]
pub struct CandidateSet {
    words: Vec<CandidateWord>,
}

impl CandidateSet {
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, rank: usize) -> Option<&CandidateWord> {
        self.words.get(rank)
    }

    pub fn text(&self, rank: usize) -> &str {
        &self.words[rank].text
    }

    pub fn words(&self) -> &[CandidateWord] {
        &self.words
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.iter().map(|w| w.text.as_str())
    }
}

/// Sorts by frequency (stable, so ties keep corpus order), drops repeated
/// words and checks there are enough left for `num_dice` dice.
pub fn rank_candidates(mut words: Vec<CandidateWord>, num_dice: u32) -> DlResult<CandidateSet> {
    let needed = dice::word_count(num_dice)?;

    words.sort_by(|a, b| b.frequency.cmp(&a.frequency));

    let before = words.len();
    let mut seen = HashSet::with_capacity(words.len());
    words.retain(|w| seen.insert(w.text.clone()));
    if words.len() < before {
        warn!("Dropped {} duplicate corpus words", before - words.len());
    }

    if words.is_empty() {
        return Err(DicelistError::NoCandidates);
    }
    if words.len() < needed {
        return Err(DicelistError::InsufficientCandidates {
            needed,
            found: words.len(),
        });
    }

    Ok(CandidateSet { words })
}
