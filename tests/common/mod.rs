#![allow(dead_code)]

use dicelist::config::{Config, CorpusParams, SearchParams};
use dicelist::corpus::CandidateWord;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

const ONSETS: [char; 5] = ['b', 'd', 'k', 'm', 's'];
const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

/// Deterministic three-syllable word for `i < 15625`. Neighbouring indices
/// share a long prefix, so the most frequent words start out very similar.
pub fn syllable_word(i: usize) -> String {
    let mut digits = [0usize; 3];
    let mut rest = i;
    for d in digits.iter_mut().rev() {
        *d = rest % 25;
        rest /= 25;
    }
    digits
        .iter()
        .flat_map(|&d| [ONSETS[d / 5], VOWELS[d % 5]])
        .collect()
}

/// `n` distinct words with strictly decreasing frequencies.
pub fn synthetic_words(n: usize) -> Vec<CandidateWord> {
    (0..n)
        .map(|i| CandidateWord::new(syllable_word(i), (100_000 - i) as u64))
        .collect()
}

pub fn words_from(texts: &[&str]) -> Vec<CandidateWord> {
    texts
        .iter()
        .enumerate()
        .map(|(i, t)| CandidateWord::new(*t, (1000 - i) as u64))
        .collect()
}

/// Writes `id<TAB>word<TAB>count` lines.
pub fn write_corpus(dir: &Path, name: &str, words: &[CandidateWord]) -> PathBuf {
    let path = dir.join(name);
    let mut file = File::create(&path).unwrap();
    for (i, w) in words.iter().enumerate() {
        writeln!(file, "{}\t{}\t{}", i + 1, w.text, w.frequency).unwrap();
    }
    path
}

pub fn test_config(num_dice: u32, stale_thresh: usize) -> Config {
    Config {
        corpus: CorpusParams {
            num_dice,
            ..Default::default()
        },
        search: SearchParams {
            stale_thresh,
            ..Default::default()
        },
        ..Default::default()
    }
}
