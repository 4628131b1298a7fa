use crate::config::Config;
use crate::corpus::{load_corpus, rank_candidates, AdmissionFilter, CandidateSet, CandidateWord};
use crate::error::DlResult;
use crate::optimizer::{Optimizer, ProgressCallback, SearchOptions, SearchResult, Silent};
use crate::similarity::SimilarityMatrix;
use crate::wordlist::WordList;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Ranked candidates and their similarity matrix, ready to be searched.
/// Configuration problems surface here, before the matrix is built.
pub struct Prepared {
    pub config: Config,
    pub candidates: CandidateSet,
    pub matrix: Arc<SimilarityMatrix>,
}

#[derive(Debug)]
pub struct Generation {
    pub search: SearchResult,
    pub list: WordList,
}

impl Prepared {
    pub fn new(words: Vec<CandidateWord>, config: &Config) -> DlResult<Self> {
        config.validate()?;
        let candidates = rank_candidates(words, config.corpus.num_dice)?;
        info!(
            "📚 {} candidates for a {}-word list",
            candidates.len(),
            config.word_count()?
        );

        let matrix = Arc::new(SimilarityMatrix::build(&candidates, &config.similarity));
        Ok(Self {
            config: config.clone(),
            candidates,
            matrix,
        })
    }

    pub fn from_corpus_file<P: AsRef<Path>>(path: P, config: &Config) -> DlResult<Self> {
        config.validate()?;
        let filter = AdmissionFilter::from_params(&config.corpus)?;
        let words = load_corpus(path, &filter)?;
        Self::new(words, config)
    }

    /// Builds the word list for a set of selected candidate ranks.
    pub fn project(&self, selected: &[usize]) -> DlResult<WordList> {
        WordList::project(&self.candidates, selected, self.config.corpus.num_dice)
    }

    pub fn search<CB: ProgressCallback>(
        &self,
        options: SearchOptions,
        seed: Option<u64>,
        callback: CB,
    ) -> DlResult<Generation> {
        let k = self.config.word_count()?;
        let optimizer = Optimizer::new(self.matrix.clone(), k, options);
        let search = optimizer.run(seed, callback);
        let list = self.project(&search.selected)?;
        Ok(Generation { search, list })
    }
}

/// One-shot pipeline with the search options taken from `config`.
pub fn generate(words: Vec<CandidateWord>, config: &Config, seed: Option<u64>) -> DlResult<Generation> {
    let prepared = Prepared::new(words, config)?;
    prepared.search(SearchOptions::from(config), seed, Silent)
}
