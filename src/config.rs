use crate::dice;
use crate::error::{DicelistError, DlResult};
use crate::similarity::Metric;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub corpus: CorpusParams,
    #[command(flatten)]
    pub search: SearchParams,
    #[command(flatten)]
    pub similarity: SimilarityParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusParams {
    /// Dice per word; the list holds 6^N words.
    #[arg(short = 'd', long, default_value_t = 4)]
    pub num_dice: u32,
    /// A word is admitted only if its count is strictly greater than this.
    #[arg(long, default_value_t = 1)]
    pub count_thresh: u64,
    #[arg(long, default_value_t = 3)]
    pub len_min: usize,
    #[arg(long, default_value_t = 9)]
    pub len_max: usize,
    #[arg(long, default_value = DEFAULT_WORD_PATTERN)]
    pub word_pattern: String,
}

/// One letter of any case followed by lowercase letters.
pub const DEFAULT_WORD_PATTERN: &str = r"^\p{L}\p{Ll}*$";

impl Default for CorpusParams {
    fn default() -> Self {
        Self {
            num_dice: 4,
            count_thresh: 1,
            len_min: 3,
            len_max: 9,
            word_pattern: DEFAULT_WORD_PATTERN.to_string(),
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Consecutive rejected swaps that end the search.
    #[arg(long, default_value_t = 10_000)]
    pub stale_thresh: usize,
    /// Cap on accepted improvements.
    #[arg(long)]
    pub step_thresh: Option<usize>,
    /// Cap on evaluated swaps, accepted or not.
    #[arg(long)]
    pub max_attempts: Option<usize>,
    /// A swap is an improvement only if it lowers the score by more than this.
    #[arg(long, default_value_t = 1e-12)]
    pub epsilon: f64,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            stale_thresh: 10_000,
            step_thresh: None,
            max_attempts: None,
            epsilon: 1e-12,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityParams {
    #[arg(long, default_value_t = Metric::DamerauLevenshtein)]
    pub metric: Metric,
    /// Edit distance d scores as decay_base^-d.
    #[arg(long, default_value_t = 10.0)]
    pub decay_base: f32,
}

impl Default for SimilarityParams {
    fn default() -> Self {
        Self {
            metric: Metric::DamerauLevenshtein,
            decay_base: 10.0,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> DlResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Number of words the configured list holds.
    pub fn word_count(&self) -> DlResult<usize> {
        dice::word_count(self.corpus.num_dice)
    }

    pub fn validate(&self) -> DlResult<()> {
        self.word_count()?;

        let c = &self.corpus;
        if c.len_min > c.len_max {
            return Err(DicelistError::Config(format!(
                "len_min ({}) exceeds len_max ({})",
                c.len_min, c.len_max
            )));
        }
        regex::Regex::new(&c.word_pattern)?;

        let eps = self.search.epsilon;
        if eps.is_nan() || eps <= 0.0 {
            return Err(DicelistError::Config(format!(
                "epsilon must be positive, got {}",
                eps
            )));
        }

        let base = self.similarity.decay_base;
        if base.is_nan() || base <= 1.0 {
            return Err(DicelistError::Config(format!(
                "decay_base must be greater than 1, got {}",
                base
            )));
        }
        Ok(())
    }

    /// Copies every value the user typed on the command line over the
    /// values loaded from a config file. Subcommands that expose only some
    /// groups leave the others untouched.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        let typed = |id: &str| {
            matches.ids().any(|known| known.as_str() == id)
                && matches.value_source(id) == Some(ValueSource::CommandLine)
        };

        macro_rules! update_if_present {
            ($group:ident . $field:ident) => {
                if typed(stringify!($field)) {
                    self.$group.$field = cli.$group.$field.clone();
                }
            };
        }

        update_if_present!(corpus.num_dice);
        update_if_present!(corpus.count_thresh);
        update_if_present!(corpus.len_min);
        update_if_present!(corpus.len_max);
        update_if_present!(corpus.word_pattern);

        update_if_present!(search.stale_thresh);
        update_if_present!(search.step_thresh);
        update_if_present!(search.max_attempts);
        update_if_present!(search.epsilon);

        update_if_present!(similarity.metric);
        update_if_present!(similarity.decay_base);
    }
}
