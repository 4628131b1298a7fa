use crate::reports;
use clap::Args;
use dicelist::config::{Config, SimilarityParams};
use dicelist::error::{DicelistError, DlResult};
use dicelist::similarity::SimilarityMatrix;
use dicelist::wordlist::WordList;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub similarity: SimilarityParams,

    /// Dice the list must be built for. Without it the count is taken from
    /// the first entry.
    #[arg(short = 'd', long = "num-dice")]
    pub expect_dice: Option<u32>,

    /// List in `<dice> <word>` format.
    pub list: PathBuf,

    #[arg(long, default_value_t = 10)]
    pub show_pairs: usize,
}

impl ValidateArgs {
    /// Only the similarity settings apply to an audit.
    pub fn config(&self) -> Config {
        Config {
            similarity: self.similarity.clone(),
            ..Default::default()
        }
    }
}

pub fn run(args: ValidateArgs, config: Config) -> DlResult<()> {
    info!("🔎 Auditing {}", args.list.display());
    let list = WordList::load(&args.list)?;
    let mut problems = Vec::new();
    if let Some(expected) = args.expect_dice {
        if expected != list.num_dice() {
            problems.push(format!(
                "expected a {}-dice list, found {} dice per entry",
                expected,
                list.num_dice()
            ));
        }
    }
    problems.extend(list.audit());

    let words: Vec<&str> = list.words().collect();
    let matrix = SimilarityMatrix::from_words(
        &words,
        config.similarity.metric,
        config.similarity.decay_base,
    );
    let members: Vec<usize> = (0..words.len()).collect();

    reports::print_summary(
        "LIST AUDIT",
        &[
            ("Dice", list.num_dice().to_string()),
            ("Words", list.len().to_string()),
            ("Metric", config.similarity.metric.to_string()),
            ("Score", format!("{:.6e}", matrix.subset_sum(&members))),
        ],
    );

    let pairs: Vec<(&str, &str, f32)> = matrix
        .closest_pairs(&members, args.show_pairs)
        .into_iter()
        .map(|(a, b, s)| (words[a], words[b], s))
        .collect();
    reports::print_closest_pairs(&pairs);
    reports::print_problems(&problems);

    if problems.is_empty() {
        Ok(())
    } else {
        Err(DicelistError::Validation(format!(
            "{} problem(s) in {}",
            problems.len(),
            args.list.display()
        )))
    }
}
