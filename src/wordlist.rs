use crate::corpus::CandidateSet;
use crate::dice;
use crate::error::{DicelistError, DlResult};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiceEntry {
    pub dice: String,
    pub word: String,
}

/// A finished list: entry `i` pairs `encode(i)` with the i-th word in
/// alphabetical order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordList {
    num_dice: u32,
    entries: Vec<DiceEntry>,
}

impl WordList {
    /// Resolves the selected candidate ranks to words and numbers them.
    pub fn project(candidates: &CandidateSet, selected: &[usize], num_dice: u32) -> DlResult<Self> {
        let words = selected
            .iter()
            .map(|&rank| {
                candidates
                    .get(rank)
                    .map(|w| w.text.clone())
                    .ok_or_else(|| {
                        DicelistError::Validation(format!("candidate {} does not exist", rank))
                    })
            })
            .collect::<DlResult<Vec<String>>>()?;
        Self::from_words(words, num_dice)
    }

    pub fn from_words(mut words: Vec<String>, num_dice: u32) -> DlResult<Self> {
        let expected = dice::word_count(num_dice)?;
        if words.len() != expected {
            return Err(DicelistError::Validation(format!(
                "{} dice need {} words, got {}",
                num_dice,
                expected,
                words.len()
            )));
        }

        words.sort();
        let entries = words
            .into_iter()
            .enumerate()
            .map(|(i, word)| {
                Ok(DiceEntry {
                    dice: dice::encode(i, num_dice)?,
                    word,
                })
            })
            .collect::<DlResult<Vec<_>>>()?;

        Ok(Self { num_dice, entries })
    }

    pub fn num_dice(&self) -> u32 {
        self.num_dice
    }

    pub fn entries(&self) -> &[DiceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.word.as_str())
    }

    /// The word for a roll such as "3512".
    pub fn lookup(&self, roll: &str) -> Option<&str> {
        let idx = dice::decode(roll).ok()?;
        self.entries
            .get(idx)
            .filter(|e| e.dice == roll)
            .map(|e| e.word.as_str())
    }

    pub fn write_to<W: Write>(&self, writer: W) -> DlResult<()> {
        let mut out = BufWriter::new(writer);
        for e in &self.entries {
            writeln!(out, "{} {}", e.dice, e.word)?;
        }
        out.flush()?;
        Ok(())
    }

    /// Writes through a temporary file in the same directory and renames it
    /// into place.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> DlResult<()> {
        let path = path.as_ref();
        let parent_dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent_dir)?;

        let temp_file = NamedTempFile::new_in(parent_dir)?;
        self.write_to(temp_file.as_file())?;
        temp_file.persist(path).map_err(|e| e.error)?;
        Ok(())
    }

    /// Reads `"<dice> <word>"` lines. Blank lines are ignored; the dice count
    /// is taken from the first entry. Completeness is checked by [`audit`].
    ///
    /// [`audit`]: WordList::audit
    pub fn parse<R: BufRead>(reader: R) -> DlResult<Self> {
        let mut entries = Vec::new();
        for (lineno, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (roll, word) = line.split_once(char::is_whitespace).ok_or_else(|| {
                DicelistError::Validation(format!("line {}: expected '<dice> <word>'", lineno + 1))
            })?;
            entries.push(DiceEntry {
                dice: roll.to_string(),
                word: word.trim().to_string(),
            });
        }

        let first = entries
            .first()
            .ok_or_else(|| DicelistError::Validation("word list is empty".to_string()))?;
        let num_dice = u32::try_from(first.dice.chars().count())
            .map_err(|_| DicelistError::Validation("dice sequence too long".to_string()))?;

        Ok(Self { num_dice, entries })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> DlResult<Self> {
        let file = File::open(path)?;
        Self::parse(BufReader::new(file))
    }

    /// Every way this list deviates from a well-formed dice list. Empty means
    /// the list is usable.
    pub fn audit(&self) -> Vec<String> {
        let mut problems = Vec::new();

        match dice::word_count(self.num_dice) {
            Ok(expected) if expected != self.entries.len() => problems.push(format!(
                "{} dice need {} words, found {}",
                self.num_dice,
                expected,
                self.entries.len()
            )),
            Ok(_) => {}
            Err(e) => problems.push(e.to_string()),
        }

        for (i, e) in self.entries.iter().enumerate() {
            match dice::encode(i, self.num_dice) {
                Ok(expected) if expected == e.dice => {}
                Ok(expected) => {
                    problems.push(format!("entry {}: expected '{}', found '{}'", i + 1, expected, e.dice))
                }
                Err(_) => problems.push(format!("entry {}: '{}' is surplus", i + 1, e.dice)),
            }
        }

        let mut seen = HashSet::new();
        for e in &self.entries {
            if !seen.insert(e.word.as_str()) {
                problems.push(format!("duplicate word '{}'", e.word));
            }
        }

        if let Some(pair) = self.entries.windows(2).find(|w| w[0].word > w[1].word) {
            problems.push(format!(
                "'{}' is listed before '{}'",
                pair[0].word, pair[1].word
            ));
        }

        problems
    }
}
