use chrono::{Local, NaiveDate};
use log::{debug, info};
use rand::{seq::SliceRandom, Rng};
use std::{
    fmt::{self, Debug, Display, Formatter},
    fs,
    path::Path,
    str::FromStr,
};
use thiserror::Error;

pub const WORD_LENGTH: usize = 5;

/// A five letter word, stored as lowercase ASCII.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Word([u8; WORD_LENGTH]);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WordError {
    #[error("word must be exactly 5 letters, got {0}")]
    InvalidLength(usize),
    #[error("word may only contain the letters a-z")]
    InvalidCharacters,
}

impl Word {
    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().map(|&b| b as char)
    }

    pub fn letter(&self, i: usize) -> char {
        self.0[i] as char
    }
}

impl FromStr for Word {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let len = s.chars().count();
        if len != WORD_LENGTH {
            return Err(WordError::InvalidLength(len));
        }
        let mut bytes = [0u8; WORD_LENGTH];
        for (slot, c) in bytes.iter_mut().zip(s.chars()) {
            if !c.is_ascii_alphabetic() {
                return Err(WordError::InvalidCharacters);
            }
            *slot = c.to_ascii_lowercase() as u8;
        }
        Ok(Word(bytes))
    }
}

impl Display for Word {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.letters().try_for_each(|c| write!(f, "{}", c))
    }
}

impl Debug for Word {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Word({})", self)
    }
}

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("could not read word list {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: invalid entry {entry:?}")]
    Malformed {
        line: usize,
        entry: String,
        #[source]
        source: WordError,
    },
    #[error("word list is empty")]
    Empty,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GuessError {
    #[error("Guesses must be 5 letters a-z.")]
    Malformed(#[from] WordError),
    #[error("Not in word list.")]
    NotInWordList,
}

/// The set of playable words. Secrets are drawn from it and guesses are
/// checked against it. Never empty: `parse` rejects an empty list.
#[derive(Clone)]
pub struct Corpus {
    words: Vec<Word>,
}

impl Debug for Corpus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Corpus({} words)", self.words.len())
    }
}

impl Corpus {
    /// Loads the word list at `path`, or the embedded list when no path is given.
    pub fn load(path: Option<impl AsRef<Path>>) -> Result<Self, CorpusError> {
        let corpus = match path {
            Some(p) => {
                let p = p.as_ref();
                let content = fs::read_to_string(p).map_err(|source| CorpusError::Io {
                    path: p.display().to_string(),
                    source,
                })?;
                Self::parse(&content)?
            }
            None => Self::parse(include_str!("../data/wordlist.txt"))?,
        };
        info!("loaded {} words", corpus.len());
        Ok(corpus)
    }

    pub fn parse(content: &str) -> Result<Self, CorpusError> {
        let words = content
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty())
            .map(|(line, entry)| {
                entry.parse().map_err(|source| CorpusError::Malformed {
                    line,
                    entry: entry.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<Word>, _>>()?;
        if words.is_empty() {
            return Err(CorpusError::Empty);
        }
        Ok(Corpus { words })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_valid_word(&self, word: &Word) -> bool {
        self.words.contains(word)
    }

    /// Turns raw player input into a playable word.
    pub fn parse_guess(&self, input: &str) -> Result<Word, GuessError> {
        let word: Word = input.trim().parse()?;
        if self.is_valid_word(&word) {
            Ok(word)
        } else {
            Err(GuessError::NotInWordList)
        }
    }

    pub fn random_word<R: Rng + ?Sized>(&self, rng: &mut R) -> Word {
        // parse() guarantees a non-empty list
        let word = *self.words.choose(rng).unwrap_or_else(|| &self.words[0]);
        debug!("picked random secret");
        word
    }

    pub fn word_of_the_day(&self) -> Word {
        self.word_for_date(Local::now().date_naive())
    }

    pub fn word_for_date(&self, date: NaiveDate) -> Word {
        let days = NaiveDate::from_ymd_opt(2021, 6, 19)
            .map(|epoch| date.signed_duration_since(epoch).num_days())
            .unwrap_or_default();
        let idx = days.rem_euclid(self.words.len() as i64) as usize;
        debug!("word of the day index {}", idx);
        self.words[idx]
    }
}
