use crate::game::MAX_ATTEMPTS;
use log::{info, warn};
use std::{
    fmt::{self, Display, Formatter},
    fs, io,
    path::PathBuf,
    str::FromStr,
};
use thiserror::Error;

const FIELDS: usize = 4 + MAX_ATTEMPTS;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    pub played: u32,
    pub wins: u32,
    pub current_streak: u32,
    pub max_streak: u32,
    /// Wins by number of attempts used, `distribution[0]` being a first-guess win.
    pub distribution: [u32; MAX_ATTEMPTS],
}

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("expected 10 numbers, found {0}")]
    FieldCount(usize),
    #[error("invalid number {0:?}")]
    Number(String),
    #[error("could not write stats to {path}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl Stats {
    pub fn record_win(&mut self, attempts_used: usize) {
        self.played = self.played.saturating_add(1);
        self.wins = self.wins.saturating_add(1);
        self.current_streak = self.current_streak.saturating_add(1);
        self.max_streak = self.max_streak.max(self.current_streak);
        if let Some(bucket) = attempts_used
            .checked_sub(1)
            .and_then(|i| self.distribution.get_mut(i))
        {
            *bucket = bucket.saturating_add(1);
        }
    }

    pub fn record_loss(&mut self) {
        self.played = self.played.saturating_add(1);
        self.current_streak = 0;
    }

    pub fn record_result(&mut self, won: bool, attempts_used: usize) {
        if won {
            self.record_win(attempts_used)
        } else {
            self.record_loss()
        }
    }

    /// Wins that took exactly `attempts` guesses.
    pub fn wins_in(&self, attempts: usize) -> u32 {
        attempts
            .checked_sub(1)
            .and_then(|i| self.distribution.get(i))
            .copied()
            .unwrap_or(0)
    }

    /// Share of games won, 0 when nothing has been played yet.
    pub fn win_percentage(&self) -> f64 {
        if self.played == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.played) * 100.0
        }
    }
}

// Older records were written as floats ("3.000000"), accept those too.
fn parse_count(token: &str) -> Result<u32, StatsError> {
    token
        .parse::<u32>()
        .ok()
        .or_else(|| {
            token
                .parse::<f64>()
                .ok()
                .filter(|v| {
                    v.is_finite() && *v >= 0.0 && v.fract() == 0.0 && *v <= f64::from(u32::MAX)
                })
                .map(|v| v as u32)
        })
        .ok_or_else(|| StatsError::Number(token.to_string()))
}

impl FromStr for Stats {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split_whitespace()
            .map(parse_count)
            .collect::<Result<Vec<u32>, _>>()?;
        if values.len() != FIELDS {
            return Err(StatsError::FieldCount(values.len()));
        }
        let mut distribution = [0; MAX_ATTEMPTS];
        distribution.copy_from_slice(&values[4..]);
        Ok(Stats {
            played: values[0],
            wins: values[1],
            current_streak: values[2],
            max_streak: values[3],
            distribution,
        })
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.played, self.wins, self.current_streak, self.max_streak
        )?;
        self.distribution
            .iter()
            .try_for_each(|n| write!(f, " {}", n))
    }
}

/// Flat file holding a single [`Stats`] record.
#[derive(Debug, Clone)]
pub struct StatsStore {
    path: PathBuf,
}

impl StatsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads the stored record. Anything missing or unreadable counts as a
    /// fresh start.
    pub fn load(&self) -> Stats {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("no stats at {}, starting fresh", self.path.display());
                return Stats::default();
            }
            Err(e) => {
                warn!("could not read {}: {}", self.path.display(), e);
                return Stats::default();
            }
        };
        content.parse().unwrap_or_else(|e| {
            warn!("ignoring stats in {}: {}", self.path.display(), e);
            Stats::default()
        })
    }

    pub fn save(&self, stats: &Stats) -> Result<(), StatsError> {
        fs::write(&self.path, format!("{}\n", stats)).map_err(|source| StatsError::Write {
            path: self.path.display().to_string(),
            source,
        })
    }

    /// Folds one finished game into the stored record and returns the
    /// record as it now reads back from disk.
    pub fn record_result(&self, won: bool, attempts_used: usize) -> Result<Stats, StatsError> {
        let mut stats = self.load();
        stats.record_result(won, attempts_used);
        self.save(&stats)?;
        info!(
            "recorded {} after {} guesses",
            if won { "win" } else { "loss" },
            attempts_used
        );
        Ok(self.load())
    }
}
