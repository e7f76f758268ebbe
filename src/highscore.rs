//! Ranked list of the best final scores, kept in a JSON file between runs.

use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const SCORE_COUNT: usize = 10;

#[derive(Error, Debug)]
pub enum HighScoreError {
    #[error("Couldn't access the score file")]
    Io(#[from] io::Error),
    #[error("The score file isn't a valid list of scores")]
    Json(#[from] serde_json::Error),
    #[error("Expected 10 scores, found {0}")]
    WrongLength(usize),
}

/// Always holds [`SCORE_COUNT`] scores, highest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScores {
    scores: [u64; SCORE_COUNT],
}

impl Default for HighScores {
    fn default() -> Self {
        Self {
            scores: [0; SCORE_COUNT],
        }
    }
}

impl HighScores {
    /// A missing file gives an all-zero list.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, HighScoreError> {
        let path = path.as_ref();

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no score file yet");
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };

        let list: Vec<u64> = serde_json::from_str(&contents)?;
        let mut scores: [u64; SCORE_COUNT] = list
            .as_slice()
            .try_into()
            .map_err(|_| HighScoreError::WrongLength(list.len()))?;

        scores.sort_unstable_by(|a, b| b.cmp(a));

        Ok(Self { scores })
    }

    /// Like [`load`](Self::load), but a file that exists and can't be parsed
    /// is moved to `<path>.bak` and an empty list is returned, so a later
    /// save doesn't overwrite it.
    pub fn load_or_backup(path: impl AsRef<Path>) -> Result<Self, HighScoreError> {
        let path = path.as_ref();

        match Self::load(path) {
            Err(HighScoreError::Json(_) | HighScoreError::WrongLength(_)) => {
                let backup = backup_path(path);
                warn!(backup = %backup.display(), "score file unreadable, moving it aside");
                fs::rename(path, &backup)?;
                Ok(Self::default())
            }
            result => result,
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), HighScoreError> {
        let json = serde_json::to_string(&self.scores)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Replaces the lowest score if `score` beats it. Returns whether the
    /// list changed.
    pub fn add_score(&mut self, score: u64) -> bool {
        let Some(lowest) = self
            .scores
            .iter_mut()
            .min_by_key(|existing| **existing)
        else {
            return false;
        };

        if score <= *lowest {
            return false;
        }

        *lowest = score;
        self.scores.sort_unstable_by(|a, b| b.cmp(a));
        info!(score, "new high score");
        true
    }

    pub fn scores(&self) -> &[u64] {
        &self.scores
    }

    pub fn best(&self) -> u64 {
        self.scores[0]
    }
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".bak");
    PathBuf::from(name)
}
