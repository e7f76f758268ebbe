use lazy_static::lazy_static;
use std::{fs, path::Path};
use anyhow::{bail, Result};

lazy_static! {
    /// Word list compiled into the binary.
    pub static ref DICTIONARY: Dictionary =
        Dictionary::parse(include_str!("../dictionary.txt"));
}

#[derive(Debug, Clone)]
pub struct Dictionary {
    words: Vec<String>,
}

impl Dictionary {
    /// One word per line. Blank lines and lines with anything other than
    /// letters are skipped, the rest are lowercased.
    pub fn parse(contents: &str) -> Self {
        let words = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && line.chars().all(char::is_alphabetic))
            .map(str::to_lowercase)
            .collect();

        Self { words }
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let dictionary = Self::parse(&fs::read_to_string(path)?);

        if dictionary.is_empty() {
            bail!("{} doesn't contain any usable words", path.display());
        }

        Ok(dictionary)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn pick(&self, rng: &fastrand::Rng) -> Option<&str> {
        if self.words.is_empty() {
            return None;
        }

        Some(&self.words[rng.usize(..self.words.len())])
    }
}
