//! Game state engine
//!
//! Owns the active words, the targeted word with its typed entry, and the
//! score, level and lives of one game session. Every change to the game goes
//! through the methods here.

use super::word::Word;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("Expected exactly one character, got {0:?}")]
    NotASingleCharacter(String),
}

/// Stable handle for a word owned by a [`GameState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WordId(u64);

/// Which word, if any, the player is typing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Idle,
    Typing { id: WordId, entry: String },
}

#[derive(Debug, Clone)]
pub struct GameState {
    score: u64,
    level: u32,
    lives: u32,
    /// Words at or left of this column can't become a new target.
    entry_offset: f32,
    /// Spawn order.
    words: Vec<(WordId, Word)>,
    next_id: u64,
    target: Target,
}

impl GameState {
    /// `level` is clamped to at least 1.
    pub fn new(score: u64, level: u32, lives: u32, entry_offset: f32) -> Self {
        Self {
            score,
            level: level.max(1),
            lives,
            entry_offset,
            words: Vec::new(),
            next_id: 0,
            target: Target::Idle,
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn entry_offset(&self) -> f32 {
        self.entry_offset
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    /// The typed entry, empty while no word is targeted.
    pub fn entry(&self) -> &str {
        match &self.target {
            Target::Idle => "",
            Target::Typing { entry, .. } => entry,
        }
    }

    pub fn current_word(&self) -> Option<&Word> {
        match &self.target {
            Target::Idle => None,
            Target::Typing { id, .. } => self.word(*id),
        }
    }

    pub fn word(&self, id: WordId) -> Option<&Word> {
        self.words
            .iter()
            .find(|(word_id, _)| *word_id == id)
            .map(|(_, word)| word)
    }

    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.words.iter().map(|(_, word)| word)
    }

    pub fn words_mut(&mut self) -> impl Iterator<Item = &mut Word> {
        self.words.iter_mut().map(|(_, word)| word)
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn add_word(&mut self, word: Word) -> WordId {
        let id = WordId(self.next_id);
        self.next_id += 1;
        self.words.push((id, word));
        id
    }

    pub fn advance_words(&mut self, dt: f32) {
        for word in self.words_mut() {
            word.advance(dt);
        }
    }

    /// Feeds one typed character.
    ///
    /// With no target, the word starting with `c` that is closest to the
    /// left edge, and still right of the entry offset, becomes the target.
    /// Ties go to the earliest spawned word. The character is then appended
    /// to the entry if it is the next one in the target's text; anything
    /// else is ignored and the entry is kept.
    pub fn enter_character(&mut self, c: char) {
        if self.target == Target::Idle {
            let offset = self.entry_offset;

            // min_by keeps the first of equal elements, which is the oldest word
            let closest = self
                .words
                .iter()
                .filter(|(_, word)| word.first_char() == Some(c) && word.x > offset)
                .min_by(|(_, a), (_, b)| a.x.total_cmp(&b.x))
                .map(|(id, _)| *id);

            if let Some(id) = closest {
                debug!(?id, "targeting new word");
                self.target = Target::Typing {
                    id,
                    entry: String::new(),
                };
            }
        }

        let Target::Typing { id, entry } = &mut self.target else {
            return;
        };
        let id = *id;

        let Some((_, word)) = self.words.iter().find(|(word_id, _)| *word_id == id) else {
            return;
        };

        if word.text().chars().nth(entry.chars().count()) == Some(c) {
            entry.push(c);
        }
    }

    /// Same as [`enter_character`](Self::enter_character) for raw key text.
    ///
    /// # Errors
    /// Returns [`StateError::NotASingleCharacter`] if `input` is empty or holds
    /// more than one character.
    pub fn enter_input(&mut self, input: &str) -> Result<(), StateError> {
        let mut chars = input.chars();

        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                self.enter_character(c);
                Ok(())
            }
            _ => Err(StateError::NotASingleCharacter(input.to_owned())),
        }
    }

    pub fn word_is_complete(&self) -> bool {
        match &self.target {
            Target::Idle => false,
            Target::Typing { id, entry } => self
                .word(*id)
                .map_or(false, |word| word.text() == entry.as_str()),
        }
    }

    /// Scores and removes the target if it has been fully typed.
    ///
    /// Adds `characters * level` to the score. Returns whether a word was
    /// completed.
    pub fn complete_word(&mut self) -> bool {
        if !self.word_is_complete() {
            return false;
        }

        let Target::Typing { id, .. } = std::mem::replace(&mut self.target, Target::Idle) else {
            return false;
        };

        if let Some(position) = self.position_of(id) {
            let (_, word) = self.words.remove(position);
            self.score += word.width() as u64 * u64::from(self.level);
            info!(word = word.text(), score = self.score, "word completed");
        }

        true
    }

    /// Goes up one level once the score is strictly above
    /// `level_interval * level^2`.
    pub fn level_up(&mut self, level_interval: u64) -> bool {
        let level = u64::from(self.level);
        let threshold = level_interval.saturating_mul(level * level);

        if self.score > threshold && self.level < u32::MAX {
            self.level += 1;
            info!(level = self.level, "level up");
            return true;
        }

        false
    }

    /// Removes every word matching `fail_condition`, one life per word.
    ///
    /// Words are removed even when no lives are left. Returns whether at
    /// least one life was lost.
    pub fn failed_words<F>(&mut self, fail_condition: F) -> bool
    where
        F: Fn(&Word) -> bool,
    {
        let failed: Vec<WordId> = self
            .words
            .iter()
            .filter(|(_, word)| fail_condition(word))
            .map(|(id, _)| *id)
            .collect();

        let mut lives_lost = false;

        for id in failed {
            if matches!(&self.target, Target::Typing { id: target, .. } if *target == id) {
                self.target = Target::Idle;
            }

            if let Some(position) = self.position_of(id) {
                self.words.remove(position);
            }

            if self.lives > 0 {
                self.lives -= 1;
                lives_lost = true;
                info!(lives = self.lives, "life lost");
            }
        }

        lives_lost
    }

    pub fn is_over(&self) -> bool {
        self.lives == 0
    }

    fn position_of(&self, id: WordId) -> Option<usize> {
        self.words.iter().position(|(word_id, _)| *word_id == id)
    }
}
