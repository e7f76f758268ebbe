//! Decides when new words appear, where, and how fast they travel.

use super::{
    dictionary::Dictionary,
    word::{Word, WordError},
};
use tracing::debug;

/// Spawn interval never drops below this many milliseconds.
const MIN_INTERVAL_MS: f32 = 400.0;

pub struct Spawner {
    rng: fastrand::Rng,
    interval_ms: u64,
    base_speed: f32,
    elapsed_ms: f32,
}

impl Spawner {
    pub fn new(interval_ms: u64, base_speed: f32, seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);

        Self {
            rng,
            interval_ms,
            base_speed,
            // The first tick of a game spawns straight away
            elapsed_ms: f32::INFINITY,
        }
    }

    pub fn reset(&mut self) {
        self.elapsed_ms = f32::INFINITY;
    }

    /// Milliseconds between spawns, shorter on higher levels.
    pub fn interval_ms(&self, level: u32) -> f32 {
        let scale = 1.0 + 0.1 * level.saturating_sub(1) as f32;
        (self.interval_ms as f32 / scale).max(MIN_INTERVAL_MS)
    }

    /// Columns per second. Longer words are slower and every level is faster.
    pub fn speed_for(&self, width: usize, level: u32) -> f32 {
        let level_scale = 1.0 + 0.15 * level.saturating_sub(1) as f32;
        self.base_speed * level_scale * 6.0 / (width as f32 + 2.0)
    }

    pub fn size_for(width: usize) -> f32 {
        1.0 + width as f32 / 8.0
    }

    /// Advances the timer by `dt` seconds, returning at most one new word.
    pub fn tick(
        &mut self,
        dt: f32,
        level: u32,
        dictionary: &Dictionary,
        columns: u16,
        rows: u16,
    ) -> Result<Option<Word>, WordError> {
        self.elapsed_ms += dt * 1000.0;

        if self.elapsed_ms < self.interval_ms(level) {
            return Ok(None);
        }
        self.elapsed_ms = 0.0;

        let Some(text) = dictionary.pick(&self.rng) else {
            return Ok(None);
        };

        self.spawn(text, level, columns, rows).map(Some)
    }

    /// A word just past the right edge on a random row between the status
    /// line and the bottom line.
    pub fn spawn(
        &self,
        text: &str,
        level: u32,
        columns: u16,
        rows: u16,
    ) -> Result<Word, WordError> {
        let width = text.chars().count();
        let row = if rows > 2 {
            self.rng.u16(1..rows - 1)
        } else {
            0
        };

        debug!(text, row, "spawning word");

        Word::new(
            text,
            Self::size_for(width),
            self.speed_for(width, level),
            f32::from(columns),
            f32::from(row),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn dictionary() -> Dictionary {
        Dictionary::parse("ferris\ncrab\n")
    }

    #[test]
    fn first_tick_spawns_immediately() {
        let mut spawner = Spawner::new(2000, 6.0, Some(1));
        let word = spawner.tick(0.016, 1, &dictionary(), 80, 24).unwrap();
        assert!(word.is_some());
    }

    #[test]
    fn waits_for_interval_between_spawns() {
        let mut spawner = Spawner::new(1000, 6.0, Some(1));
        let dictionary = dictionary();
        spawner.tick(0.0, 1, &dictionary, 80, 24).unwrap();

        assert!(spawner.tick(0.5, 1, &dictionary, 80, 24).unwrap().is_none());
        assert!(spawner.tick(0.4, 1, &dictionary, 80, 24).unwrap().is_none());
        assert!(spawner.tick(0.2, 1, &dictionary, 80, 24).unwrap().is_some());
    }

    #[test]
    fn spawned_word_starts_at_right_edge_inside_play_rows() {
        let spawner = Spawner::new(1000, 6.0, Some(3));

        for _ in 0..50 {
            let word = spawner.spawn("crab", 1, 80, 24).unwrap();
            assert_relative_eq!(word.x, 80.0);
            assert!(word.y >= 1.0 && word.y <= 22.0);
        }
    }

    #[test]
    fn longer_words_are_slower_and_levels_are_faster() {
        let spawner = Spawner::new(1000, 6.0, Some(3));

        assert!(spawner.speed_for(10, 1) < spawner.speed_for(3, 1));
        assert!(spawner.speed_for(5, 3) > spawner.speed_for(5, 1));
        assert_relative_eq!(spawner.speed_for(4, 1), 6.0);
    }

    #[test]
    fn interval_shrinks_with_level_down_to_floor() {
        let spawner = Spawner::new(2000, 6.0, None);

        assert_relative_eq!(spawner.interval_ms(1), 2000.0);
        assert_relative_eq!(spawner.interval_ms(11), 1000.0);
        assert_relative_eq!(spawner.interval_ms(1000), MIN_INTERVAL_MS);
    }

    #[test]
    fn same_seed_gives_same_rows() {
        let a = Spawner::new(1000, 6.0, Some(42));
        let b = Spawner::new(1000, 6.0, Some(42));

        for _ in 0..10 {
            assert_eq!(
                a.spawn("crab", 1, 80, 24).unwrap().y,
                b.spawn("crab", 1, 80, 24).unwrap().y
            );
        }
    }
}
