//! Everything one run of the program needs, passed through the frame loop.

use super::{
    config::GameConfig,
    dictionary::Dictionary,
    highscore::HighScores,
    spawner::Spawner,
    state::{GameState, StateError},
    word::Word,
};
use anyhow::Result;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Screen {
    Main,
    Playing,
    Paused,
    GameOver,
}

/// What changed during an input or a tick, for the status display.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Transition {
    ScoreChanged(u64),
    LevelChanged(u32),
    LifeLost(u32),
    GameOver { score: u64, new_high_score: bool },
}

pub struct Session {
    pub columns: u16,
    pub rows: u16,
    pub screen: Screen,
    pub err: Option<anyhow::Error>,
    game: GameState,
    high_scores: HighScores,
    config: GameConfig,
    dictionary: Dictionary,
    spawner: Spawner,
}

/// A word has failed once it is completely past the left edge.
fn off_screen(word: &Word) -> bool {
    word.x + (word.width() as f32) < 0.0
}

impl Session {
    pub fn new(
        config: GameConfig,
        dictionary: Dictionary,
        high_scores: HighScores,
        columns: u16,
        rows: u16,
    ) -> Self {
        let spawner = Spawner::new(config.spawn_interval_ms, config.base_speed, config.seed);

        Self {
            columns,
            rows,
            screen: Screen::Main,
            err: None,
            game: Self::fresh_game(&config),
            high_scores,
            config,
            dictionary,
            spawner,
        }
    }

    fn fresh_game(config: &GameConfig) -> GameState {
        GameState::new(0, 1, config.lives, config.entry_offset)
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn start(&mut self) {
        self.game = Self::fresh_game(&self.config);
        self.spawner.reset();
        self.err = None;
        self.screen = Screen::Playing;
        info!(lives = self.config.lives, "game started");
    }

    pub fn toggle_pause(&mut self) {
        self.screen = match self.screen {
            Screen::Playing => Screen::Paused,
            Screen::Paused => Screen::Playing,
            other => other,
        };
    }

    pub fn quit_to_menu(&mut self) {
        self.screen = Screen::Main;
    }

    /// Applies a typed letter, then checks for a finished word and a level up.
    ///
    /// # Errors
    /// Returns [`StateError::NotASingleCharacter`] for letters whose lowercase
    /// form is more than one character.
    pub fn type_char(&mut self, c: char) -> Result<Vec<Transition>, StateError> {
        let mut transitions = Vec::new();

        if self.screen != Screen::Playing || !c.is_alphabetic() {
            return Ok(transitions);
        }

        let lowered: String = c.to_lowercase().collect();
        self.game.enter_input(&lowered)?;

        if self.game.complete_word() {
            transitions.push(Transition::ScoreChanged(self.game.score()));

            if self.game.level_up(self.config.level_interval) {
                transitions.push(Transition::LevelChanged(self.game.level()));
            }
        }

        Ok(transitions)
    }

    /// Moves the game forward by `dt` seconds: spawn, move, then remove the
    /// words that left the screen. Ends the game once the last life is gone.
    pub fn tick(&mut self, dt: f32) -> Result<Vec<Transition>> {
        let mut transitions = Vec::new();

        if self.screen != Screen::Playing {
            return Ok(transitions);
        }

        if let Some(word) = self.spawner.tick(
            dt,
            self.game.level(),
            &self.dictionary,
            self.columns,
            self.rows,
        )? {
            self.game.add_word(word);
        }

        self.game.advance_words(dt);

        if self.game.failed_words(off_screen) {
            transitions.push(Transition::LifeLost(self.game.lives()));
        }

        if self.game.is_over() {
            let score = self.game.score();
            let new_high_score = self.high_scores.add_score(score);
            self.screen = Screen::GameOver;
            transitions.push(Transition::GameOver {
                score,
                new_high_score,
            });
            info!(score, new_high_score, "game over");

            if new_high_score {
                if let Err(err) = self.high_scores.save(&self.config.scores_path) {
                    warn!(%err, "couldn't save high scores");
                    return Err(err.into());
                }
            }
        }

        Ok(transitions)
    }

    /// Rescales word positions to a new terminal size.
    pub fn resize(&mut self, columns: u16, rows: u16) {
        let scale_x = f32::from(columns) / f32::from(self.columns.max(1));
        let scale_y = f32::from(rows) / f32::from(self.rows.max(1));

        for word in self.game.words_mut() {
            word.x *= scale_x;
            word.y = (word.y * scale_y).floor();
        }

        self.columns = columns;
        self.rows = rows;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::path::PathBuf;

    fn scores_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("tip-{}-session-{name}.json", std::process::id()))
    }

    fn session(lives: u32, name: &str) -> Session {
        let config = GameConfig {
            lives,
            entry_offset: 8.0,
            // Long enough that only the first tick spawns
            spawn_interval_ms: 1_000_000,
            scores_path: scores_path(name),
            seed: Some(5),
            ..GameConfig::default()
        };

        Session::new(
            config,
            Dictionary::parse("zzz\n"),
            HighScores::default(),
            80,
            24,
        )
    }

    fn add(session: &mut Session, text: &str, x: f32) {
        let word = Word::new(text, 1.0, 10.0, x, 3.0).unwrap();
        session.game.add_word(word);
    }

    #[test]
    fn input_is_ignored_outside_of_play() {
        let mut session = session(3, "menu");
        add(&mut session, "cat", 50.0);

        assert!(session.type_char('c').unwrap().is_empty());
        assert_eq!(session.game().entry(), "");
    }

    #[test]
    fn completing_a_word_reports_score() {
        let mut session = session(3, "score");
        session.start();
        add(&mut session, "cat", 50.0);

        assert!(session.type_char('C').unwrap().is_empty());
        assert!(session.type_char('a').unwrap().is_empty());
        assert_eq!(session.type_char('t').unwrap(), vec![Transition::ScoreChanged(3)]);
        assert_eq!(session.game().word_count(), 0);
    }

    #[test]
    fn non_letters_are_ignored() {
        let mut session = session(3, "symbols");
        session.start();
        add(&mut session, "cat", 50.0);

        session.type_char('1').unwrap();
        session.type_char(' ').unwrap();
        assert_eq!(session.game().entry(), "");
    }

    #[test]
    fn level_up_follows_completion() {
        let mut session = session(3, "level");
        session.config.level_interval = 2;
        session.start();
        add(&mut session, "cat", 50.0);

        for c in "ca".chars() {
            session.type_char(c).unwrap();
        }
        assert_eq!(
            session.type_char('t').unwrap(),
            vec![Transition::ScoreChanged(3), Transition::LevelChanged(2)]
        );
    }

    #[test]
    fn tick_moves_words_then_fails_those_off_screen() {
        let mut session = session(3, "tick");
        session.start();
        add(&mut session, "ab", 1.0);

        let transitions = session.tick(0.5).unwrap();

        assert_eq!(transitions, vec![Transition::LifeLost(2)]);
        assert_eq!(session.game().lives(), 2);
        assert!(session.game().words().all(|w| w.text() != "ab"));
        // The spawned word is still on its way in
        assert_eq!(session.game().word_count(), 1);
    }

    #[test]
    fn losing_last_life_ends_the_game() {
        let path = scores_path("over");
        let _ = std::fs::remove_file(&path);

        let mut session = session(1, "over");
        session.start();
        add(&mut session, "go", 50.0);
        session.type_char('g').unwrap();
        session.type_char('o').unwrap();
        add(&mut session, "ab", 0.5);

        let transitions = session.tick(0.5).unwrap();

        assert_eq!(
            transitions,
            vec![
                Transition::LifeLost(0),
                Transition::GameOver {
                    score: 2,
                    new_high_score: true
                }
            ]
        );
        assert_eq!(session.screen, Screen::GameOver);
        assert_eq!(session.high_scores().best(), 2);

        let saved = HighScores::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(saved.best(), 2);

        assert!(session.tick(1.0).unwrap().is_empty());
    }

    #[test]
    fn paused_game_does_not_move() {
        let mut session = session(3, "pause");
        session.start();
        add(&mut session, "cat", 50.0);
        session.toggle_pause();

        assert!(session.tick(1.0).unwrap().is_empty());
        assert_relative_eq!(session.game().words().next().unwrap().x, 50.0);

        session.toggle_pause();
        assert_eq!(session.screen, Screen::Playing);
    }

    #[test]
    fn start_resets_the_game() {
        let mut session = session(3, "restart");
        session.start();
        add(&mut session, "cat", 50.0);
        session.type_char('c').unwrap();

        session.quit_to_menu();
        session.start();

        assert_eq!(session.game().word_count(), 0);
        assert_eq!(session.game().lives(), 3);
        assert_eq!(session.game().entry(), "");
    }

    #[test]
    fn resize_scales_positions() {
        let mut session = session(3, "resize");
        session.start();
        add(&mut session, "cat", 40.0);

        session.resize(160, 48);

        let word = session.game().words().next().unwrap();
        assert_relative_eq!(word.x, 80.0);
        assert_relative_eq!(word.y, 6.0);
        assert_eq!((session.columns, session.rows), (160, 48));
    }

    #[test]
    fn letter_with_multi_character_lowercase_is_rejected() {
        let mut session = session(3, "dotted");
        session.start();
        add(&mut session, "cat", 50.0);

        assert!(matches!(
            session.type_char('\u{130}'),
            Err(StateError::NotASingleCharacter(_))
        ));
        assert_eq!(session.game().entry(), "");
    }

    #[test]
    fn word_fails_only_once_fully_past_left_edge() {
        let mut session = session(3, "edge");
        session.start();
        add(&mut session, "cat", 4.0);

        // Right edge lands on column 2, still visible
        assert!(session.tick(0.5).unwrap().is_empty());
        assert_eq!(session.game().lives(), 3);

        // Right edge now at column -3
        assert_eq!(session.tick(0.5).unwrap(), vec![Transition::LifeLost(2)]);
    }
}
