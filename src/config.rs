use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("A game needs at least one life")]
    NoLives,
    #[error("Level interval must be positive")]
    LevelInterval,
    #[error("Spawn interval must be positive")]
    SpawnInterval,
    #[error("Base speed must be a positive number, got {0}")]
    BaseSpeed(f32),
    #[error("Entry offset must be a non-negative number, got {0}")]
    EntryOffset(f32),
}

#[derive(Parser, Debug)]
#[command(
    name = "tip",
    about = "Type the words before they cross the left edge",
    version
)]
pub struct Cli {
    /// Lives at the start of a game
    #[arg(long, default_value_t = 3)]
    pub lives: u32,

    /// Score needed per level, scaled by level squared
    #[arg(long, default_value_t = 50)]
    pub level_interval: u64,

    /// Columns from the left edge past which a word can't be started
    #[arg(long, default_value_t = 8.0)]
    pub entry_offset: f32,

    /// Milliseconds between new words on level 1
    #[arg(long, default_value_t = 2200)]
    pub spawn_interval_ms: u64,

    /// Columns per second a short word travels on level 1
    #[arg(long, default_value_t = 6.0)]
    pub base_speed: f32,

    /// High score file
    #[arg(long, default_value = "tip_scores.json")]
    pub scores: PathBuf,

    /// Word list to use instead of the built-in one, one word per line
    #[arg(long)]
    pub dictionary: Option<PathBuf>,

    /// Seed for word placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write debug logs to this file
    #[arg(long)]
    pub log: Option<PathBuf>,
}

/// Tuning for one run of the game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub lives: u32,
    pub level_interval: u64,
    pub entry_offset: f32,
    pub spawn_interval_ms: u64,
    pub base_speed: f32,
    pub scores_path: PathBuf,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            lives: 3,
            level_interval: 50,
            entry_offset: 8.0,
            spawn_interval_ms: 2200,
            base_speed: 6.0,
            scores_path: PathBuf::from("tip_scores.json"),
            seed: None,
        }
    }
}

impl TryFrom<&Cli> for GameConfig {
    type Error = ConfigError;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        if cli.lives == 0 {
            return Err(ConfigError::NoLives);
        }
        if cli.level_interval == 0 {
            return Err(ConfigError::LevelInterval);
        }
        if cli.spawn_interval_ms == 0 {
            return Err(ConfigError::SpawnInterval);
        }
        if !cli.base_speed.is_finite() || cli.base_speed <= 0.0 {
            return Err(ConfigError::BaseSpeed(cli.base_speed));
        }
        if !cli.entry_offset.is_finite() || cli.entry_offset < 0.0 {
            return Err(ConfigError::EntryOffset(cli.entry_offset));
        }

        Ok(Self {
            lives: cli.lives,
            level_interval: cli.level_interval,
            entry_offset: cli.entry_offset,
            spawn_interval_ms: cli.spawn_interval_ms,
            base_speed: cli.base_speed,
            scores_path: cli.scores.clone(),
            seed: cli.seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tip").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_match_game_config_default() {
        let config = GameConfig::try_from(&parse(&[])).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn options_are_carried_over() {
        let cli = parse(&[
            "--lives",
            "5",
            "--level-interval",
            "20",
            "--seed",
            "99",
            "--scores",
            "/tmp/s.json",
        ]);
        let config = GameConfig::try_from(&cli).unwrap();

        assert_eq!(config.lives, 5);
        assert_eq!(config.level_interval, 20);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.scores_path, PathBuf::from("/tmp/s.json"));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert_eq!(
            GameConfig::try_from(&parse(&["--lives", "0"])),
            Err(ConfigError::NoLives)
        );
        assert_eq!(
            GameConfig::try_from(&parse(&["--level-interval", "0"])),
            Err(ConfigError::LevelInterval)
        );
        assert_eq!(
            GameConfig::try_from(&parse(&["--spawn-interval-ms", "0"])),
            Err(ConfigError::SpawnInterval)
        );
        assert!(matches!(
            GameConfig::try_from(&parse(&["--base-speed", "0"])),
            Err(ConfigError::BaseSpeed(_))
        ));
        assert!(matches!(
            GameConfig::try_from(&parse(&["--entry-offset=-1"])),
            Err(ConfigError::EntryOffset(_))
        ));
    }
}
