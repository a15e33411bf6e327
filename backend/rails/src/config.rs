use crate::card::{NUM_VISIBLE_WAGON_CARDS, NUM_WAGON_CARDS};
use crate::engine::MAX_PLAYERS;
use crate::error::EngineError;

use serde::{Deserialize, Serialize};
use std::path::Path;

// Every player starts the game with 45 wagons.
const DEFAULT_WAGONS_PER_PLAYER: u8 = 45;
const DEFAULT_INITIAL_HAND_SIZE: usize = 4;
// Once a player is down to 2 wagons or fewer, the final round starts.
const DEFAULT_FINAL_ROUND_THRESHOLD: u8 = 2;
// With a full table, every hand is dealt and the visible pile is filled from the 110 cards.
const MAX_INITIAL_HAND_SIZE: usize = (NUM_WAGON_CARDS - NUM_VISIBLE_WAGON_CARDS) / MAX_PLAYERS;

/// Rule constants of a game, and the seed of its randomness.
///
/// Any missing key falls back to its default.
///
/// # Example
/// ```
/// use rails::config::GameConfig;
///
/// let config = GameConfig::from_toml_str("wagons_per_player = 20\nseed = 7").unwrap();
/// assert_eq!(config.wagons_per_player, 20);
/// assert_eq!(config.initial_hand_size, 4);
/// assert_eq!(config.seed, Some(7));
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct GameConfig {
    pub wagons_per_player: u8,
    pub initial_hand_size: usize,
    pub final_round_threshold: u8,
    /// Makes every shuffle of the game reproducible. Drawn from entropy when missing.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            wagons_per_player: DEFAULT_WAGONS_PER_PLAYER,
            initial_hand_size: DEFAULT_INITIAL_HAND_SIZE,
            final_round_threshold: DEFAULT_FINAL_ROUND_THRESHOLD,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Parses and validates a configuration.
    pub fn from_toml_str(content: &str) -> Result<Self, EngineError> {
        let config: Self = toml::from_str(content).map_err(|e| EngineError::InvalidConfig {
            message: format!("failed to parse config: {}", e),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        log::debug!("loading game config from {}", path.display());

        let content =
            std::fs::read_to_string(path).map_err(|e| EngineError::InvalidConfig {
                message: format!("failed to read {}: {}", path.display(), e),
            })?;

        Self::from_toml_str(&content)
    }

    /// Verifies that a game can be played with these rules.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.wagons_per_player == 0 {
            return Err(EngineError::InvalidConfig {
                message: String::from("wagons_per_player must be positive"),
            });
        }

        if self.final_round_threshold >= self.wagons_per_player {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "final_round_threshold ({}) must be lower than wagons_per_player ({})",
                    self.final_round_threshold, self.wagons_per_player
                ),
            });
        }

        if self.initial_hand_size > MAX_INITIAL_HAND_SIZE {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "initial_hand_size ({}) leaves too few cards to deal, at most {} is allowed",
                    self.initial_hand_size, MAX_INITIAL_HAND_SIZE
                ),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config() {
        let config = GameConfig::default();

        assert_eq!(config.wagons_per_player, 45);
        assert_eq!(config.initial_hand_size, 4);
        assert_eq!(config.final_round_threshold, 2);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(GameConfig::from_toml_str(""), Ok(GameConfig::default()));
    }

    #[test]
    fn full_toml() {
        let config = GameConfig::from_toml_str(
            r#"
            wagons_per_player = 12
            initial_hand_size = 2
            final_round_threshold = 3
            seed = 42
            "#,
        )
        .unwrap();

        assert_eq!(
            config,
            GameConfig {
                wagons_per_player: 12,
                initial_hand_size: 2,
                final_round_threshold: 3,
                seed: Some(42),
            }
        );
    }

    #[test]
    fn malformed_toml() {
        assert!(matches!(
            GameConfig::from_toml_str("wagons_per_player = \"many\""),
            Err(EngineError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn invalid_configs() {
        let no_wagons = GameConfig {
            wagons_per_player: 0,
            ..GameConfig::default()
        };
        assert!(no_wagons.validate().is_err());

        let threshold_too_high = GameConfig {
            wagons_per_player: 2,
            ..GameConfig::default()
        };
        assert!(threshold_too_high.validate().is_err());

        let hand_too_large = GameConfig {
            initial_hand_size: 22,
            ..GameConfig::default()
        };
        assert!(hand_too_large.validate().is_err());

        let largest_hand = GameConfig {
            initial_hand_size: 21,
            ..GameConfig::default()
        };
        assert!(largest_hand.validate().is_ok());
    }

    #[test]
    fn huge_hand_size_is_rejected() {
        assert!(matches!(
            GameConfig::from_toml_str("initial_hand_size = 9223372036854775807"),
            Err(EngineError::InvalidConfig { .. })
        ));

        let config = GameConfig {
            initial_hand_size: usize::MAX,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn load_missing_file() {
        assert!(matches!(
            GameConfig::load("/definitely/not/a/rails.toml"),
            Err(EngineError::InvalidConfig { .. })
        ));
    }
}
