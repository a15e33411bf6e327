use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// The phases a game goes through, in order.
#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GamePhase {
    /// Every player picks which of their initial destinations to keep, in turn order.
    SetupDestinationChoice,
    NormalTurn,
    /// Someone ran low on wagons: every other player gets exactly one more turn.
    FinalRound,
    GameOver,
}

impl GamePhase {
    /// Whether players still take turns in this phase.
    #[inline]
    pub fn is_playing(&self) -> bool {
        matches!(self, GamePhase::NormalTurn | GamePhase::FinalRound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_phase_to_json() -> serde_json::Result<()> {
        assert_eq!(
            serde_json::to_string(&GamePhase::SetupDestinationChoice)?,
            r#""setup_destination_choice""#
        );
        assert_eq!(
            serde_json::to_string(&GamePhase::NormalTurn)?,
            r#""normal_turn""#
        );
        Ok(())
    }

    #[test]
    fn json_to_game_phase() -> serde_json::Result<()> {
        assert_eq!(
            serde_json::from_str::<GamePhase>(r#""final_round""#)?,
            GamePhase::FinalRound
        );
        assert_eq!(
            serde_json::from_str::<GamePhase>(r#""game_over""#)?,
            GamePhase::GameOver
        );

        Ok(())
    }

    #[test]
    fn invalid_json_to_game_phase() {
        assert!(serde_json::from_str::<GamePhase>(r#""in_lobby""#).is_err());
    }

    #[test]
    fn game_phase_to_string() {
        assert_eq!(GamePhase::FinalRound.to_string(), "final_round");
    }

    #[test]
    fn game_phase_is_playing() {
        assert!(!GamePhase::SetupDestinationChoice.is_playing());
        assert!(GamePhase::NormalTurn.is_playing());
        assert!(GamePhase::FinalRound.is_playing());
        assert!(!GamePhase::GameOver.is_playing());
    }
}
