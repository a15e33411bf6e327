use derive_more::{Display, Error};

/// Failures of a game as a whole, as opposed to a refused player action.
///
/// Refused actions (e.g. taking a card that is not visible) are reported by each component
/// as a human-readable `Err(String)`, and the engine simply asks the player again.
#[derive(Clone, Debug, Display, Eq, Error, PartialEq)]
pub enum EngineError {
    /// The engine was asked to stop while waiting for a player's input.
    #[display("the game was interrupted while waiting for input")]
    Interrupted,
    /// Every producer of actions is gone, so no input can ever arrive.
    #[display("every action sender has been dropped")]
    Disconnected,
    /// An action was submitted to a game that is over.
    #[display("the game is closed")]
    GameClosed,
    #[display("a game needs between 2 and 5 players, got {count}")]
    InvalidPlayerCount { count: usize },
    #[display("invalid configuration: {message}")]
    InvalidConfig { message: String },
    #[display("could not start the game thread: {message}")]
    Spawn { message: String },
    #[display("the game thread panicked")]
    Panicked,
}
