use crate::board::{Board, Route};
use crate::card::{CardSupply, WagonColor};
use crate::city::City;
use crate::destination::DestinationSupply;
use crate::phase::GamePhase;
use crate::player::PublicPlayerState;

use serde::{Deserialize, Serialize};
use std::sync::{mpsc, Arc, RwLock};

/// The question the engine is currently asking a player.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    /// Name of the player expected to answer.
    pub player: String,
    pub instruction: String,
    /// Choices shown on the board or in the hand, e.g. a visible card or a route.
    pub items: Vec<String>,
    /// Choices shown as buttons, e.g. `deck`.
    pub buttons: Vec<String>,
    /// Whether an empty answer is accepted.
    pub can_decline: bool,
}

impl Prompt {
    /// Whether the (trimmed) token is a valid answer to this prompt.
    ///
    /// # Example
    /// ```
    /// use rails::snapshot::Prompt;
    ///
    /// let prompt = Prompt {
    ///     player: String::from("Ada"),
    ///     instruction: String::from("Draw a second card"),
    ///     items: vec![String::from("red")],
    ///     buttons: vec![String::from("deck")],
    ///     can_decline: false,
    /// };
    /// assert!(prompt.accepts("red"));
    /// assert!(prompt.accepts("deck"));
    /// assert!(!prompt.accepts(""));
    /// assert!(!prompt.accepts("blue"));
    /// ```
    pub fn accepts(&self, token: &str) -> bool {
        if token.is_empty() {
            return self.can_decline;
        }

        self.items.iter().chain(&self.buttons).any(|choice| choice == token)
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardView {
    pub locations: Vec<City>,
    /// Every route, with its owner if claimed.
    pub connections: Vec<Route>,
}

impl From<&Board> for BoardView {
    fn from(board: &Board) -> Self {
        Self {
            locations: board.locations(),
            connections: board.routes().to_vec(),
        }
    }
}

/// What everyone can see of the card and destination supplies.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PilesView {
    pub draw_count: usize,
    pub discard_pile: Vec<WagonColor>,
    pub visible_pile: Vec<WagonColor>,
    /// How many short destinations are left to draw.
    pub destination_count: usize,
}

impl PilesView {
    pub fn new(cards: &CardSupply, destinations: &DestinationSupply) -> Self {
        Self {
            draw_count: cards.draw_count(),
            discard_pile: cards.discard_pile().to_vec(),
            visible_pile: cards.visible_pile().to_vec(),
            destination_count: destinations.short_count(),
        }
    }
}

/// A full, self-contained picture of a game at one point in time.
/// Every publish replaces the previous snapshot, there are no deltas.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub phase: GamePhase,
    /// Number of completed turns since the end of setup.
    pub turn: usize,
    /// Turn-order position of the player whose turn it is.
    pub current_player: usize,
    /// `None` once the game is over.
    pub prompt: Option<Prompt>,
    pub board: BoardView,
    pub players: Vec<PublicPlayerState>,
    pub piles: PilesView,
    /// Every event of the game so far, oldest first.
    pub log: Vec<String>,
}

/// Receives every snapshot the engine publishes, synchronously, on the engine's thread.
pub trait Broadcaster: Send {
    fn publish(&mut self, snapshot: &Snapshot);
}

/// Keeps only the latest snapshot, readable from any thread.
#[derive(Clone, Debug, Default)]
pub struct LatestSnapshot {
    slot: Arc<RwLock<Option<Arc<Snapshot>>>>,
}

impl LatestSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently published snapshot, if any.
    pub fn get(&self) -> Option<Arc<Snapshot>> {
        match self.slot.read() {
            Ok(latest) => latest.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Broadcaster for LatestSnapshot {
    fn publish(&mut self, snapshot: &Snapshot) {
        let snapshot = Some(Arc::new(snapshot.clone()));

        match self.slot.write() {
            Ok(mut latest) => *latest = snapshot,
            Err(poisoned) => *poisoned.into_inner() = snapshot,
        }
    }
}

impl Broadcaster for mpsc::Sender<Snapshot> {
    fn publish(&mut self, snapshot: &Snapshot) {
        if self.send(snapshot.clone()).is_err() {
            log::debug!("snapshot stream has no listener anymore");
        }
    }
}

impl Broadcaster for Vec<Snapshot> {
    fn publish(&mut self, snapshot: &Snapshot) {
        self.push(snapshot.clone());
    }
}

/// Publishes to both broadcasters, in order.
impl<A: Broadcaster, B: Broadcaster> Broadcaster for (A, B) {
    fn publish(&mut self, snapshot: &Snapshot) {
        self.0.publish(snapshot);
        self.1.publish(snapshot);
    }
}
