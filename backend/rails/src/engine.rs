use crate::board::{Board, GameMap};
use crate::card::CardSupply;
use crate::channel::ActionReceiver;
use crate::config::GameConfig;
use crate::destination::{Destination, DestinationSupply};
use crate::error::EngineError;
use crate::phase::GamePhase;
use crate::player::{PlayerColor, PlayerState};
use crate::snapshot::{BoardView, Broadcaster, PilesView, Prompt, Snapshot};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use smallvec::SmallVec;
use strum::IntoEnumIterator;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 5;

const NUM_INITIAL_LONG_DESTINATIONS: usize = 1;
const NUM_INITIAL_SHORT_DESTINATIONS: usize = 3;
// On the initial draw, at least two destinations must be kept.
const MIN_INITIAL_DESTINATIONS: usize = 2;

/// The only writer of a game's state.
///
/// The engine runs the whole game on the calling thread, see [`GameEngine::run`]. Whenever it
/// needs a player's decision, it publishes a [`Snapshot`] carrying a [`Prompt`] to its
/// [`Broadcaster`], then blocks on its [`ActionReceiver`] until a valid answer arrives.
///
/// This overall acts as a finite-state machine, going through the [`GamePhase`]s in order.
pub struct GameEngine {
    pub(crate) config: GameConfig,
    pub(crate) phase: GamePhase,
    /// Number of completed turns since the end of setup.
    pub(crate) turn: usize,
    /// Turn-order position of the player currently acting.
    pub(crate) current: usize,
    /// The player whose turn started the final round, if it has started.
    pub(crate) final_round_trigger: Option<usize>,
    pub(crate) board: Board,
    pub(crate) cards: CardSupply,
    pub(crate) destinations: DestinationSupply,
    pub(crate) players: SmallVec<[PlayerState; MAX_PLAYERS]>,
    inbox: ActionReceiver,
    broadcaster: Box<dyn Broadcaster>,
    /// Human-readable events, shared with every player. No private information goes in there.
    log: Vec<String>,
    prompt: Option<Prompt>,
}

impl GameEngine {
    /// Sets up a game: players get a color and their initial hand, and the visible pile is dealt.
    ///
    /// Players play in the order of `names`.
    ///
    /// Returns an `Err` if there are not between 2 and 5 players, or if the configuration is invalid.
    pub fn new(
        names: Vec<String>,
        config: GameConfig,
        map: GameMap,
        inbox: ActionReceiver,
        broadcaster: Box<dyn Broadcaster>,
    ) -> Result<Self, EngineError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&names.len()) {
            return Err(EngineError::InvalidPlayerCount { count: names.len() });
        }
        config.validate()?;

        let (mut rng, cards_rng, mut destinations_rng) = match config.seed {
            Some(seed) => (
                StdRng::seed_from_u64(seed),
                StdRng::seed_from_u64(seed.wrapping_add(1)),
                StdRng::seed_from_u64(seed.wrapping_add(2)),
            ),
            None => (
                StdRng::from_entropy(),
                StdRng::from_entropy(),
                StdRng::from_entropy(),
            ),
        };

        let mut colors: SmallVec<[PlayerColor; MAX_PLAYERS]> = PlayerColor::iter().collect();
        colors.shuffle(&mut rng);

        let mut players: SmallVec<[PlayerState; MAX_PLAYERS]> = names
            .into_iter()
            .zip(colors)
            .enumerate()
            .map(|(position, (name, color))| {
                PlayerState::new(position, name, color, config.wagons_per_player)
            })
            .collect();

        let mut board = map.board;
        board.set_parallel_routes_allowed(players.len() > 3);

        let mut cards = CardSupply::new(cards_rng);
        for _ in 0..config.initial_hand_size {
            for player in players.iter_mut() {
                if let Some(card) = cards.draw() {
                    player.add_card(card);
                }
            }
        }
        cards.fill_visible();

        let destinations = DestinationSupply::new(
            map.short_destinations,
            map.long_destinations,
            &mut destinations_rng,
        );

        let mut engine = Self {
            config,
            phase: GamePhase::SetupDestinationChoice,
            turn: 0,
            current: 0,
            final_round_trigger: None,
            board,
            cards,
            destinations,
            players,
            inbox,
            broadcaster,
            log: Vec::new(),
            prompt: None,
        };

        let names: Vec<String> = engine
            .players
            .iter()
            .map(|player| format!("{} ({})", player.name(), player.color()))
            .collect();
        engine.record(format!("The game starts with {}.", names.join(", ")));

        Ok(engine)
    }

    /// Plays the whole game, and returns the final snapshot once it is over.
    ///
    /// Returns an `Err` if the engine was interrupted while waiting for input, or if every
    /// action sender is gone. Either way, the game cannot be resumed.
    pub fn run(mut self) -> Result<Snapshot, EngineError> {
        match self.play() {
            Ok(()) => {
                self.prompt = None;
                let snapshot = self.snapshot();
                self.broadcaster.publish(&snapshot);
                Ok(snapshot)
            }
            Err(e) => {
                log::error!("game stopped during {}: {}", self.phase, e);
                Err(e)
            }
        }
    }

    fn play(&mut self) -> Result<(), EngineError> {
        self.choose_initial_destinations()?;
        self.set_phase(GamePhase::NormalTurn);

        while self.phase.is_playing() {
            self.play_turn()?;
            self.end_turn();
        }

        Ok(())
    }

    /// Each player, in turn order, is offered one long and three short destinations.
    fn choose_initial_destinations(&mut self) -> Result<(), EngineError> {
        for position in 0..self.players.len() {
            self.current = position;

            let mut offered = self.destinations.draw_long(NUM_INITIAL_LONG_DESTINATIONS);
            for _ in 0..NUM_INITIAL_SHORT_DESTINATIONS {
                match self.destinations.draw_short() {
                    Some(destination) => offered.push(destination),
                    None => break,
                }
            }

            self.select_destinations(offered, MIN_INITIAL_DESTINATIONS)?;
        }

        self.current = 0;
        Ok(())
    }

    /// Lets the current player discard offered destinations one at a time, until they pass or
    /// only `min_keep` are left. The player keeps the rest.
    pub(crate) fn select_destinations(
        &mut self,
        mut offered: Vec<Destination>,
        min_keep: usize,
    ) -> Result<(), EngineError> {
        let min_keep = min_keep.min(offered.len());
        let mut declined = Vec::new();

        while offered.len() > min_keep {
            let items = offered.iter().map(ToString::to_string).collect();
            let choice = self.choose(
                format!(
                    "{}, discard a destination or pass to keep the rest (keep at least {})",
                    self.current_player().name(),
                    min_keep
                ),
                items,
                Vec::new(),
                true,
            )?;

            match offered
                .iter()
                .position(|destination| destination.to_string() == choice)
            {
                Some(index) => declined.push(offered.remove(index)),
                None => break,
            }
        }

        self.record(format!(
            "{} keeps {} destination(s) and returns {}.",
            self.current_player().name(),
            offered.len(),
            declined.len()
        ));

        self.players[self.current].add_destinations(offered);
        let removed = self.destinations.return_unwanted(declined);
        if removed > 0 {
            log::debug!("{} long destination(s) left the game", removed);
        }

        Ok(())
    }

    /// Moves turn order forward, and transitions to the next phase if needed.
    fn end_turn(&mut self) {
        let wagons = self.current_player().wagons();
        if self.phase == GamePhase::NormalTurn && wagons <= self.config.final_round_threshold {
            self.final_round_trigger = Some(self.current);
            self.record(format!(
                "{} has {} wagon(s) left: every other player plays one last turn.",
                self.current_player().name(),
                wagons
            ));
            self.set_phase(GamePhase::FinalRound);
        }

        self.turn += 1;
        self.current = (self.current + 1) % self.players.len();

        if self.phase == GamePhase::FinalRound && self.final_round_trigger == Some(self.current) {
            self.record(String::from("The game is over."));
            self.set_phase(GamePhase::GameOver);
        }
    }

    /// Asks the current player to pick one of the `items` or `buttons`, or to pass if
    /// `can_decline`.
    ///
    /// Answers that are not on offer are rejected, and the same prompt is published again.
    /// Nothing about the game changes until a valid answer arrives.
    pub(crate) fn choose(
        &mut self,
        instruction: String,
        items: Vec<String>,
        buttons: Vec<String>,
        can_decline: bool,
    ) -> Result<String, EngineError> {
        let prompt = Prompt {
            player: self.current_player().name().to_string(),
            instruction,
            items,
            buttons,
            can_decline,
        };

        loop {
            self.prompt = Some(prompt.clone());
            self.publish();

            let token = self.inbox.recv()?;
            let choice = token.trim();

            if prompt.accepts(choice) {
                self.prompt = None;
                return Ok(choice.to_string());
            }

            log::warn!(
                "rejected {:?} from {}, expected one of {:?} or {:?}",
                choice,
                prompt.player,
                prompt.items,
                prompt.buttons
            );
        }
    }

    pub(crate) fn current_player(&self) -> &PlayerState {
        &self.players[self.current]
    }

    /// Appends an event to the shared log.
    pub(crate) fn record(&mut self, event: String) {
        log::info!("{}", event);
        self.log.push(event);
    }

    fn set_phase(&mut self, phase: GamePhase) {
        log::info!("phase {} -> {}", self.phase, phase);
        self.phase = phase;
    }

    fn publish(&mut self) {
        let snapshot = self.snapshot();
        self.broadcaster.publish(&snapshot);
    }

    /// A full picture of the game, as every player may see it.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            turn: self.turn,
            current_player: self.current,
            prompt: self.prompt.clone(),
            board: BoardView::from(&self.board),
            players: self
                .players
                .iter()
                .map(|player| player.public_state())
                .collect(),
            piles: PilesView::new(&self.cards, &self.destinations),
            log: self.log.clone(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }
}
