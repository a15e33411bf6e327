use crate::board::GameMap;
use crate::channel::{action_channel, ActionSender};
use crate::config::GameConfig;
use crate::engine::GameEngine;
use crate::error::EngineError;
use crate::snapshot::{Broadcaster, LatestSnapshot, Snapshot};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

static NUM_GAMES_SPAWNED: AtomicUsize = AtomicUsize::new(0);

/// A game running on its own thread.
///
/// Dropping the handle interrupts the game.
pub struct GameHandle {
    sender: ActionSender,
    latest: LatestSnapshot,
    thread: Option<JoinHandle<Result<Snapshot, EngineError>>>,
}

impl GameHandle {
    /// Sets up a game and starts playing it on a dedicated thread.
    ///
    /// # Example
    /// ```
    /// use rails::board::GameMap;
    /// use rails::config::GameConfig;
    /// use rails::host::GameHandle;
    ///
    /// let names = vec![String::from("Ada"), String::from("Bob")];
    /// let game = GameHandle::spawn(names, GameConfig::default(), GameMap::europe()).unwrap();
    /// assert!(game.shutdown().is_err());
    /// ```
    pub fn spawn(
        names: Vec<String>,
        config: GameConfig,
        map: GameMap,
    ) -> Result<Self, EngineError> {
        let latest = LatestSnapshot::new();
        Self::start(names, config, map, Box::new(latest.clone()), latest)
    }

    /// Same as [`GameHandle::spawn`], but every snapshot is also published to `broadcaster`.
    pub fn spawn_with<B: Broadcaster + 'static>(
        names: Vec<String>,
        config: GameConfig,
        map: GameMap,
        broadcaster: B,
    ) -> Result<Self, EngineError> {
        let latest = LatestSnapshot::new();
        Self::start(
            names,
            config,
            map,
            Box::new((latest.clone(), broadcaster)),
            latest,
        )
    }

    fn start(
        names: Vec<String>,
        config: GameConfig,
        map: GameMap,
        broadcaster: Box<dyn Broadcaster>,
        latest: LatestSnapshot,
    ) -> Result<Self, EngineError> {
        let (sender, inbox) = action_channel();
        let engine = GameEngine::new(names, config, map, inbox, broadcaster)?;

        let game_number = NUM_GAMES_SPAWNED.fetch_add(1, Ordering::Relaxed);
        let thread = thread::Builder::new()
            .name(format!("rails-game-{}", game_number))
            .spawn(move || engine.run())
            .map_err(|e| EngineError::Spawn {
                message: e.to_string(),
            })?;

        log::info!("started game #{}", game_number);

        Ok(Self {
            sender,
            latest,
            thread: Some(thread),
        })
    }

    /// A new producer of actions for this game.
    pub fn sender(&self) -> ActionSender {
        self.sender.clone()
    }

    /// Submits an action token to the game.
    pub fn submit(&self, token: impl Into<String>) -> Result<(), EngineError> {
        self.sender.submit(token)
    }

    /// The most recently published snapshot, if any.
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.latest.get()
    }

    /// Whether the game thread is done, either because the game is over or because it stopped.
    pub fn is_finished(&self) -> bool {
        self.thread
            .as_ref()
            .map_or(true, |thread| thread.is_finished())
    }

    /// Interrupts the game if it is still running, and waits for its thread to end.
    pub fn shutdown(self) -> Result<Snapshot, EngineError> {
        self.sender.interrupt();
        self.join()
    }

    /// Waits for the game to end on its own.
    pub fn join(mut self) -> Result<Snapshot, EngineError> {
        match self.thread.take() {
            Some(thread) => thread.join().map_err(|_| EngineError::Panicked)?,
            None => Err(EngineError::GameClosed),
        }
    }
}

impl Drop for GameHandle {
    fn drop(&mut self) {
        if self.thread.is_some() {
            self.sender.interrupt();
        }
    }
}
