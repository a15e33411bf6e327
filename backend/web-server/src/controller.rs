//! The middleman between the [`crate::router`] handlers and the running [`GameHandle`]s.

use crate::request_types::*;
use crate::response_types::*;

use dashmap::{mapref::one::Ref, DashMap};
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome, Request};
use rocket::State;
use uuid::Uuid;

use rails::board::GameMap;
use rails::config::GameConfig;
use rails::host::GameHandle;
use rails::snapshot::Snapshot;

/// Maps a game ID to its running game in a shared concurrent hash map.
pub type GameIdHandleMapping = DashMap<Uuid, GameHandle>;

/// Types of error when creating a controller.
#[derive(Debug)]
pub enum ControllerGuardError {
    InvalidGameId,
    /// Should never occur!
    ///
    /// This only happens if the server does not manage a [`GameIdHandleMapping`].
    StateNotFound,
}

/// Main entrypoint of requests targeting one game, after routing.
///
/// Implements [`rocket::request::FromRequest`], so it can be used as a request guard.
/// The game is identified by the second segment of the path, e.g. `/game/<game_id>/state`.
pub struct GameController<'a> {
    game: Ref<'a, Uuid, GameHandle>,
}

impl<'a> GameController<'a> {
    /// Starts a game on the Europe map, and registers it under a new ID.
    ///
    /// Games whose thread has ended since are dropped from the mapping first.
    pub(crate) fn create_game(
        games: &GameIdHandleMapping,
        config: &GameConfig,
        create_game_request: CreateGameRequest,
    ) -> CreateGameResponse {
        Self::evict_finished_games(games);

        let result = GameHandle::spawn(
            create_game_request.players,
            config.clone(),
            GameMap::europe(),
        )
        .map(|game| {
            let game_id = Uuid::new_v4();
            games.insert(game_id, game);
            log::info!("created game {}", game_id);
            game_id
        })
        .map_err(|e| e.to_string());

        CreateGameResponse::new(result)
    }

    fn evict_finished_games(games: &GameIdHandleMapping) {
        games.retain(|game_id, game| {
            let finished = game.is_finished();
            if finished {
                log::info!("evicted finished game {}", game_id);
            }
            !finished
        });
    }

    /// Forwards the token to the game. Whether it is a valid answer is up to the game.
    #[inline]
    pub(crate) fn submit_input(&self, input_request: InputRequest) -> ActionResponse {
        ActionResponse::new(
            self.game
                .submit(input_request.input)
                .map_err(|e| e.to_string()),
        )
    }

    /// The most recent snapshot of the game, if it has published one yet.
    #[inline]
    pub(crate) fn get_game_state(&self) -> Option<Snapshot> {
        self.game.snapshot().map(|snapshot| (*snapshot).clone())
    }
}

#[rocket::async_trait]
impl<'a> FromRequest<'a> for GameController<'a> {
    type Error = ControllerGuardError;

    async fn from_request(request: &'a Request<'_>) -> Outcome<Self, Self::Error> {
        let game_id = match request.param::<Uuid>(1) {
            Some(Ok(game_id)) => game_id,
            _ => return Outcome::Error((Status::NotFound, ControllerGuardError::InvalidGameId)),
        };

        let games = match request.guard::<&'a State<GameIdHandleMapping>>().await {
            Outcome::Success(games) => games,
            _ => {
                log::error!("No `State<GameIdHandleMapping>` is managed by the server.");

                return Outcome::Error((
                    Status::InternalServerError,
                    ControllerGuardError::StateNotFound,
                ));
            }
        };

        match games.inner().get(&game_id) {
            Some(game) => Outcome::Success(Self { game }),
            None => Outcome::Error((Status::NotFound, ControllerGuardError::InvalidGameId)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::thread;
    use std::time::Duration;

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn create_game_evicts_finished_games() {
        let games = GameIdHandleMapping::new();
        let config = GameConfig::default();

        let stopped = GameHandle::spawn(names(&["Ada", "Bob"]), config.clone(), GameMap::europe())
            .unwrap();
        stopped.sender().interrupt();
        for _ in 0..200 {
            if stopped.is_finished() {
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }
        assert!(stopped.is_finished());

        let stopped_id = Uuid::new_v4();
        games.insert(stopped_id, stopped);

        let response = GameController::create_game(
            &games,
            &config,
            CreateGameRequest {
                players: names(&["Cy", "Dee"]),
            },
        );

        assert!(response.success);
        assert!(!games.contains_key(&stopped_id));
        assert_eq!(games.len(), 1);
        assert!(games.contains_key(&response.game_id.unwrap()));
    }
}
