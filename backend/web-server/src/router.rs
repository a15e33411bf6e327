use crate::controller::{GameController, GameIdHandleMapping};
use crate::request_types::*;
use crate::response_types::*;

use rails::config::GameConfig;
use rails::snapshot::Snapshot;
use rocket::serde::json::Json;
use rocket::State;

#[post("/create", format = "json", data = "<create_game_request>")]
pub fn create_game(
    games: &State<GameIdHandleMapping>,
    config: &State<GameConfig>,
    create_game_request: Json<CreateGameRequest>,
) -> Json<CreateGameResponse> {
    Json(GameController::create_game(
        games,
        config,
        create_game_request.into_inner(),
    ))
}

#[post("/game/<_>/input", format = "json", data = "<input_request>")]
pub fn submit_input(
    game_controller: GameController,
    input_request: Json<InputRequest>,
) -> Json<ActionResponse> {
    Json(game_controller.submit_input(input_request.into_inner()))
}

#[get("/game/<_>/state")]
pub fn get_game_state(game_controller: GameController) -> Option<Json<Snapshot>> {
    game_controller.get_game_state().map(Json)
}
