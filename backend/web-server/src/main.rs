// Launches a HTTP server, and routes incoming requests to the running games.

#[macro_use]
extern crate rocket;

mod controller;
mod request_types;
mod response_types;
mod router;

use controller::GameIdHandleMapping;
use rails::config::GameConfig;
use router::*;

/// Reads the rules of every game created by this server from the `rails` section of the
/// Rocket configuration, falling back to the defaults.
fn game_config(rocket: &rocket::Rocket<rocket::Build>) -> GameConfig {
    let config = match rocket.figment().extract_inner::<GameConfig>("rails") {
        Ok(config) => config,
        Err(e) => {
            log::warn!("No usable `rails` configuration ({}), using the defaults.", e);
            return GameConfig::default();
        }
    };

    match config.validate() {
        Ok(()) => config,
        Err(e) => {
            log::warn!("{}, using the defaults.", e);
            GameConfig::default()
        }
    }
}

#[launch]
fn rocket() -> _ {
    let rocket = rocket::build();
    let config = game_config(&rocket);

    rocket
        .mount("/", routes![create_game, get_game_state, submit_input])
        .manage(GameIdHandleMapping::new())
        .manage(config)
}
