use rocket::serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct CreateGameRequest {
    /// Names of the players, in turn order.
    pub players: Vec<String>,
}

#[derive(Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct InputRequest {
    /// A free-form action token, answering the game's current prompt.
    pub input: String,
}
