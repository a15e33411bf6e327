use rocket::serde::uuid::Uuid;
use rocket::serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, PartialEq, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ActionResponse {
    pub success: bool,
    pub error_message: Option<String>,
}

impl ActionResponse {
    pub fn new(result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Self::new_success(),
            Err(error_message) => Self::new_failure(error_message),
        }
    }

    pub fn new_success() -> Self {
        Self {
            success: true,
            error_message: None,
        }
    }

    pub fn new_failure(error_message: String) -> Self {
        Self {
            success: false,
            error_message: Some(error_message),
        }
    }
}

#[derive(Debug, Deserialize, PartialEq, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct CreateGameResponse {
    pub success: bool,
    pub game_id: Option<Uuid>,
    pub error_message: Option<String>,
}

impl CreateGameResponse {
    pub fn new(result: Result<Uuid, String>) -> Self {
        match result {
            Ok(game_id) => Self {
                success: true,
                game_id: Some(game_id),
                error_message: None,
            },
            Err(error_message) => Self {
                success: false,
                game_id: None,
                error_message: Some(error_message),
            },
        }
    }
}
