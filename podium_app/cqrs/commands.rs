use uuid::Uuid;

use podium_types::common::Player;

use crate::cqrs::Command;

#[derive(Debug, Clone)]
pub struct CreatePlayer {
    pub name: String,
}

impl CreatePlayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Command for CreatePlayer {
    type Output = Player;
}

/// Replaces a player's score (not a delta).
#[derive(Debug, Clone)]
pub struct UpdateScore {
    pub player_id: Uuid,
    pub score: i64,
}

impl Command for UpdateScore {
    type Output = ();
}
