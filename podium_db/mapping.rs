use podium_types::common::Player;

use crate::models::{self as db_models};

impl From<db_models::Player> for Player {
    fn from(player: db_models::Player) -> Self {
        Player {
            id: player.id,
            name: player.name,
            score: player.score,
            created_at: player.created_at,
        }
    }
}
