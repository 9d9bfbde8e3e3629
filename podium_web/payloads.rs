//! JSON bodies exchanged with clients.

use serde::{Deserialize, Serialize};

use podium_types::common::Player;

#[derive(Debug, Deserialize)]
pub struct CreatePlayerRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateScoreRequest {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub score: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardParams {
    pub limit: Option<String>,
}

/// Public shape of a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub name: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub score: i64,
}

impl From<Player> for PlayerView {
    fn from(player: Player) -> Self {
        PlayerView {
            name: player.name,
            user_id: player.id.to_string(),
            score: player.score,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatePlayerResponse {
    pub success: bool,
    pub user: PlayerView,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Body of `GET /leaderboard`, also pushed as-is to live subscribers.
#[derive(Debug, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub success: bool,
    pub leaderboard: Vec<PlayerView>,
}

impl LeaderboardResponse {
    pub fn new(players: Vec<Player>) -> Self {
        LeaderboardResponse {
            success: true,
            leaderboard: players.into_iter().map(PlayerView::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_player_view_shape() {
        let id = Uuid::new_v4();
        let mut player = Player::new(id, "Alice".to_string(), Utc::now());
        player.score = 42;

        let value = serde_json::to_value(PlayerView::from(player)).unwrap();

        assert_eq!(
            value,
            json!({ "name": "Alice", "userId": id.to_string(), "score": 42 })
        );
    }

    #[test]
    fn test_update_score_request_field_names() {
        let body: UpdateScoreRequest =
            serde_json::from_str(r#"{"userId": "abc", "score": 7}"#).unwrap();

        assert_eq!(body.user_id, "abc");
        assert_eq!(body.score, 7);
    }
}
