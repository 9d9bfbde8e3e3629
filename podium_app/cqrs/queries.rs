use podium_types::common::Player;

use crate::cqrs::Query;

/// Fetch the top players ordered by score.
/// `limit` is the raw value received from the client, if any.
#[derive(Debug, Clone, Default)]
pub struct GetLeaderboard {
    pub limit: Option<String>,
}

impl GetLeaderboard {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit.to_string()),
        }
    }
}

impl Query for GetLeaderboard {
    type Output = Vec<Player>;
}
