use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A player record as owned by the score store.
///
/// `id` is assigned by the store on creation and never changes, the same
/// goes for `name`. `score` is only ever replaced as a whole and is
/// never negative. `created_at` orders players with equal scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    pub score: i64,
    pub created_at: DateTime<Utc>,
}

impl Player {
    /// Builds a freshly created player, with a zero score.
    pub fn new(id: Uuid, name: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            score: 0,
            created_at,
        }
    }
}
