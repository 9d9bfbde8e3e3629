use uuid::Uuid;

use podium_types::common::Player;
use podium_types::errors::ApplicationError;

#[async_trait::async_trait]
pub trait PlayerRepository: Send + Sync {
    /// Creates a player with a zero score. The id is assigned by the store.
    async fn create(&self, name: &str) -> Result<Player, ApplicationError>;

    /// Replaces the score of an existing player.
    /// Fails with `DbError::PlayerNotFound` for unknown ids, never inserts.
    async fn set_score(&self, player_id: Uuid, score: i64) -> Result<(), ApplicationError>;

    /// Fails with `DbError::PlayerNotFound` for unknown ids.
    async fn get_by_id(&self, player_id: Uuid) -> Result<Player, ApplicationError>;

    /// Returns all players. Callers must not rely on the order.
    async fn all(&self) -> Result<Vec<Player>, ApplicationError>;
}
