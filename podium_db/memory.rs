//! Process-local score store, for development and tests.
//!
//! Players live in a `RwLock<HashMap>`: writers are serialized by the write
//! lock, readers run concurrently and always see whole records. There is no
//! transaction isolation, writes are visible as soon as they return and
//! commit/rollback do nothing.

use chrono::{DateTime, Duration, Utc};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use uuid::Uuid;

use podium_app::{
    repository::PlayerRepository,
    uow::{UnitOfWork, UnitOfWorkProvider},
};
use podium_types::{
    Result,
    common::Player,
    errors::{ApplicationError, DbError, DomainError},
};

#[derive(Debug, Default)]
struct MemoryState {
    players: HashMap<Uuid, Player>,
    last_created_at: Option<DateTime<Utc>>,
}

impl MemoryState {
    /// Strictly increasing, so equal scores rank in insertion order.
    fn next_created_at(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let created_at = match self.last_created_at {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_created_at = Some(created_at);
        created_at
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryUnitOfWorkProvider {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryUnitOfWorkProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UnitOfWorkProvider for InMemoryUnitOfWorkProvider {
    async fn begin<'p>(&'p self) -> Result<Box<dyn UnitOfWork<'p> + 'p>, ApplicationError> {
        Ok(Box::new(InMemoryUnitOfWork {
            state: self.state.clone(),
        }))
    }
}

#[derive(Debug, Clone)]
pub struct InMemoryUnitOfWork {
    state: Arc<RwLock<MemoryState>>,
}

#[async_trait::async_trait]
impl<'a> UnitOfWork<'a> for InMemoryUnitOfWork {
    fn players(&self) -> Arc<dyn PlayerRepository + 'a> {
        Arc::new(InMemoryPlayerRepository {
            state: self.state.clone(),
        })
    }

    async fn commit(self: Box<Self>) -> Result<(), ApplicationError> {
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), ApplicationError> {
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct InMemoryPlayerRepository {
    state: Arc<RwLock<MemoryState>>,
}

#[async_trait::async_trait]
impl PlayerRepository for InMemoryPlayerRepository {
    async fn create(&self, name: &str) -> Result<Player, ApplicationError> {
        let mut state = self.state.write().await;

        let mut id = Uuid::new_v4();
        while state.players.contains_key(&id) {
            id = Uuid::new_v4();
        }

        let created_at = state.next_created_at();
        let player = Player::new(id, name.to_string(), created_at);
        state.players.insert(id, player.clone());

        Ok(player)
    }

    async fn set_score(&self, player_id: Uuid, score: i64) -> Result<(), ApplicationError> {
        if score < 0 {
            return Err(DomainError::NegativeScore(score).into());
        }

        let mut state = self.state.write().await;
        let player = state
            .players
            .get_mut(&player_id)
            .ok_or(ApplicationError::Db(DbError::PlayerNotFound(player_id)))?;
        player.score = score;

        Ok(())
    }

    async fn get_by_id(&self, player_id: Uuid) -> Result<Player, ApplicationError> {
        let state = self.state.read().await;
        state
            .players
            .get(&player_id)
            .cloned()
            .ok_or(ApplicationError::Db(DbError::PlayerNotFound(player_id)))
    }

    async fn all(&self) -> Result<Vec<Player>, ApplicationError> {
        let state = self.state.read().await;
        Ok(state.players.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use podium_types::errors::ErrorKind;

    use super::*;

    fn repo() -> (InMemoryUnitOfWorkProvider, Arc<dyn PlayerRepository>) {
        let provider = InMemoryUnitOfWorkProvider::new();
        let players: Arc<dyn PlayerRepository> = Arc::new(InMemoryPlayerRepository {
            state: provider.state.clone(),
        });
        (provider, players)
    }

    #[tokio::test]
    async fn test_create_starts_at_zero() -> Result<()> {
        let (_, players) = repo();

        let player = players.create("Alice").await?;

        assert_eq!(player.name, "Alice");
        assert_eq!(player.score, 0);
        assert_eq!(players.all().await?, vec![player]);
        Ok(())
    }

    #[tokio::test]
    async fn test_set_score_unknown_player() -> Result<()> {
        let (_, players) = repo();

        let err = players.set_score(Uuid::new_v4(), 10).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(players.all().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_set_score_rejects_negative() -> Result<()> {
        let (_, players) = repo();
        let player = players.create("Alice").await?;
        players.set_score(player.id, 12).await?;

        let err = players.set_score(player.id, -4).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(players.all().await?[0].score, 12);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_by_id() -> Result<()> {
        let (_, players) = repo();
        let player = players.create("Alice").await?;
        players.set_score(player.id, 21).await?;

        let found = players.get_by_id(player.id).await?;
        assert_eq!(found.name, "Alice");
        assert_eq!(found.score, 21);

        let err = players.get_by_id(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Db(DbError::PlayerNotFound(_))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_units_of_work_share_the_store() -> Result<()> {
        let (provider, players) = repo();
        let player = players.create("Alice").await?;

        let other = provider.begin().await?;
        other.players().set_score(player.id, 33).await?;
        other.commit().await?;

        assert_eq!(players.all().await?[0].score, 33);
        Ok(())
    }

    #[tokio::test]
    async fn test_creation_times_are_strictly_increasing() -> Result<()> {
        let (_, players) = repo();

        let mut created = Vec::new();
        for idx in 0..50 {
            created.push(players.create(&format!("p{idx}")).await?);
        }

        for pair in created.windows(2) {
            assert!(pair[0].created_at < pair[1].created_at);
        }
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writes_are_not_lost() -> Result<()> {
        let (_, players) = repo();

        let mut tasks = Vec::new();
        for idx in 0..32 {
            let players = players.clone();
            tasks.push(tokio::spawn(async move {
                let player = players.create(&format!("p{idx}")).await?;
                players.set_score(player.id, idx).await?;
                // Readers running alongside writers only ever see full records.
                let snapshot = players.all().await?;
                assert!(snapshot.iter().all(|p| p.score >= 0));
                Ok::<_, ApplicationError>(player.id)
            }));
        }

        let mut ids = HashSet::new();
        for task in tasks {
            ids.insert(task.await.expect("task panicked")?);
        }

        let all = players.all().await?;
        assert_eq!(ids.len(), 32);
        assert_eq!(all.len(), 32);
        let total: i64 = all.iter().map(|p| p.score).sum();
        assert_eq!(total, (0..32).sum::<i64>());
        Ok(())
    }
}
