#[cfg(any(test, feature = "test-utils"))]
#[cfg(not(tarpaulin_include))]
pub mod tests {
    use async_trait::async_trait;
    use chrono::{DateTime, Duration as ChronoDuration, Utc};
    use std::{
        collections::HashMap,
        sync::{
            Arc, Mutex,
            atomic::{AtomicBool, AtomicUsize, Ordering},
        },
        time::Duration,
    };
    use uuid::Uuid;

    use podium_types::{
        common::Player,
        errors::{ApplicationError, DbError},
    };

    use crate::{
        repository::PlayerRepository,
        uow::{UnitOfWork, UnitOfWorkProvider},
    };

    #[derive(Default)]
    struct MockPlayers {
        players: HashMap<Uuid, Player>,
        last_created_at: Option<DateTime<Utc>>,
    }

    impl MockPlayers {
        /// Creation timestamps are strictly increasing, so ties rank in
        /// insertion order.
        fn next_created_at(&mut self) -> DateTime<Utc> {
            let now = Utc::now();
            let created_at = match self.last_created_at {
                Some(last) if now <= last => last + ChronoDuration::microseconds(1),
                _ => now,
            };
            self.last_created_at = Some(created_at);
            created_at
        }
    }

    #[derive(Default, Clone)]
    pub struct MockPlayerRepository {
        state: Arc<Mutex<MockPlayers>>,
        unavailable: Arc<AtomicBool>,
        delay: Arc<Mutex<Option<Duration>>>,
    }

    impl MockPlayerRepository {
        async fn check_available(&self) -> Result<(), ApplicationError> {
            let delay = *self.delay.lock().unwrap();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }

            if self.unavailable.load(Ordering::SeqCst) {
                return Err(ApplicationError::Db(DbError::Transaction(
                    "mock store unavailable".to_string(),
                )));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl PlayerRepository for MockPlayerRepository {
        async fn create(&self, name: &str) -> Result<Player, ApplicationError> {
            self.check_available().await?;

            let mut state = self.state.lock().unwrap();
            let player = Player::new(Uuid::new_v4(), name.to_string(), state.next_created_at());
            state.players.insert(player.id, player.clone());
            Ok(player)
        }

        async fn set_score(&self, player_id: Uuid, score: i64) -> Result<(), ApplicationError> {
            self.check_available().await?;

            let mut state = self.state.lock().unwrap();
            let player = state
                .players
                .get_mut(&player_id)
                .ok_or(ApplicationError::Db(DbError::PlayerNotFound(player_id)))?;
            player.score = score;
            Ok(())
        }

        async fn get_by_id(&self, player_id: Uuid) -> Result<Player, ApplicationError> {
            self.check_available().await?;

            let state = self.state.lock().unwrap();
            state
                .players
                .get(&player_id)
                .cloned()
                .ok_or(ApplicationError::Db(DbError::PlayerNotFound(player_id)))
        }

        async fn all(&self) -> Result<Vec<Player>, ApplicationError> {
            self.check_available().await?;

            Ok(self.state.lock().unwrap().players.values().cloned().collect())
        }
    }

    /// In-memory unit of work for handler tests.
    ///
    /// Clones share the same players, so a test can keep a handle to inspect
    /// the store after the handler ran. Commits and rollbacks are counted.
    #[derive(Default, Clone)]
    pub struct MockUnitOfWork {
        players: MockPlayerRepository,
        commits: Arc<AtomicUsize>,
        rollbacks: Arc<AtomicUsize>,
    }

    impl MockUnitOfWork {
        pub fn new() -> Self {
            Self::default()
        }

        /// Seeds a player directly, bypassing the handlers.
        pub fn add_player(&self, name: &str, score: i64) -> Player {
            let mut state = self.players.state.lock().unwrap();
            let mut player = Player::new(Uuid::new_v4(), name.to_string(), state.next_created_at());
            player.score = score;
            state.players.insert(player.id, player.clone());
            player
        }

        pub fn score_of(&self, player_id: Uuid) -> Option<i64> {
            let state = self.players.state.lock().unwrap();
            state.players.get(&player_id).map(|p| p.score)
        }

        pub fn player_count(&self) -> usize {
            self.players.state.lock().unwrap().players.len()
        }

        /// Makes every repository call fail as if the backend were down.
        pub fn set_unavailable(&self, unavailable: bool) {
            self.players.unavailable.store(unavailable, Ordering::SeqCst);
        }

        /// Makes every repository call sleep first.
        pub fn set_delay(&self, delay: Option<Duration>) {
            *self.players.delay.lock().unwrap() = delay;
        }

        pub fn commits(&self) -> usize {
            self.commits.load(Ordering::SeqCst)
        }

        pub fn rollbacks(&self) -> usize {
            self.rollbacks.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl<'a> UnitOfWork<'a> for MockUnitOfWork {
        fn players(&self) -> Arc<dyn PlayerRepository + 'a> {
            Arc::new(self.players.clone())
        }

        async fn commit(self: Box<Self>) -> Result<(), ApplicationError> {
            self.commits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn rollback(self: Box<Self>) -> Result<(), ApplicationError> {
            self.rollbacks.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    /// Hands out clones of a single `MockUnitOfWork`.
    #[derive(Default, Clone)]
    pub struct MockUnitOfWorkProvider {
        uow: MockUnitOfWork,
    }

    impl MockUnitOfWorkProvider {
        pub fn new(uow: MockUnitOfWork) -> Self {
            Self { uow }
        }
    }

    #[async_trait]
    impl UnitOfWorkProvider for MockUnitOfWorkProvider {
        async fn begin<'p>(&'p self) -> Result<Box<dyn UnitOfWork<'p> + 'p>, ApplicationError> {
            Ok(Box::new(self.uow.clone()))
        }
    }
}
