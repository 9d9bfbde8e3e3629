use sqlx::{Postgres, Transaction};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use podium_app::repository::PlayerRepository;
use podium_types::{
    Result,
    common::Player,
    errors::{ApplicationError, DbError, DomainError},
};

use crate::models::{self as db_models};

/// Implements PlayerRepository and operates on transactions.
#[derive(Clone)]
pub struct PostgresPlayerRepository<'a> {
    tx: Arc<Mutex<Transaction<'a, Postgres>>>,
}

impl<'a> PostgresPlayerRepository<'a> {
    pub fn new(tx: Arc<Mutex<Transaction<'a, Postgres>>>) -> Self {
        Self { tx }
    }
}

#[async_trait::async_trait]
impl<'a> PlayerRepository for PostgresPlayerRepository<'a> {
    async fn create(&self, name: &str) -> Result<Player, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;

        let player = sqlx::query_as::<_, db_models::Player>(
            r#"
              INSERT INTO players (name)
              VALUES ($1)
              RETURNING id, name, score, created_at
              "#,
        )
        .bind(name)
        .fetch_one(&mut **tx_guard)
        .await
        .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        Ok(player.into())
    }

    async fn set_score(&self, player_id: Uuid, score: i64) -> Result<(), ApplicationError> {
        if score < 0 {
            return Err(DomainError::NegativeScore(score).into());
        }

        let mut tx_guard = self.tx.lock().await;

        // A single-row UPDATE: concurrent writers to the same player are
        // serialized by the row lock, last write wins.
        let result = sqlx::query(r#"UPDATE players SET score = $2 WHERE id = $1"#)
            .bind(player_id)
            .bind(score)
            .execute(&mut **tx_guard)
            .await
            .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        if result.rows_affected() == 0 {
            return Err(ApplicationError::Db(DbError::PlayerNotFound(player_id)));
        }

        Ok(())
    }

    async fn get_by_id(&self, player_id: Uuid) -> Result<Player, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;

        let player = sqlx::query_as::<_, db_models::Player>(
            r#"SELECT id, name, score, created_at FROM players WHERE id = $1"#,
        )
        .bind(player_id)
        .fetch_optional(&mut **tx_guard)
        .await
        .map_err(|e| ApplicationError::Db(DbError::Database(e)))?
        .ok_or(ApplicationError::Db(DbError::PlayerNotFound(player_id)))?;

        Ok(player.into())
    }

    async fn all(&self) -> Result<Vec<Player>, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;

        // Walks players_leaderboard_idx, ranking re-sorts anyway.
        let players = sqlx::query_as::<_, db_models::Player>(
            r#"
              SELECT id, name, score, created_at
              FROM players
              ORDER BY score DESC, created_at ASC, id ASC
              "#,
        )
        .fetch_all(&mut **tx_guard)
        .await
        .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        Ok(players.into_iter().map(Into::into).collect())
    }
}
