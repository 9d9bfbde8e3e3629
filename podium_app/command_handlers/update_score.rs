use std::sync::Arc;

use podium_types::{Result, errors::DomainError};

use crate::{
    config::Config,
    cqrs::{CommandHandler, commands::UpdateScore},
    uow::UnitOfWork,
};

pub struct UpdateScoreCommandHandler {}

impl Default for UpdateScoreCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateScoreCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<UpdateScore> for UpdateScoreCommandHandler {
    async fn handle(
        &self,
        command: UpdateScore,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<()> {
        if command.score < 0 {
            return Err(DomainError::NegativeScore(command.score).into());
        }

        uow.players()
            .set_score(command.player_id, command.score)
            .await?;

        tracing::debug!(
            player_id = %command.player_id,
            score = command.score,
            "Score updated"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use uuid::Uuid;

    use podium_types::errors::{ApplicationError, DbError, DomainError, ErrorKind};

    use super::*;
    use crate::{config::Config, test_utils::tests::MockUnitOfWork, uow::UnitOfWork};

    #[tokio::test]
    async fn test_update_score_replaces_score() -> Result<()> {
        let mock = MockUnitOfWork::new();
        let player = mock.add_player("Alice", 30);
        let mock_uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(mock.clone());
        let config = Arc::new(Config::default());
        let handler = UpdateScoreCommandHandler::new();

        handler
            .handle(
                UpdateScore {
                    player_id: player.id,
                    score: 75,
                },
                &mock_uow,
                &config,
            )
            .await?;

        assert_eq!(mock.score_of(player.id), Some(75));

        handler
            .handle(
                UpdateScore {
                    player_id: player.id,
                    score: 5,
                },
                &mock_uow,
                &config,
            )
            .await?;

        assert_eq!(mock.score_of(player.id), Some(5), "score is replaced, not added");

        let stored = mock_uow.players().get_by_id(player.id).await?;
        assert_eq!(stored.score, 5);
        assert_eq!(stored.name, "Alice");
        Ok(())
    }

    #[tokio::test]
    async fn test_update_score_accepts_zero() -> Result<()> {
        let mock = MockUnitOfWork::new();
        let player = mock.add_player("Alice", 30);
        let mock_uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(mock.clone());
        let config = Arc::new(Config::default());

        UpdateScoreCommandHandler::new()
            .handle(
                UpdateScore {
                    player_id: player.id,
                    score: 0,
                },
                &mock_uow,
                &config,
            )
            .await?;

        assert_eq!(mock.score_of(player.id), Some(0));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_score_unknown_player() {
        let mock = MockUnitOfWork::new();
        let mock_uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(mock.clone());
        let config = Arc::new(Config::default());
        let unknown = Uuid::new_v4();

        let err = UpdateScoreCommandHandler::new()
            .handle(
                UpdateScore {
                    player_id: unknown,
                    score: 10,
                },
                &mock_uow,
                &config,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::Db(DbError::PlayerNotFound(id)) if id == unknown));
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(mock.player_count(), 0, "unknown ids must not create players");

        let err = mock_uow.players().get_by_id(unknown).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_update_score_rejects_negative_score() {
        let mock = MockUnitOfWork::new();
        let player = mock.add_player("Alice", 30);
        let mock_uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(mock.clone());
        let config = Arc::new(Config::default());

        let err = UpdateScoreCommandHandler::new()
            .handle(
                UpdateScore {
                    player_id: player.id,
                    score: -1,
                },
                &mock_uow,
                &config,
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::NegativeScore(-1))
        ));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(mock.score_of(player.id), Some(30), "score must be unchanged");
    }
}
