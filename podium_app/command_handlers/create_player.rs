use std::sync::Arc;

use podium_types::{Result, common::Player, errors::DomainError};

use crate::{
    config::Config,
    cqrs::{CommandHandler, commands::CreatePlayer},
    uow::UnitOfWork,
};

pub struct CreatePlayerCommandHandler {}

impl Default for CreatePlayerCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl CreatePlayerCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<CreatePlayer> for CreatePlayerCommandHandler {
    async fn handle(
        &self,
        command: CreatePlayer,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<Player> {
        let name = command.name.trim();
        if name.is_empty() {
            return Err(DomainError::EmptyPlayerName.into());
        }

        let player = uow.players().create(name).await?;
        tracing::info!(player_id = %player.id, name = %player.name, "Player created");

        Ok(player)
    }
}
