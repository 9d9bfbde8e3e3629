use async_trait::async_trait;
use std::sync::Arc;

use podium_types::errors::ApplicationError;

use crate::{
    config::Config,
    cqrs::{Query, QueryHandler, queries::GetLeaderboard},
    ranking::{parse_limit, top_n},
    uow::UnitOfWork,
};

pub struct GetLeaderboardHandler {}

impl GetLeaderboardHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl QueryHandler<GetLeaderboard> for GetLeaderboardHandler {
    async fn handle(
        &self,
        query: GetLeaderboard,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        config: &Arc<Config>,
    ) -> Result<<GetLeaderboard as Query>::Output, ApplicationError> {
        // Validate before touching the store.
        let limit = parse_limit(query.limit.as_deref(), config.default_limit, config.max_limit)?;

        let players = uow.players().all().await?;

        Ok(top_n(players, limit))
    }
}
