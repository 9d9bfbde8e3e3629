use async_trait::async_trait;
use podium_types::errors::ApplicationError;
use std::sync::Arc;

use crate::{config::Config, uow::UnitOfWork};

/// Read-only request. Handlers must not write through the unit of work:
/// the bus rolls it back no matter what.
pub trait Query: Send + Sync {
    type Output: Send + Sync;
}

#[async_trait]
pub trait QueryHandler<Q: Query> {
    async fn handle(
        &self,
        query: Q,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        config: &Arc<Config>,
    ) -> Result<Q::Output, ApplicationError>;
}
