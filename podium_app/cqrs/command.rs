use async_trait::async_trait;
use podium_types::errors::ApplicationError;
use std::sync::Arc;

use crate::{config::Config, uow::UnitOfWork};

/// A state change. `Output` is whatever the store hands back once it's
/// applied, like the newly created player.
pub trait Command: Send + Sync {
    type Output: Send + Sync;
}

/// Applies a command through the given unit of work. Committing or rolling
/// back is left to `AppBus`.
#[async_trait]
pub trait CommandHandler<C: Command> {
    async fn handle(
        &self,
        cmd: C,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        config: &Arc<Config>,
    ) -> Result<C::Output, ApplicationError>;
}
