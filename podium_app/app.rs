use std::{future::Future, sync::Arc};

use podium_types::errors::{ApplicationError, DbError};

use crate::{
    config::Config,
    cqrs::{Command, CommandHandler, Query, QueryHandler},
    uow::{UnitOfWork, UnitOfWorkProvider},
};

/// Entry point for every command and query.
///
/// Opens a unit of work per call and owns its lifecycle, so handlers only
/// deal with repositories. Every store round-trip is bounded by
/// `Config::store_timeout`.
pub struct AppBus {
    config: Arc<Config>,
    uow_provider: Arc<dyn UnitOfWorkProvider>,
}

impl AppBus {
    pub fn new(config: Arc<Config>, uow_provider: Arc<dyn UnitOfWorkProvider>) -> Self {
        Self {
            config,
            uow_provider,
        }
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Runs a state-changing command: commits if the handler succeeds,
    /// rolls back otherwise.
    pub async fn execute<C, H>(&self, cmd: C, handler: H) -> Result<C::Output, ApplicationError>
    where
        C: Command,
        H: CommandHandler<C>,
    {
        let uow = self.begin().await?;

        let result = self
            .bounded(handler.handle(cmd, &uow, &self.config))
            .await;

        match result {
            Ok(output) => {
                self.bounded(uow.commit()).await?;
                Ok(output)
            }
            Err(e) => {
                if let Err(rollback_err) = uow.rollback().await {
                    tracing::error!("Unable to rollback unit of work: {rollback_err}");
                }
                Err(e)
            }
        }
    }

    /// Runs a read-only query. The unit of work is always rolled back.
    pub async fn query<Q, H>(&self, query: Q, handler: H) -> Result<Q::Output, ApplicationError>
    where
        Q: Query,
        H: QueryHandler<Q>,
    {
        let uow = self.begin().await?;

        let result = self
            .bounded(handler.handle(query, &uow, &self.config))
            .await;

        if let Err(rollback_err) = uow.rollback().await {
            tracing::warn!("Unable to rollback read-only unit of work: {rollback_err}");
        }

        result
    }

    async fn begin(&self) -> Result<Box<dyn UnitOfWork<'_> + '_>, ApplicationError> {
        self.bounded(self.uow_provider.begin()).await
    }

    async fn bounded<T, F>(&self, fut: F) -> Result<T, ApplicationError>
    where
        F: Future<Output = Result<T, ApplicationError>>,
    {
        match tokio::time::timeout(self.config.store_timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!(
                    "Store operation exceeded {:?}",
                    self.config.store_timeout
                );
                Err(ApplicationError::Db(DbError::Timeout))
            }
        }
    }
}
