use std::sync::Arc;

use podium_types::errors::ApplicationError;

use crate::repository::*;

/// Hands out repositories sharing one store transaction.
#[async_trait::async_trait]
pub trait UnitOfWork<'a>: Send + Sync {
    fn players(&self) -> Arc<dyn PlayerRepository + 'a>;

    async fn commit(self: Box<Self>) -> Result<(), ApplicationError>;
    async fn rollback(self: Box<Self>) -> Result<(), ApplicationError>;
}

/// Opens units of work against a store backend.
#[async_trait::async_trait]
pub trait UnitOfWorkProvider: Send + Sync {
    async fn begin<'p>(&'p self) -> Result<Box<dyn UnitOfWork<'p> + 'p>, ApplicationError>;
}
