use thiserror::Error;

pub mod db_error;
pub mod domain_error;

pub use db_error::DbError;
pub use domain_error::DomainError;

pub type Result<T, E = ApplicationError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

/// The only error categories visible outside the application layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed, missing or out-of-range input.
    InvalidArgument,
    /// The referenced player does not exist.
    NotFound,
    /// The store is unavailable or the operation failed.
    Storage,
}

impl ApplicationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApplicationError::Domain(_) => ErrorKind::InvalidArgument,
            ApplicationError::Db(DbError::PlayerNotFound(_)) => ErrorKind::NotFound,
            ApplicationError::Db(_) | ApplicationError::Infrastructure(_) => ErrorKind::Storage,
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_error_kinds() {
        let err: ApplicationError = DomainError::NegativeScore(-1).into();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err: ApplicationError = DbError::PlayerNotFound(Uuid::new_v4()).into();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err: ApplicationError = DbError::Timeout.into();
        assert_eq!(err.kind(), ErrorKind::Storage);

        let err: ApplicationError = DbError::Database(sqlx::Error::PoolTimedOut).into();
        assert_eq!(err.kind(), ErrorKind::Storage);

        let err = ApplicationError::Infrastructure("port in use".to_string());
        assert_eq!(err.kind(), ErrorKind::Storage);
    }
}
