use thiserror::Error;

/// Errors for domain rules (input validation).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Player name cannot be empty")]
    EmptyPlayerName,

    #[error("Score must be non-negative, got {0}")]
    NegativeScore(i64),

    #[error("Invalid leaderboard limit '{0}': must be a positive integer")]
    InvalidLimit(String),

    #[error("Invalid player id '{0}'")]
    InvalidPlayerId(String),

    #[error("Invalid request: {0}")]
    MalformedRequest(String),
}
