//! Top-N ordering over a snapshot of players.
//!
//! Everything in here is a pure function of its input: the leaderboard is
//! never cached, it's recomputed from a fresh read of the store every time.

use std::cmp::Ordering;

use podium_types::{common::Player, errors::DomainError};

/// Parses the leaderboard size requested by a client.
///
/// A missing or blank value falls back to `default`. Anything that isn't a
/// positive integer is rejected, values above `max` are clamped to it.
pub fn parse_limit(raw: Option<&str>, default: usize, max: usize) -> Result<usize, DomainError> {
    let max = max.max(1);

    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(default.clamp(1, max)),
        Some(raw) => raw,
    };

    let limit = raw
        .parse::<i64>()
        .map_err(|_| DomainError::InvalidLimit(raw.to_string()))?;

    if limit <= 0 {
        return Err(DomainError::InvalidLimit(raw.to_string()));
    }

    Ok(usize::try_from(limit).map_or(max, |limit| limit.min(max)))
}

/// Leaderboard order: score descending, then oldest player first, then id.
pub fn compare(a: &Player, b: &Player) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

/// Returns the best `limit` players, in leaderboard order.
pub fn top_n(mut players: Vec<Player>, limit: usize) -> Vec<Player> {
    players.sort_unstable_by(compare);
    players.truncate(limit);
    players
}
