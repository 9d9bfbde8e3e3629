mod helpers;
mod leaderboard_handler;
mod player_handler;

pub use helpers::ApiError;
pub use leaderboard_handler::{get_leaderboard, stream_leaderboard};
pub use player_handler::{create_player, update_score};

use axum::http::StatusCode;

/// Any unknown route: 404 with an empty body.
pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
