use axum::{
    Json,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Sse},
};
use axum_extra::extract::WithRejection;

use podium_app::{cqrs::queries::GetLeaderboard, queries_handlers::GetLeaderboardHandler};

use crate::{
    handlers::helpers::ApiError,
    http::AppState,
    payloads::{LeaderboardParams, LeaderboardResponse},
};

/// GET /leaderboard?limit=n
pub async fn get_leaderboard(
    State(state): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<LeaderboardParams>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let players = state
        .app_bus
        .query(
            GetLeaderboard {
                limit: params.limit,
            },
            GetLeaderboardHandler::new(),
        )
        .await
        .map_err(|e| ApiError::from_app(e, "Failed to get leaderboard"))?;

    Ok(Json(LeaderboardResponse::new(players)))
}

/// GET /leaderboard/stream - Server-sent leaderboard snapshots
///
/// There's no error channel: when something fails the stream just ends.
pub async fn stream_leaderboard(State(state): State<AppState>) -> impl IntoResponse {
    let events = state.publisher.subscribe();

    ([(header::CONNECTION, "keep-alive")], Sse::new(events))
}
