use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::WithRejection;

use podium_app::{
    command_handlers::{CreatePlayerCommandHandler, UpdateScoreCommandHandler},
    cqrs::commands::{CreatePlayer, UpdateScore},
};

use crate::{
    handlers::helpers::{ApiError, parse_player_id},
    http::AppState,
    payloads::{CreatePlayerRequest, CreatePlayerResponse, SuccessResponse, UpdateScoreRequest},
};

/// POST /players
pub async fn create_player(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<CreatePlayerRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let player = state
        .app_bus
        .execute(CreatePlayer::new(body.name), CreatePlayerCommandHandler::new())
        .await
        .map_err(|e| ApiError::from_app(e, "Failed to create player"))?;

    let body = CreatePlayerResponse {
        success: true,
        user: player.into(),
    };
    Ok((StatusCode::CREATED, Json(body)))
}

/// POST /players/score
///
/// Invalid input is answered right away, the store is never touched.
pub async fn update_score(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<UpdateScoreRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let player_id = parse_player_id(&body.user_id)?;

    state
        .app_bus
        .execute(
            UpdateScore {
                player_id,
                score: body.score,
            },
            UpdateScoreCommandHandler::new(),
        )
        .await
        .map_err(|e| ApiError::from_app(e, "Failed to update score"))?;

    Ok((StatusCode::OK, Json(SuccessResponse { success: true })))
}
