use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use podium_types::errors::{ApplicationError, DomainError, ErrorKind};

use crate::payloads::ErrorResponse;

/// A failed request, rendered as `{"success": false, "error": ...}`.
///
/// Only the error kind reaches the client: storage failures are logged here
/// and answered with a generic message.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn from_app(err: ApplicationError, storage_message: &'static str) -> Self {
        match err.kind() {
            ErrorKind::InvalidArgument => {
                tracing::debug!("Rejected request: {err}");
                ApiError {
                    status: StatusCode::BAD_REQUEST,
                    message: err.to_string(),
                }
            }
            ErrorKind::NotFound => ApiError {
                status: StatusCode::NOT_FOUND,
                message: "Player not found".to_string(),
            },
            ErrorKind::Storage => {
                tracing::error!("{storage_message}: {err}");
                ApiError {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: storage_message.to_string(),
                }
            }
        }
    }

    fn bad_request(err: DomainError) -> Self {
        ApiError {
            status: StatusCode::BAD_REQUEST,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            success: false,
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(DomainError::MalformedRequest(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::bad_request(DomainError::MalformedRequest(rejection.body_text()))
    }
}

/// Player ids come in as strings; anything that isn't a UUID is a bad request.
pub(crate) fn parse_player_id(raw: &str) -> Result<Uuid, ApiError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ApiError::bad_request(DomainError::MalformedRequest(
            "userId is required".to_string(),
        )));
    }

    Uuid::parse_str(raw)
        .map_err(|_| ApiError::bad_request(DomainError::InvalidPlayerId(raw.to_string())))
}
