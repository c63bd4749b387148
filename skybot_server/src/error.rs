//! Error-to-response mapping for the HTTP boundary.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use skybot_conversation::{ConversationError, WEATHER_APOLOGY};
use thiserror::Error;

use crate::types::{ErrorResponse, WeatherResponse};

/// Failures surfaced by the HTTP boundary.
///
/// User-visible bodies carry only plain apology text; the underlying
/// collaborator errors are logged where they are detected and never
/// serialized.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Conversation(#[from] ConversationError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Conversation(ConversationError::InvalidInput(reason)) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: reason })).into_response()
            }
            Self::Conversation(ConversationError::WeatherLookupFailed(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(WeatherResponse {
                    messages: vec![WEATHER_APOLOGY.to_string()],
                    weather_report: None,
                }),
            )
                .into_response(),
            Self::Conversation(ConversationError::DialogueUnavailable(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "dialogue service unavailable".to_string(),
                }),
            )
                .into_response(),
        }
    }
}
