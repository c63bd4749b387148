//! HTTP request handlers

use std::path::Path;

use axum::{Json, Router, extract::State, routing::post};
use skybot_conversation::ConversationError;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::AppState;
use crate::error::ApiError;
use crate::types::{MessageRequest, MessageResponse, WeatherRequest, WeatherResponse};

/// Create the API router.
///
/// `public_dir` is served for everything outside `/api`, so the chat UI can
/// live next to the bot the way the original deployment shipped it.
pub fn create_router(state: AppState, public_dir: &Path) -> Router {
    Router::new()
        .route("/api/message", post(send_message))
        .route("/api/weather", post(weather_for_entities))
        .fallback_service(ServeDir::new(public_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run one conversational turn.
///
/// An empty utterance with no context token is the bootstrap turn eliciting
/// the welcome reply; empty text on an established conversation is a client
/// fault. Dialogue failures come back as a 200 whose reply is the fixed
/// apology, so the conversation never dead-ends in the client.
async fn send_message(
    State(state): State<AppState>,
    Json(request): Json<MessageRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut orchestrator = state.orchestrator.lock().await;

    let result = if request.text.trim().is_empty() && request.context.is_none() {
        orchestrator.bootstrap().await
    } else {
        orchestrator.run_turn(&request.text, request.context).await?
    };

    let context = orchestrator.context().cloned();
    Ok(Json(MessageResponse::from_turn(result, context)))
}

/// Weather augmentation for a set of recognized entities.
async fn weather_for_entities(
    State(state): State<AppState>,
    Json(request): Json<WeatherRequest>,
) -> Result<Json<WeatherResponse>, ApiError> {
    if request.entities.is_empty() {
        return Err(ConversationError::InvalidInput(
            "entity list must not be empty".to_string(),
        )
        .into());
    }

    let selected = state.selector.select(&request.entities);
    debug!(
        "Weather request selected location={:?} time={:?}",
        selected.location, selected.time
    );

    let augmentation = state
        .augmenter
        .augment(selected.location.as_deref(), selected.time.as_deref())
        .await?;

    Ok(Json(WeatherResponse::from(augmentation)))
}

#[cfg(test)]
mod tests {
    #![expect(clippy::expect_used, reason = "Test failure should panic with context")]

    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use skybot_conversation::EntitySelector;
    use skybot_core::{
        ConversationContext, DialogueResponse, DialogueService, ForecastDay, WeatherReport,
        WeatherService,
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    struct MockDialogue {
        fail: bool,
    }

    #[async_trait]
    impl DialogueService for MockDialogue {
        async fn send_message(
            &self,
            text: &str,
            _context: Option<&ConversationContext>,
        ) -> anyhow::Result<DialogueResponse> {
            if self.fail {
                anyhow::bail!("502 Bad Gateway");
            }
            let reply = if text.is_empty() {
                "Welcome!".to_string()
            } else {
                format!("You said: {text}")
            };
            Ok(DialogueResponse {
                reply_texts: vec![reply],
                entities: Vec::new(),
                context: json!({"conversation_id": "abc"}),
            })
        }
    }

    struct MockWeather;

    #[async_trait]
    impl WeatherService for MockWeather {
        async fn lookup(&self, location: &str) -> anyhow::Result<WeatherReport> {
            if location == "Atlantis" {
                anyhow::bail!("unknown location");
            }
            Ok(WeatherReport {
                city_name: location.to_string(),
                current_temperature: 64.0,
                temperature_unit: "F".to_string(),
                condition_text: "Clear".to_string(),
                forecast_days: vec![ForecastDay {
                    high: 70.0,
                    low: 55.0,
                }],
            })
        }
    }

    fn test_router(dialogue_fails: bool) -> Router {
        let state = AppState::new(
            Arc::new(MockDialogue {
                fail: dialogue_fails,
            }),
            Arc::new(MockWeather),
            EntitySelector::default(),
        );
        create_router(state, Path::new("public"))
    }

    async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("request should build"),
            )
            .await
            .expect("request should not error");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn empty_text_without_context_bootstraps() {
        let (status, body) = post_json(
            test_router(false),
            "/api/message",
            json!({"text": "", "context": null}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["replyMessages"], json!(["Welcome!"]));
        assert_eq!(body["context"], json!({"conversation_id": "abc"}));
    }

    #[tokio::test]
    async fn empty_text_with_context_is_rejected() {
        let (status, _body) = post_json(
            test_router(false),
            "/api/message",
            json!({"text": "", "context": {"conversation_id": "abc"}}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn dialogue_failure_is_a_plain_apology() {
        let (status, body) = post_json(
            test_router(true),
            "/api/message",
            json!({"text": "hello", "context": null}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["replyMessages"],
            json!(["Sorry, but something went wrong. Could you try again?"])
        );
        assert_eq!(body["weatherMessages"], json!([]));
        assert_eq!(body["weatherReport"], Value::Null);
    }

    #[tokio::test]
    async fn weather_endpoint_augments_entities() {
        let (status, body) = post_json(
            test_router(false),
            "/api/weather",
            json!({"entities": [
                {"entity": "Time", "value": "tomorrow", "confidence": 0.9},
                {"entity": "sys-location", "value": "Paris", "confidence": 0.9}
            ]}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["messages"],
            json!([
                "Sorry, I don't know how to work with time yet. But, here's the weather for Paris!"
            ])
        );
        assert_eq!(body["weatherReport"]["cityName"], json!("Paris"));
    }

    #[tokio::test]
    async fn empty_entity_list_is_rejected_before_lookup() {
        let (status, _body) =
            post_json(test_router(false), "/api/weather", json!({"entities": []})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn failed_lookup_is_an_apology_with_null_report() {
        let (status, body) = post_json(
            test_router(false),
            "/api/weather",
            json!({"entities": [
                {"entity": "sys-location", "value": "Atlantis", "confidence": 0.9}
            ]}),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["messages"],
            json!(["Sorry, but I couldn't get the weather. Could you try again?"])
        );
        assert_eq!(body["weatherReport"], Value::Null);
    }
}
