//! Turn orchestration for the dialogue + weather conversation.
//!
//! The `TurnOrchestrator` is the main entry point for driving one
//! conversational turn: it relays the user's text to the dialogue
//! service, threads the context token, and merges the weather
//! augmentation into the reply.

use std::sync::Arc;

use skybot_core::{
    ConversationContext, DialogueService, TurnResult, WEATHER_DISCLAIMER, WeatherService,
};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::augment::WeatherAugmenter;
use crate::context::ContextStore;
use crate::error::{ConversationError, Result};
use crate::selector::EntitySelector;

/// Fixed reply used when the dialogue service cannot be reached.
pub const DIALOGUE_APOLOGY: &str = "Sorry, but something went wrong. Could you try again?";

/// Fixed message appended when the weather augmentation sub-path fails.
pub const WEATHER_APOLOGY: &str = "Sorry, but I couldn't get the weather. Could you try again?";

/// Drives conversational turns for a single active conversation.
///
/// The orchestrator owns the context slot for its conversation. Turns must
/// be serialized by the caller; the orchestrator takes `&mut self` and
/// provides no internal locking.
pub struct TurnOrchestrator<D = Arc<dyn DialogueService>, W = Arc<dyn WeatherService>>
where
    D: Send + Sync,
    W: Send + Sync,
{
    dialogue: D,
    augmenter: WeatherAugmenter<W>,
    selector: EntitySelector,
    store: ContextStore,
    conversation_id: Uuid,
}

impl<D, W> TurnOrchestrator<D, W>
where
    D: DialogueService + Send + Sync,
    W: WeatherService + Send + Sync,
{
    pub fn new(dialogue: D, weather: W) -> Self {
        let conversation_id = Uuid::now_v7();
        info!("Creating turn orchestrator for conversation {conversation_id}");

        Self {
            dialogue,
            augmenter: WeatherAugmenter::new(weather),
            selector: EntitySelector::default(),
            store: ContextStore::new(),
            conversation_id,
        }
    }

    /// Override the default entity selection policy.
    #[must_use]
    pub fn with_selector(mut self, selector: EntitySelector) -> Self {
        self.selector = selector;
        self
    }

    /// Run one user-initiated turn.
    ///
    /// `prior_context` is the token returned by the previous turn, `None`
    /// for a fresh conversation. Empty user text is rejected before any
    /// collaborator call.
    pub async fn run_turn(
        &mut self,
        user_text: &str,
        prior_context: Option<ConversationContext>,
    ) -> Result<TurnResult> {
        if user_text.trim().is_empty() {
            return Err(ConversationError::InvalidInput(
                "user text must not be empty".to_string(),
            ));
        }

        Ok(self.execute_turn(user_text, prior_context).await)
    }

    /// Run the bootstrap turn that elicits the service's welcome reply.
    ///
    /// Sends an empty utterance with no context. This is the one turn where
    /// empty text is legal, and it resets the context slot first.
    pub async fn bootstrap(&mut self) -> TurnResult {
        info!(
            "Bootstrapping conversation {} with an empty turn",
            self.conversation_id
        );
        self.store.clear();
        self.execute_turn("", None).await
    }

    /// One full turn. All collaborator failures are recovered here into
    /// apology messages; the caller always gets a renderable result.
    async fn execute_turn(
        &mut self,
        user_text: &str,
        prior_context: Option<ConversationContext>,
    ) -> TurnResult {
        debug!("Running turn for conversation {}", self.conversation_id);

        let response = match self
            .dialogue
            .send_message(user_text, prior_context.as_ref())
            .await
        {
            Ok(response) => response,
            Err(e) => {
                // Context keeps its pre-call value: last-known-good.
                let err = ConversationError::DialogueUnavailable(e);
                error!("Turn failed for conversation {}: {err}", self.conversation_id);
                return TurnResult {
                    reply_messages: vec![DIALOGUE_APOLOGY.to_string()],
                    ..TurnResult::default()
                };
            }
        };

        self.store.set(response.context);

        let mut result = TurnResult {
            reply_messages: response
                .reply_texts
                .into_iter()
                .filter(|text| !text.trim().is_empty())
                .collect(),
            ..TurnResult::default()
        };

        if response.entities.is_empty() {
            return result;
        }

        let selected = self.selector.select(&response.entities);
        debug!(
            "Selected entities: location={:?} time={:?}",
            selected.location, selected.time
        );

        match self
            .augmenter
            .augment(selected.location.as_deref(), selected.time.as_deref())
            .await
        {
            Ok(augmentation) => {
                result.weather_messages = augmentation.messages;
                if let Some(report) = augmentation.report {
                    result.weather_messages.push(report.narrative());
                    result.weather_messages.push(WEATHER_DISCLAIMER.to_string());
                    result.weather_report = Some(report);
                }
            }
            Err(e) => {
                // The dialogue reply already obtained is never voided by a
                // failed augmentation.
                warn!(
                    "Weather augmentation failed for conversation {}: {e}",
                    self.conversation_id
                );
                result.weather_messages = vec![WEATHER_APOLOGY.to_string()];
                result.weather_report = None;
            }
        }

        result
    }

    /// Context token recorded after the most recent successful turn.
    #[must_use]
    pub const fn context(&self) -> Option<&ConversationContext> {
        self.store.get()
    }

    /// The context slot owned by this conversation.
    #[must_use]
    pub const fn store(&self) -> &ContextStore {
        &self.store
    }

    #[must_use]
    pub const fn conversation_id(&self) -> Uuid {
        self.conversation_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use skybot_core::{DialogueResponse, Entity, EntityKind, ForecastDay, WeatherReport};

    struct MockDialogue {
        reply_texts: Vec<String>,
        entities: Vec<Entity>,
        context: ConversationContext,
        fail: bool,
    }

    impl MockDialogue {
        fn replying(texts: &[&str]) -> Self {
            Self {
                reply_texts: texts.iter().map(ToString::to_string).collect(),
                entities: Vec::new(),
                context: json!({"conversation_id": "abc"}),
                fail: false,
            }
        }

        fn with_entities(mut self, entities: Vec<Entity>) -> Self {
            self.entities = entities;
            self
        }

        fn failing() -> Self {
            Self {
                reply_texts: Vec::new(),
                entities: Vec::new(),
                context: ConversationContext::Null,
                fail: true,
            }
        }
    }

    #[async_trait]
    impl DialogueService for MockDialogue {
        async fn send_message(
            &self,
            _text: &str,
            _context: Option<&ConversationContext>,
        ) -> anyhow::Result<DialogueResponse> {
            if self.fail {
                anyhow::bail!("503 Service Unavailable");
            }
            Ok(DialogueResponse {
                reply_texts: self.reply_texts.clone(),
                entities: self.entities.clone(),
                context: self.context.clone(),
            })
        }
    }

    struct MockWeather {
        fail: bool,
    }

    #[async_trait]
    impl WeatherService for MockWeather {
        async fn lookup(&self, location: &str) -> anyhow::Result<WeatherReport> {
            if self.fail {
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

    #[tokio::test]
    async fn successful_turn_stores_returned_context_exactly() {
        let mut orchestrator = TurnOrchestrator::new(
            MockDialogue::replying(&["Hello!"]),
            MockWeather { fail: false },
        );

        let result = orchestrator.run_turn("hi", None).await;

        assert!(result.is_ok());
        assert_eq!(
            orchestrator.context(),
            Some(&json!({"conversation_id": "abc"}))
        );
    }

    #[tokio::test]
    async fn falsy_reply_texts_are_dropped() {
        let mut orchestrator = TurnOrchestrator::new(
            MockDialogue::replying(&["Hello!", "", "   ", "How can I help?"]),
            MockWeather { fail: false },
        );

        let result = orchestrator.run_turn("hi", None).await.unwrap_or_default();

        assert_eq!(result.reply_messages, vec!["Hello!", "How can I help?"]);
    }

    #[tokio::test]
    async fn empty_user_text_is_rejected_before_any_call() {
        let mut orchestrator =
            TurnOrchestrator::new(MockDialogue::failing(), MockWeather { fail: false });

        let result = orchestrator.run_turn("   ", None).await;

        // The failing dialogue mock was never reached.
        assert!(matches!(result, Err(ConversationError::InvalidInput(_))));
        assert_eq!(orchestrator.context(), None);
    }

    #[tokio::test]
    async fn bootstrap_sends_empty_turn_and_gets_welcome() {
        let mut orchestrator = TurnOrchestrator::new(
            MockDialogue::replying(&["Welcome! Ask me about the weather."]),
            MockWeather { fail: false },
        );

        let result = orchestrator.bootstrap().await;

        assert_eq!(
            result.reply_messages,
            vec!["Welcome! Ask me about the weather."]
        );
        assert!(orchestrator.context().is_some());
    }

    #[tokio::test]
    async fn dialogue_failure_yields_apology_and_keeps_context() {
        let mut orchestrator = TurnOrchestrator::new(
            MockDialogue::replying(&["Hello!"]),
            MockWeather { fail: false },
        );
        let _ = orchestrator.run_turn("hi", None).await;
        let before = orchestrator.context().cloned();

        orchestrator.dialogue = MockDialogue::failing();
        let result = orchestrator
            .run_turn("hi again", before.clone())
            .await
            .unwrap_or_default();

        assert_eq!(result.reply_messages, vec![DIALOGUE_APOLOGY]);
        assert!(result.weather_messages.is_empty());
        assert!(result.weather_report.is_none());
        assert_eq!(orchestrator.context().cloned(), before);
    }

    #[tokio::test]
    async fn no_entities_means_no_augmentation() {
        let mut orchestrator = TurnOrchestrator::new(
            MockDialogue::replying(&["Hello!"]),
            // A failing weather mock proves no lookup happens.
            MockWeather { fail: true },
        );

        let result = orchestrator.run_turn("hi", None).await.unwrap_or_default();

        assert!(result.weather_messages.is_empty());
        assert!(result.weather_report.is_none());
    }

    #[tokio::test]
    async fn location_entity_triggers_narrated_weather() {
        let mut orchestrator = TurnOrchestrator::new(
            MockDialogue::replying(&["Here you go."]).with_entities(vec![Entity::new(
                EntityKind::Location,
                "Paris",
                0.9,
            )]),
            MockWeather { fail: false },
        );

        let result = orchestrator
            .run_turn("weather in Paris", None)
            .await
            .unwrap_or_default();

        assert_eq!(result.reply_messages, vec!["Here you go."]);
        assert_eq!(
            result.weather_messages,
            vec![
                "It is currently 64 ºF and Clear in Paris, \
                 with a high of 70 and a low of 55.",
                WEATHER_DISCLAIMER,
            ]
        );
        assert_eq!(
            result.weather_report.map(|r| r.city_name),
            Some("Paris".to_string())
        );
    }

    #[tokio::test]
    async fn augmentation_failure_never_voids_the_reply() {
        let mut orchestrator = TurnOrchestrator::new(
            MockDialogue::replying(&["Here you go."]).with_entities(vec![Entity::new(
                EntityKind::Location,
                "Atlantis",
                0.9,
            )]),
            MockWeather { fail: true },
        );

        let result = orchestrator
            .run_turn("weather in Atlantis", None)
            .await
            .unwrap_or_default();

        assert_eq!(result.reply_messages, vec!["Here you go."]);
        assert_eq!(result.weather_messages, vec![WEATHER_APOLOGY]);
        assert!(result.weather_report.is_none());
        // The turn itself succeeded, so the context still advanced.
        assert!(orchestrator.context().is_some());
    }
}
