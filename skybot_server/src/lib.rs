#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! HTTP presentation layer for the bot.
//!
//! Exposes exactly two operations over the conversation core: submit user
//! text with a context token (`POST /api/message`) and submit recognized
//! entities for a weather augmentation (`POST /api/weather`). Static assets
//! are served from a configurable directory. Collaborator failures cross
//! this boundary only as plain apology text.

mod error;
mod handlers;
mod types;

pub use error::ApiError;
pub use handlers::create_router;
pub use types::{ErrorResponse, MessageRequest, MessageResponse, WeatherRequest, WeatherResponse};

use std::sync::Arc;

use skybot_conversation::{EntitySelector, TurnOrchestrator, WeatherAugmenter};
use skybot_core::{DialogueService, WeatherService};
use tokio::sync::Mutex;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The single active conversation. The mutex serializes its turns;
    /// the orchestrator itself provides no locking.
    orchestrator: Arc<Mutex<TurnOrchestrator>>,
    augmenter: Arc<WeatherAugmenter>,
    selector: EntitySelector,
}

impl AppState {
    #[must_use]
    pub fn new(
        dialogue: Arc<dyn DialogueService>,
        weather: Arc<dyn WeatherService>,
        selector: EntitySelector,
    ) -> Self {
        let orchestrator = TurnOrchestrator::new(dialogue, weather.clone()).with_selector(selector);

        Self {
            orchestrator: Arc::new(Mutex::new(orchestrator)),
            augmenter: Arc::new(WeatherAugmenter::new(weather)),
            selector,
        }
    }

    /// Run the startup bootstrap turn and return the welcome messages.
    pub async fn bootstrap(&self) -> Vec<String> {
        let mut orchestrator = self.orchestrator.lock().await;
        orchestrator.bootstrap().await.reply_messages
    }
}
