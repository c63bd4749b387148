#![deny(
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

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod weather;

pub use weather::{ForecastDay, TemperatureUnit, WEATHER_DISCLAIMER, WeatherReport};

/// Kind of an entity recognized by the dialogue service.
///
/// Wire names follow the Watson Assistant entity vocabulary; anything the
/// service emits beyond locations and times deserializes as `Other`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum EntityKind {
    Location,
    Time,
    Other,
}

impl From<String> for EntityKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            "sys-location" => Self::Location,
            "Time" => Self::Time,
            _ => Self::Other,
        }
    }
}

impl From<EntityKind> for String {
    fn from(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Location => "sys-location".to_string(),
            EntityKind::Time => "Time".to_string(),
            EntityKind::Other => "other".to_string(),
        }
    }
}

/// A structured fact recognized within one user utterance.
///
/// Entities are produced per turn and consumed once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "entity")]
    pub kind: EntityKind,
    pub value: String,
    #[serde(default)]
    pub confidence: f64,
}

impl Entity {
    #[must_use]
    pub fn new(kind: EntityKind, value: impl Into<String>, confidence: f64) -> Self {
        Self {
            kind,
            value: value.into(),
            confidence,
        }
    }
}

/// Opaque conversation state handle.
///
/// Returned by the dialogue service on every turn and passed back unmodified
/// on the next one. Never inspected or merged, only replaced wholesale.
pub type ConversationContext = serde_json::Value;

/// What the dialogue service returns for one turn.
#[derive(Debug, Clone)]
pub struct DialogueResponse {
    /// Reply texts in arrival order
    pub reply_texts: Vec<String>,
    /// Entities recognized in the user utterance
    pub entities: Vec<Entity>,
    /// New conversation state, replaces the previous token
    pub context: ConversationContext,
}

/// Combined outcome of one conversational turn.
#[derive(Debug, Clone, Default)]
pub struct TurnResult {
    /// Dialogue-originated messages, rendered first
    pub reply_messages: Vec<String>,
    /// Augmentation-originated messages, appended after the reply
    pub weather_messages: Vec<String>,
    /// Structured weather data when a lookup succeeded
    pub weather_report: Option<WeatherReport>,
}

#[async_trait]
pub trait DialogueService: Send + Sync {
    async fn send_message(
        &self,
        text: &str,
        context: Option<&ConversationContext>,
    ) -> anyhow::Result<DialogueResponse>;
}

#[async_trait]
pub trait WeatherService: Send + Sync {
    async fn lookup(&self, location: &str) -> anyhow::Result<WeatherReport>;
}

#[async_trait]
impl<T> DialogueService for std::sync::Arc<T>
where
    T: DialogueService + ?Sized,
{
    async fn send_message(
        &self,
        text: &str,
        context: Option<&ConversationContext>,
    ) -> anyhow::Result<DialogueResponse> {
        (**self).send_message(text, context).await
    }
}

#[async_trait]
impl<T> WeatherService for std::sync::Arc<T>
where
    T: WeatherService + ?Sized,
{
    async fn lookup(&self, location: &str) -> anyhow::Result<WeatherReport> {
        (**self).lookup(location).await
    }
}
