//! Wire types for the HTTP API.

use serde::{Deserialize, Serialize};
use skybot_conversation::Augmentation;
use skybot_core::{ConversationContext, Entity, TurnResult, WeatherReport};

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub context: Option<ConversationContext>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub reply_messages: Vec<String>,
    pub weather_messages: Vec<String>,
    pub weather_report: Option<WeatherReport>,
    /// Token the client passes back on the next turn
    pub context: Option<ConversationContext>,
}

impl MessageResponse {
    #[must_use]
    pub fn from_turn(result: TurnResult, context: Option<ConversationContext>) -> Self {
        Self {
            reply_messages: result.reply_messages,
            weather_messages: result.weather_messages,
            weather_report: result.weather_report,
            context,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct WeatherRequest {
    #[serde(default)]
    pub entities: Vec<Entity>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherResponse {
    pub messages: Vec<String>,
    pub weather_report: Option<WeatherReport>,
}

impl From<Augmentation> for WeatherResponse {
    fn from(augmentation: Augmentation) -> Self {
        Self {
            messages: augmentation.messages,
            weather_report: augmentation.report,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
