use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use skybot_core::{ConversationContext, DialogueResponse, DialogueService, Entity};
use tracing::info;

use crate::retry::retry_with_backoff;

/// Client for the Watson Assistant (Conversation V1) message endpoint.
pub struct WatsonProvider {
    client: Client,
    username: String,
    password: String,
    workspace_id: String,
    base_url: String,
    version: String,
}

impl WatsonProvider {
    pub fn new(username: String, password: String, workspace_id: String) -> Self {
        info!("Creating WatsonProvider for workspace {workspace_id}");
        Self {
            client: Client::new(),
            username,
            password,
            workspace_id,
            base_url: "https://gateway.watsonplatform.net/conversation/api".to_string(),
            version: "2017-05-26".to_string(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: String) -> Self {
        self.version = version;
        self
    }

    /// Helper method to send a single request
    async fn try_send(&self, request: &serde_json::Value) -> anyhow::Result<DialogueResponse> {
        let response = self
            .client
            .post(format!(
                "{}/v1/workspaces/{}/message",
                self.base_url, self.workspace_id
            ))
            .query(&[("version", self.version.as_str())])
            .basic_auth(&self.username, Some(&self.password))
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await?;

        Self::parse_response(&response)
    }

    /// Pull reply texts, entities and the new context out of a message
    /// response. Entities the service emits in shapes we don't know are
    /// skipped rather than failing the turn.
    fn parse_response(response: &serde_json::Value) -> anyhow::Result<DialogueResponse> {
        let reply_texts = response["output"]["text"]
            .as_array()
            .ok_or_else(|| anyhow::anyhow!("Invalid response format: missing output.text"))?
            .iter()
            .filter_map(|v| v.as_str().map(ToString::to_string))
            .collect();

        let entities = response["entities"].as_array().map_or_else(Vec::new, |values| {
            values
                .iter()
                .filter_map(|v| serde_json::from_value::<Entity>(v.clone()).ok())
                .collect()
        });

        let context = response
            .get("context")
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Invalid response format: missing context"))?;

        Ok(DialogueResponse {
            reply_texts,
            entities,
            context,
        })
    }
}

#[async_trait]
impl DialogueService for WatsonProvider {
    async fn send_message(
        &self,
        text: &str,
        context: Option<&ConversationContext>,
    ) -> anyhow::Result<DialogueResponse> {
        let mut request = json!({
            "input": { "text": text },
        });
        if let Some(ctx) = context {
            request["context"] = ctx.clone();
        }

        info!("Sending message to Watson workspace {}", self.workspace_id);

        let response = retry_with_backoff(|| self.try_send(&request), &[2, 4, 8]).await?;

        info!(
            "Received Watson reply: {} texts, {} entities",
            response.reply_texts.len(),
            response.entities.len()
        );
        Ok(response)
    }
}
