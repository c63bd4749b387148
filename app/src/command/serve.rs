//! HTTP serving command: wires config, providers and the conversation core.

use std::sync::Arc;

use skybot_config::Config;
use skybot_conversation::EntitySelector;
use skybot_providers::{WatsonProvider, WttrProvider};
use skybot_server::{AppState, create_router};
use tracing::info;

/// Input parameters for the Serve command strategy.
#[derive(Debug, Clone)]
pub struct ServeInput {
    /// Optional host override
    pub host: Option<String>,
    /// Optional port override
    pub port: Option<u16>,
}

/// Strategy for running the bot behind the HTTP API.
#[derive(Debug, Clone, Copy)]
pub struct ServeStrategy;

impl super::CommandStrategy for ServeStrategy {
    type Input = ServeInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        info!("Loaded config from ~/.skybot/config.json");

        let dialogue = Arc::new(
            WatsonProvider::new(
                config.watson.username.clone(),
                config.watson.password.clone(),
                config.watson.workspace_id.clone(),
            )
            .with_base_url(config.watson.url.clone())
            .with_version(config.watson.version.clone()),
        );

        let weather = Arc::new(
            WttrProvider::new()
                .with_base_url(config.weather.url.clone())
                .with_units(config.weather.units),
        );

        let selector = EntitySelector::default()
            .with_confidence_floor(config.conversation.entity_confidence_floor);

        let state = AppState::new(dialogue, weather, selector);

        // One bootstrap turn at startup elicits the welcome reply.
        for message in state.bootstrap().await {
            info!("Welcome: {message}");
        }

        let router = create_router(state, &config.server.public_dir);

        let host = input.host.unwrap_or(config.server.host);
        let port = input.port.unwrap_or(config.server.port);
        let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
        info!("Server listening on {host}:{port}");

        axum::serve(listener, router).await?;

        Ok(())
    }
}
