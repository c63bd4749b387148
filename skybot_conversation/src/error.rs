use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConversationError>;

#[derive(Debug, Error)]
pub enum ConversationError {
    #[error("dialogue service unavailable: {0}")]
    DialogueUnavailable(#[source] anyhow::Error),

    #[error("weather lookup failed: {0}")]
    WeatherLookupFailed(#[source] anyhow::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}
