//! Storage for the conversation context token.

use chrono::{DateTime, Utc};
use skybot_core::ConversationContext;

/// Single mutable slot holding the most recent context token.
///
/// The token is replaced wholesale after every successful turn and never
/// inspected or merged. No history, no expiry, no internal locking:
/// concurrent turns for the same conversation must be serialized by the
/// caller.
#[derive(Debug, Clone, Default)]
pub struct ContextStore {
    slot: Option<ConversationContext>,
    updated_at: Option<DateTime<Utc>>,
}

impl ContextStore {
    /// Create an empty store, as at the start of a conversation.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: None,
            updated_at: None,
        }
    }

    /// The token from the last successful turn, if any.
    #[must_use]
    pub const fn get(&self) -> Option<&ConversationContext> {
        self.slot.as_ref()
    }

    /// Replace the stored token.
    pub fn set(&mut self, context: ConversationContext) {
        self.slot = Some(context);
        self.updated_at = Some(Utc::now());
    }

    /// Drop the stored token, returning the store to its initial state.
    pub fn clear(&mut self) {
        self.slot = None;
        self.updated_at = None;
    }

    /// When the slot was last replaced.
    #[must_use]
    pub const fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Whether a token is currently held.
    #[must_use]
    pub const fn has_context(&self) -> bool {
        self.slot.is_some()
    }
}
