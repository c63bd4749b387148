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

//! Turn orchestration and entity-driven weather augmentation.
//!
//! This crate holds the decision logic of the bot: how conversational
//! context is threaded across turns, when a weather lookup is attempted,
//! which entities win when several are recognized, and how the final
//! multi-part reply is composed.
//!
//! # Key Features
//! - Context token threading with last-known-good semantics
//! - Last-wins location/time entity selection
//! - Weather augmentation isolated from the dialogue reply
//! - All collaborator failures recovered into fixed apology messages

mod augment;
mod context;
mod error;
mod orchestrator;
mod selector;

pub use augment::{Augmentation, WeatherAugmenter, time_advisory};
pub use context::ContextStore;
pub use error::{ConversationError, Result};
pub use orchestrator::{DIALOGUE_APOLOGY, TurnOrchestrator, WEATHER_APOLOGY};
pub use selector::{EntitySelector, SelectedEntities};
