//! Weather augmentation of a dialogue reply.

use std::sync::Arc;

use skybot_core::{WeatherReport, WeatherService};
use tracing::{debug, info};

use crate::error::{ConversationError, Result};

/// Advisory used when the user asked about weather at a point in time.
#[must_use]
pub fn time_advisory(location: &str) -> String {
    format!(
        "Sorry, I don't know how to work with time yet. But, here's the weather for {location}!"
    )
}

/// Messages plus report-or-null produced by one augmentation attempt.
#[derive(Debug, Clone, Default)]
pub struct Augmentation {
    pub messages: Vec<String>,
    pub report: Option<WeatherReport>,
}

/// Decides whether and how to enrich a reply with a weather lookup.
pub struct WeatherAugmenter<W = Arc<dyn WeatherService>>
where
    W: Send + Sync,
{
    weather: W,
}

impl<W> WeatherAugmenter<W>
where
    W: WeatherService + Send + Sync,
{
    pub const fn new(weather: W) -> Self {
        Self { weather }
    }

    /// Apply the augmentation rules, in order:
    ///
    /// 1. Both location and time present: prepend the fixed time advisory,
    ///    then still answer for the location.
    /// 2. Location present: look the location up; a failed lookup surfaces
    ///    as [`ConversationError::WeatherLookupFailed`] for the caller to
    ///    word. Time alone is never acted upon.
    /// 3. No location: nothing to do, no message, no lookup.
    pub async fn augment(
        &self,
        location: Option<&str>,
        time: Option<&str>,
    ) -> Result<Augmentation> {
        let mut augmentation = Augmentation::default();

        let Some(location) = location else {
            debug!("No location entity recognized, skipping weather lookup");
            return Ok(augmentation);
        };

        if time.is_some() {
            augmentation.messages.push(time_advisory(location));
        }

        info!("Looking up weather for {location}");
        let report = self
            .weather
            .lookup(location)
            .await
            .map_err(ConversationError::WeatherLookupFailed)?;

        augmentation.report = Some(report);
        Ok(augmentation)
    }
}
