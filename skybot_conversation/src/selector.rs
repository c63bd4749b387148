//! Entity selection policy for one conversational turn.

use skybot_core::{Entity, EntityKind};

/// Location/time pair picked out of a turn's recognized entities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedEntities {
    pub location: Option<String>,
    pub time: Option<String>,
}

impl SelectedEntities {
    /// True when neither a location nor a time was selected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.location.is_none() && self.time.is_none()
    }
}

/// Picks the most relevant location and time entities out of a turn.
///
/// The scan is last-wins per kind: the service may re-emit an entity later
/// in the list with refined confidence, so the last acceptable one
/// approximates "most specific".
#[derive(Debug, Clone, Copy)]
pub struct EntitySelector {
    confidence_floor: f64,
}

impl Default for EntitySelector {
    fn default() -> Self {
        // Inclusive floor of 0.0 accepts every recognized entity. Stricter
        // deployments raise this through the config file.
        Self {
            confidence_floor: 0.0,
        }
    }
}

impl EntitySelector {
    /// Set the minimum confidence an entity needs to be considered.
    #[must_use]
    pub const fn with_confidence_floor(mut self, floor: f64) -> Self {
        self.confidence_floor = floor;
        self
    }

    /// Scan all entities; per kind, the last one at or above the confidence
    /// floor wins. No matches yield `None` for that field. Never fails.
    #[must_use]
    pub fn select(&self, entities: &[Entity]) -> SelectedEntities {
        let mut selected = SelectedEntities::default();

        for entity in entities {
            if entity.confidence < self.confidence_floor {
                continue;
            }

            match entity.kind {
                EntityKind::Location => selected.location = Some(entity.value.clone()),
                EntityKind::Time => selected.time = Some(entity.value.clone()),
                EntityKind::Other => {}
            }
        }

        selected
    }
}
