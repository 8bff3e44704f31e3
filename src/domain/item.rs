//! Work item domain model
//!
//! Items are the multi-week projects placed on the board. An item occupies
//! `estimated_weeks` contiguous week slots starting at its anchor.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use super::id::ItemId;

/// A work item (project) that can be allocated to a developer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier
    pub id: ItemId,

    /// Human-readable title
    pub title: String,

    /// Number of contiguous weeks the item occupies
    pub estimated_weeks: NonZeroU32,

    /// Display color (e.g. `#3f51b5`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Item {
    /// Creates a new item with the given span
    pub fn new(id: ItemId, title: impl Into<String>, estimated_weeks: NonZeroU32) -> Self {
        Self {
            id,
            title: title.into(),
            estimated_weeks,
            color: None,
        }
    }

    /// Sets the display color
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Returns the span in weeks
    pub fn span(&self) -> u32 {
        self.estimated_weeks.get()
    }
}
