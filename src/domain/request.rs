//! Placement requests
//!
//! A request is the intent "put this item at this slot", independent of how
//! it was produced (drag-and-drop, keyboard, command line). The `source`
//! says whether the item comes from the available list or is already on the
//! board.

use serde::{Deserialize, Serialize};

use super::grid::Slot;
use super::id::{DeveloperId, ItemId};

/// Where the requested item currently lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Available,
    Allocated,
}

/// A request to anchor an item at a slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRequest {
    pub item: ItemId,
    pub source: Source,
    pub target: Slot,
}

impl PlacementRequest {
    /// Place an available item onto the board
    pub fn from_available(item: ItemId, developer: DeveloperId, week: u32) -> Self {
        Self {
            item,
            source: Source::Available,
            target: Slot::new(developer, week),
        }
    }

    /// Move an item that is already on the board
    pub fn from_allocated(item: ItemId, developer: DeveloperId, week: u32) -> Self {
        Self {
            item,
            source: Source::Allocated,
            target: Slot::new(developer, week),
        }
    }
}
