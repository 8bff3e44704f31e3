//! Allocation map
//!
//! Maps an anchor slot (the first week of an item) to the item placed there.
//! Only anchors are stored; the weeks an item extends over are derived by
//! [`Occupancy`](super::Occupancy).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::grid::Slot;
use super::id::{DeveloperId, ItemId};
use super::item::Item;

#[derive(Debug, Error, PartialEq)]
pub enum AllocationError {
    #[error("Slot {slot} already anchors {existing}")]
    SlotOccupied { slot: Slot, existing: ItemId },
}

/// Anchor slot → item
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AllocationMap {
    anchors: BTreeMap<Slot, Item>,
}

impl AllocationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes an anchor without checking coverage
    ///
    /// Callers validate the run first. Writing a different item onto an
    /// existing anchor is a contract violation and is refused.
    pub fn set(&mut self, slot: Slot, item: Item) -> Result<(), AllocationError> {
        if let Some(existing) = self.anchors.get(&slot) {
            if existing.id != item.id {
                return Err(AllocationError::SlotOccupied {
                    slot,
                    existing: existing.id.clone(),
                });
            }
        }
        self.anchors.insert(slot, item);
        Ok(())
    }

    /// Removes the anchor at `slot`, if any
    pub fn remove(&mut self, slot: &Slot) -> Option<Item> {
        self.anchors.remove(slot)
    }

    pub fn get(&self, slot: &Slot) -> Option<&Item> {
        self.anchors.get(slot)
    }

    /// Finds the anchor slot of an item (linear scan)
    pub fn find_anchor(&self, id: &ItemId) -> Option<&Slot> {
        self.anchors
            .iter()
            .find(|(_, item)| &item.id == id)
            .map(|(slot, _)| slot)
    }

    /// All anchors ordered by developer, then week
    pub fn iter(&self) -> impl Iterator<Item = (&Slot, &Item)> {
        self.anchors.iter()
    }

    /// Anchors for one developer ordered by week
    pub fn for_developer(
        &self,
        developer: &DeveloperId,
    ) -> impl Iterator<Item = (&Slot, &Item)> + '_ {
        let developer = developer.clone();
        self.anchors
            .iter()
            .filter(move |(slot, _)| slot.developer == developer)
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    pub fn clear(&mut self) {
        self.anchors.clear();
    }

    /// Flattens the map into persistence records
    pub fn records(&self) -> Vec<AllocationRecord> {
        self.anchors
            .iter()
            .map(|(slot, item)| AllocationRecord {
                developer_id: slot.developer.clone(),
                item_id: item.id.clone(),
                week_index: slot.week,
            })
            .collect()
    }
}

/// One saved allocation: `item_id` starts at `week_index` for `developer_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRecord {
    pub developer_id: DeveloperId,
    pub item_id: ItemId,
    pub week_index: u32,
}
