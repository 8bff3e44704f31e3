//! Occupancy resolver
//!
//! Derives, for every slot, which item occupies it: either as its anchor or
//! because a multi-week item anchored earlier in the same row extends over
//! it. The view is rebuilt from the whole [`AllocationMap`] after every
//! change rather than patched in place.

use std::collections::HashMap;

use super::allocation::AllocationMap;
use super::grid::{Slot, TimeGrid};
use super::id::ItemId;

/// What holds a slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Occupant {
    /// The slot is the item's first week
    Anchor(ItemId),
    /// The slot is a later week of an item anchored at `anchor`
    Covered { item: ItemId, anchor: Slot },
}

impl Occupant {
    pub fn item_id(&self) -> &ItemId {
        match self {
            Occupant::Anchor(id) => id,
            Occupant::Covered { item, .. } => item,
        }
    }

    pub fn is_anchor(&self) -> bool {
        matches!(self, Occupant::Anchor(_))
    }
}

/// Slot → occupant, derived from an allocation map
#[derive(Debug, Clone, Default)]
pub struct Occupancy {
    cells: HashMap<Slot, Occupant>,
}

impl Occupancy {
    /// Builds the occupancy view for `map` on `grid`
    pub fn build(map: &AllocationMap, grid: &TimeGrid) -> Self {
        let mut cells = HashMap::new();

        for (anchor, item) in map.iter() {
            cells.insert(anchor.clone(), Occupant::Anchor(item.id.clone()));
        }

        for (anchor, item) in map.iter() {
            for week in grid.slots_for(anchor.week, item.span()).skip(1) {
                let slot = Slot::new(anchor.developer.clone(), week);
                // Anchors win over coverage; validated maps never collide
                cells.entry(slot).or_insert_with(|| Occupant::Covered {
                    item: item.id.clone(),
                    anchor: anchor.clone(),
                });
            }
        }

        Self { cells }
    }

    pub fn occupant(&self, slot: &Slot) -> Option<&Occupant> {
        self.cells.get(slot)
    }

    /// True if `slot` is `id`'s own anchor or one of its covered weeks
    pub fn is_anchor_or_covered(&self, slot: &Slot, id: &ItemId) -> bool {
        self.cells
            .get(slot)
            .is_some_and(|occupant| occupant.item_id() == id)
    }

    /// True if nothing occupies `slot`, or only the item `excluding`
    pub fn is_free(&self, slot: &Slot, excluding: Option<&ItemId>) -> bool {
        match self.cells.get(slot) {
            None => true,
            Some(occupant) => excluding == Some(occupant.item_id()),
        }
    }

    /// Number of occupied slots, anchors included
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
