//! Allocation engine
//!
//! [`Planner`] owns the catalog, the allocation map and the derived
//! occupancy, and is the only way to change them. Every operation validates
//! the whole run before touching any state, so a rejected call leaves the
//! planner exactly as it was.
//!
//! After each successful call:
//! - no two items share a slot in a developer's row
//! - every catalog item is either available or anchored exactly once
//! - occupancy reflects the current allocation map

use thiserror::Error;
use tracing::debug;

use super::allocation::{AllocationError, AllocationMap, AllocationRecord};
use super::catalog::{Catalog, CatalogError};
use super::grid::{Slot, TimeGrid};
use super::id::{DeveloperId, ItemId};
use super::item::Item;
use super::occupancy::{Occupancy, Occupant};
use super::request::{PlacementRequest, Source};

#[derive(Debug, Error, PartialEq)]
pub enum PlacementError {
    #[error("Item {item} needs {needed} week(s) from week {week}, past the {total_weeks}-week horizon")]
    OutOfHorizon {
        item: ItemId,
        week: u32,
        needed: u32,
        total_weeks: u32,
    },

    #[error("Cannot allocate here: {slot} is already taken by {occupant}")]
    SlotConflict { slot: Slot, occupant: ItemId },

    #[error("Item is not allocated: {0}")]
    NotAllocated(ItemId),

    #[error("Item already in the catalog: {0}")]
    DuplicateItem(ItemId),

    #[error("Developer not found: {0}")]
    UnknownDeveloper(DeveloperId),

    #[error("Item not found: {0}")]
    UnknownItem(ItemId),

    #[error("Item is not available for placement: {0}")]
    NotAvailable(ItemId),

    #[error(transparent)]
    Allocation(#[from] AllocationError),

    #[error(transparent)]
    Catalog(CatalogError),
}

impl From<CatalogError> for PlacementError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::DuplicateItem(id) => PlacementError::DuplicateItem(id),
            other => PlacementError::Catalog(other),
        }
    }
}

/// An item as it appears in a developer's row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationView<'a> {
    pub item: &'a Item,
    pub week: u32,
    /// Weeks actually drawn, clipped to the horizon
    pub span_weeks: u32,
}

/// The allocation engine
#[derive(Debug, Clone)]
pub struct Planner {
    grid: TimeGrid,
    catalog: Catalog,
    allocations: AllocationMap,
    occupancy: Occupancy,
}

impl Planner {
    /// Creates an empty board over `catalog`
    pub fn new(grid: TimeGrid, catalog: Catalog) -> Self {
        Self {
            grid,
            catalog,
            allocations: AllocationMap::new(),
            occupancy: Occupancy::default(),
        }
    }

    /// Rebuilds a board from saved records and a saved available order
    ///
    /// Records are replayed in order through [`Planner::place_new`], so a
    /// record that no longer fits the catalog or the grid is rejected with
    /// the same error a live placement would get. The available list then
    /// follows `available_order`; items it does not name (new catalog
    /// entries) stay after the named ones in catalog order.
    pub fn restore(
        grid: TimeGrid,
        catalog: Catalog,
        records: &[AllocationRecord],
        available_order: &[ItemId],
    ) -> Result<Self, PlacementError> {
        let mut planner = Self::new(grid, catalog);
        for record in records {
            planner.place_new(&record.developer_id, record.week_index, &record.item_id)?;
        }
        planner.catalog.reorder_available(available_order);
        debug!(count = records.len(), "restored allocations");
        Ok(planner)
    }

    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Places an available item with its first week at `(developer, week)`
    pub fn place_new(
        &mut self,
        developer: &DeveloperId,
        week: u32,
        item_id: &ItemId,
    ) -> Result<(), PlacementError> {
        self.require_developer(developer)?;

        let item = match self.catalog.available().iter().find(|i| &i.id == item_id) {
            Some(item) => item.clone(),
            None if self.catalog.item(item_id).is_some() => {
                return Err(PlacementError::NotAvailable(item_id.clone()))
            }
            None => return Err(PlacementError::UnknownItem(item_id.clone())),
        };

        let anchor = self.validate_run(developer, week, &item, None)?;

        self.catalog.remove_available(item_id);
        self.allocations.set(anchor.clone(), item)?;
        self.rebuild();

        debug!(item = %item_id, slot = %anchor, "placed item");
        Ok(())
    }

    /// Moves an allocated item so its first week is `(developer, week)`
    ///
    /// The item's current footprint does not block the move. Moving onto
    /// the current anchor succeeds without changes.
    pub fn move_item(
        &mut self,
        item_id: &ItemId,
        developer: &DeveloperId,
        week: u32,
    ) -> Result<(), PlacementError> {
        let from = self
            .allocations
            .find_anchor(item_id)
            .cloned()
            .ok_or_else(|| PlacementError::NotAllocated(item_id.clone()))?;

        if &from.developer == developer && from.week == week {
            debug!(item = %item_id, slot = %from, "move onto own anchor ignored");
            return Ok(());
        }

        self.require_developer(developer)?;

        let item = self
            .allocations
            .get(&from)
            .cloned()
            .ok_or_else(|| PlacementError::NotAllocated(item_id.clone()))?;
        let to = self.validate_run(developer, week, &item, Some(item_id))?;

        self.allocations.remove(&from);
        self.allocations.set(to.clone(), item)?;
        self.rebuild();

        debug!(item = %item_id, from = %from, to = %to, "moved item");
        Ok(())
    }

    /// Takes an item off the board and appends it to the available list
    pub fn return_to_available(&mut self, item_id: &ItemId) -> Result<(), PlacementError> {
        let anchor = self
            .allocations
            .find_anchor(item_id)
            .cloned()
            .ok_or_else(|| PlacementError::NotAllocated(item_id.clone()))?;

        let item = self
            .allocations
            .get(&anchor)
            .cloned()
            .ok_or_else(|| PlacementError::NotAllocated(item_id.clone()))?;

        // Catalog first: a duplicate is rejected before the board changes
        self.catalog.add_available(item)?;
        self.allocations.remove(&anchor);
        self.rebuild();

        debug!(item = %item_id, slot = %anchor, "returned item to available");
        Ok(())
    }

    /// Clears the board and makes every catalog item available again
    pub fn reset_all(&mut self) {
        self.allocations.clear();
        self.occupancy = Occupancy::default();
        self.catalog.restore();
        debug!("board reset");
    }

    /// Applies a placement request, dispatching on where the item lives
    pub fn apply(&mut self, request: &PlacementRequest) -> Result<(), PlacementError> {
        let PlacementRequest {
            item,
            source,
            target,
        } = request;

        match source {
            Source::Available => self.place_new(&target.developer, target.week, item),
            Source::Allocated => self.move_item(item, &target.developer, target.week),
        }
    }

    /// Unallocated items in insertion order
    pub fn available_items(&self) -> &[Item] {
        self.catalog.available()
    }

    /// IDs of the available list, in order
    pub fn available_order(&self) -> Vec<ItemId> {
        self.catalog.available().iter().map(|i| i.id.clone()).collect()
    }

    /// Items anchored in `developer`'s row, ordered by week
    pub fn allocations_for(&self, developer: &DeveloperId) -> Vec<AllocationView<'_>> {
        self.allocations
            .for_developer(developer)
            .map(|(slot, item)| {
                let weeks = self.grid.slots_for(slot.week, item.span());
                AllocationView {
                    item,
                    week: slot.week,
                    span_weeks: weeks.end - weeks.start,
                }
            })
            .collect()
    }

    /// True if `(developer, week)` is on the grid and nothing occupies it
    pub fn is_free(&self, developer: &DeveloperId, week: u32) -> bool {
        self.grid.in_bounds(week)
            && self
                .occupancy
                .is_free(&Slot::new(developer.clone(), week), None)
    }

    pub fn occupant(&self, developer: &DeveloperId, week: u32) -> Option<&Occupant> {
        self.occupancy.occupant(&Slot::new(developer.clone(), week))
    }

    pub fn find_anchor(&self, item_id: &ItemId) -> Option<&Slot> {
        self.allocations.find_anchor(item_id)
    }

    /// Current allocations as persistence records
    pub fn records(&self) -> Vec<AllocationRecord> {
        self.allocations.records()
    }

    /// Number of anchored items
    pub fn allocated_count(&self) -> usize {
        self.allocations.len()
    }

    fn require_developer(&self, developer: &DeveloperId) -> Result<(), PlacementError> {
        if self.catalog.has_developer(developer) {
            Ok(())
        } else {
            Err(PlacementError::UnknownDeveloper(developer.clone()))
        }
    }

    /// Checks that `item` fits from `(developer, week)` and returns the anchor
    fn validate_run(
        &self,
        developer: &DeveloperId,
        week: u32,
        item: &Item,
        excluding: Option<&ItemId>,
    ) -> Result<Slot, PlacementError> {
        let weeks = self.grid.slots_for(week, item.span());
        if weeks.end - weeks.start < item.span() {
            debug!(item = %item.id, week, "rejected: out of horizon");
            return Err(PlacementError::OutOfHorizon {
                item: item.id.clone(),
                week,
                needed: item.span(),
                total_weeks: self.grid.total_weeks(),
            });
        }

        for w in weeks {
            let slot = Slot::new(developer.clone(), w);
            if !self.occupancy.is_free(&slot, excluding) {
                let occupant = self
                    .occupancy
                    .occupant(&slot)
                    .map(|o| o.item_id().clone())
                    .unwrap_or_else(|| item.id.clone());
                debug!(item = %item.id, slot = %slot, occupant = %occupant, "rejected: slot conflict");
                return Err(PlacementError::SlotConflict { slot, occupant });
            }
        }

        Ok(Slot::new(developer.clone(), week))
    }

    fn rebuild(&mut self) {
        self.occupancy = Occupancy::build(&self.allocations, &self.grid);
    }
}
