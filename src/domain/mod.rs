//! Domain models for the sprint planner
//!
//! Contains the allocation engine and its building blocks without any I/O
//! concerns.

mod id;
mod developer;
mod item;
mod grid;
mod catalog;
mod allocation;
mod occupancy;
mod request;
mod planner;

pub use id::{DeveloperId, ItemId, IdError};
pub use developer::Developer;
pub use item::Item;
pub use grid::{GridError, Slot, TimeGrid, WeekPeriod};
pub use catalog::{Catalog, CatalogError};
pub use allocation::{AllocationError, AllocationMap, AllocationRecord};
pub use occupancy::{Occupancy, Occupant};
pub use request::{PlacementRequest, Source};
pub use planner::{AllocationView, PlacementError, Planner};
