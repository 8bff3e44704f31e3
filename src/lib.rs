//! Sprint Planner - allocate multi-week projects to developers
//!
//! The board is a fixed horizon of weeks grouped into sprints. Each project
//! is anchored at its first week in one developer's row and extends over
//! the following weeks of its estimate. The [`Planner`] engine validates
//! every placement so no two projects ever overlap.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{Developer, DeveloperId, Item, ItemId, PlacementError, Planner, Slot, TimeGrid};
