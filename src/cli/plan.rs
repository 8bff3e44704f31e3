//! Board commands (place, move, unassign, reset)
//!
//! Each command loads the board, applies one engine operation and saves the
//! resulting allocation set. A rejected operation saves nothing.

use anyhow::{Context, Result};
use tracing::{debug, warn};

use super::output::Output;
use crate::domain::{ItemId, PlacementRequest, Planner};
use crate::storage::Project;

/// Place an available item on the board
pub fn place(output: &Output, item: &str, dev: &str, week: u32) -> Result<()> {
    let request = PlacementRequest::from_available(item.parse()?, dev.parse()?, week);
    apply(output, &request)
}

/// Move an allocated item to another slot
pub fn move_item(output: &Output, item: &str, dev: &str, week: u32) -> Result<()> {
    let request = PlacementRequest::from_allocated(item.parse()?, dev.parse()?, week);
    apply(output, &request)
}

fn apply(output: &Output, request: &PlacementRequest) -> Result<()> {
    let project = Project::open_current()?;
    let mut planner = project.load_planner()?;
    debug!(?request, "applying placement request");

    planner.apply(request)?;
    save(&project, &planner)?;

    let span = planner
        .allocations_for(&request.target.developer)
        .into_iter()
        .find(|view| view.item.id == request.item)
        .map(|view| view.span_weeks)
        .unwrap_or_default();

    if output.is_json() {
        output.data(&serde_json::json!({
            "item": request.item,
            "developer": request.target.developer,
            "week": request.target.week,
            "span_weeks": span,
        }));
    } else {
        output.success(&format!(
            "Allocated {} to {} from week {} ({} weeks)",
            request.item, request.target.developer, request.target.week, span
        ));
    }

    Ok(())
}

/// Take an item off the board
pub fn unassign(output: &Output, item: &str) -> Result<()> {
    let item_id: ItemId = item.parse()?;
    let project = Project::open_current()?;
    let mut planner = project.load_planner()?;

    planner.return_to_available(&item_id)?;
    save(&project, &planner)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "item": item_id,
            "available": planner.available_items().len(),
        }));
    } else {
        output.success(&format!("Returned {} to available items", item_id));
    }

    Ok(())
}

/// Clear the board
///
/// Saved allocations are not replayed, so a board whose records no longer
/// fit the catalog or the grid can still be reset.
pub fn reset(output: &Output) -> Result<()> {
    let project = Project::open_current()?;
    let cleared = match project.allocation_store().read_all() {
        Ok(records) => records.len(),
        Err(err) => {
            warn!("discarding unreadable allocations: {:#}", err);
            0
        }
    };

    let mut planner = project.empty_planner()?;
    planner.reset_all();
    save(&project, &planner)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "cleared": cleared,
            "available": planner.available_items().len(),
        }));
    } else {
        output.success(&format!("Board reset: {} allocation(s) cleared", cleared));
    }

    Ok(())
}

fn save(project: &Project, planner: &Planner) -> Result<()> {
    debug!(count = planner.allocated_count(), "saving allocations");
    project
        .save_planner(planner)
        .context("Change was valid but could not be saved; the board on disk is unchanged")
}

