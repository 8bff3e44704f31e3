//! Query commands (board, free, sprints)

use anyhow::Result;
use tracing::debug;

use super::output::Output;
use crate::domain::{DeveloperId, Occupant, Planner};
use crate::storage::Project;

/// Show allocations per developer plus the available items
pub fn board(output: &Output, dev_filter: Option<&str>) -> Result<()> {
    let project = Project::open_current()?;
    let planner = project.load_planner()?;

    let filter = dev_filter.map(str::parse::<DeveloperId>).transpose()?;
    if let Some(id) = &filter {
        require_developer(&planner, id)?;
    }

    let developers: Vec<_> = planner
        .catalog()
        .developers()
        .iter()
        .filter(|d| filter.as_ref().map_or(true, |id| &d.id == id))
        .collect();
    debug!(rows = developers.len(), "rendering board");

    if output.is_json() {
        let rows: Vec<_> = developers
            .iter()
            .map(|d| {
                let allocations: Vec<_> = planner
                    .allocations_for(&d.id)
                    .iter()
                    .map(|view| {
                        serde_json::json!({
                            "item_id": view.item.id,
                            "title": view.item.title,
                            "week": view.week,
                            "span_weeks": view.span_weeks,
                            "sprint": planner.grid().sprint_of(view.week),
                        })
                    })
                    .collect();
                serde_json::json!({
                    "id": d.id,
                    "name": d.name,
                    "allocations": allocations,
                })
            })
            .collect();
        let available: Vec<_> = planner.available_items().iter().map(|i| &i.id).collect();

        output.data(&serde_json::json!({
            "total_weeks": planner.grid().total_weeks(),
            "developers": rows,
            "available": available,
        }));
        return Ok(());
    }

    if developers.is_empty() {
        println!("No developers. Add one with 'planner dev add <name>'.");
        return Ok(());
    }

    for dev in developers {
        println!("{} ({})", dev.name, dev.id);
        let row = planner.allocations_for(&dev.id);
        if row.is_empty() {
            println!("  (no allocations)");
        }
        for view in row {
            let last = view.week + view.span_weeks - 1;
            println!(
                "  W{:<2}-W{:<2}  {:<14} {}",
                view.week, last, view.item.id, view.item.title
            );
        }
    }

    println!();
    let available = planner.available_items();
    if available.is_empty() {
        println!("All items allocated.");
    } else {
        println!("Available ({}):", available.len());
        for item in available {
            println!("  {:<14} {} ({}w)", item.id, item.title, item.span());
        }
    }

    Ok(())
}

/// Report whether a developer's week is free
pub fn free(output: &Output, dev: &str, week: u32) -> Result<()> {
    let project = Project::open_current()?;
    let planner = project.load_planner()?;
    let developer: DeveloperId = dev.parse()?;
    require_developer(&planner, &developer)?;

    let total = planner.grid().total_weeks();
    if !planner.grid().in_bounds(week) {
        anyhow::bail!("Week {} is outside the {}-week board", week, total);
    }

    let free = planner.is_free(&developer, week);
    let occupant = planner.occupant(&developer, week);

    if output.is_json() {
        output.data(&serde_json::json!({
            "developer": developer,
            "week": week,
            "free": free,
            "occupant": occupant.map(|o| o.item_id()),
        }));
    } else {
        match occupant {
            None => println!("{} week {} is free", developer, week),
            Some(Occupant::Anchor(item)) => {
                println!("{} week {} is taken: {} starts here", developer, week, item)
            }
            Some(Occupant::Covered { item, anchor }) => println!(
                "{} week {} is taken: {} (started week {})",
                developer, week, item, anchor.week
            ),
        }
    }

    Ok(())
}

/// List sprints with their weeks and calendar periods
pub fn sprints(output: &Output) -> Result<()> {
    let project = Project::open_current()?;
    let grid = project.grid()?;
    let start = project.config().project.start_date_or_today();

    let mut rows = Vec::new();
    for sprint in 0..grid.total_sprints() {
        let Some(weeks) = grid.sprint_weeks(sprint) else {
            continue;
        };
        let periods: Vec<_> = weeks
            .clone()
            .filter_map(|w| grid.week_period(start, w).map(|p| (w, p)))
            .collect();
        rows.push((sprint, periods));
    }

    if output.is_json() {
        let items: Vec<_> = rows
            .iter()
            .map(|(sprint, periods)| {
                let weeks: Vec<_> = periods
                    .iter()
                    .map(|(week, period)| {
                        serde_json::json!({
                            "week": week,
                            "start": period.first.to_string(),
                            "end": period.last.to_string(),
                            "label": period.to_string(),
                        })
                    })
                    .collect();
                serde_json::json!({
                    "sprint": sprint + 1,
                    "weeks": weeks,
                })
            })
            .collect();
        output.data(&items);
    } else {
        for (sprint, periods) in rows {
            println!("Sprint {}", sprint + 1);
            for (week, period) in periods {
                println!("  W{:<2} {}", week, period);
            }
        }
    }

    Ok(())
}

fn require_developer(planner: &Planner, id: &DeveloperId) -> Result<()> {
    if planner.catalog().has_developer(id) {
        Ok(())
    } else {
        anyhow::bail!("Developer not found: {}", id)
    }
}
