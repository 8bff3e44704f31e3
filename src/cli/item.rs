//! Work item CLI commands

use std::num::NonZeroU32;

use anyhow::Result;
use chrono::Utc;
use clap::Subcommand;
use tracing::debug;

use super::output::Output;
use crate::domain::{Item, ItemId};
use crate::storage::Project;

#[derive(Subcommand)]
pub enum ItemCommands {
    /// Add a work item to the catalog
    ///
    /// Examples:
    ///   planner item add "Payment Gateway" --weeks 2 --id proj-6
    ///   planner item add "Security Audit" -w 2 --color "#607d8b"
    Add {
        /// Item title
        title: String,

        /// Estimated duration in weeks
        #[arg(long, short = 'w')]
        weeks: NonZeroU32,

        /// Item ID (generated when omitted)
        #[arg(long)]
        id: Option<String>,

        /// Display color
        #[arg(long)]
        color: Option<String>,
    },

    /// List work items and where they are allocated
    List {
        /// Show only items not on the board
        #[arg(long)]
        available: bool,
    },
}

pub fn run(cmd: ItemCommands, output: &Output) -> Result<()> {
    match cmd {
        ItemCommands::Add {
            title,
            weeks,
            id,
            color,
        } => add_item(output, &title, weeks, id.as_deref(), color),
        ItemCommands::List { available } => list_items(output, available),
    }
}

fn add_item(
    output: &Output,
    title: &str,
    weeks: NonZeroU32,
    id: Option<&str>,
    color: Option<String>,
) -> Result<()> {
    let project = Project::open_current()?;

    let id = match id {
        Some(id) => id.parse::<ItemId>()?,
        None => ItemId::generate(title, Utc::now()),
    };
    let mut item = Item::new(id, title, weeks);
    item.color = color;

    debug!(id = %item.id, weeks = item.span(), "adding item");
    project.catalog_file().add_item(item.clone())?;

    if output.is_json() {
        output.data(&item);
    } else {
        output.success(&format!(
            "Added item: {} - {} ({} weeks)",
            item.id,
            item.title,
            item.span()
        ));
    }

    Ok(())
}

fn list_items(output: &Output, available_only: bool) -> Result<()> {
    let project = Project::open_current()?;
    let planner = project.load_planner()?;

    let items: Vec<_> = if available_only {
        planner.available_items().iter().collect()
    } else {
        planner.catalog().items().iter().collect()
    };
    debug!(count = items.len(), available_only, "listing items");

    if output.is_json() {
        let rows: Vec<_> = items
            .iter()
            .map(|item| {
                let anchor = planner.find_anchor(&item.id);
                serde_json::json!({
                    "id": item.id,
                    "title": item.title,
                    "estimated_weeks": item.span(),
                    "color": item.color,
                    "developer": anchor.map(|s| s.developer.to_string()),
                    "week": anchor.map(|s| s.week),
                })
            })
            .collect();
        output.data(&rows);
    } else if items.is_empty() {
        println!("No items.");
    } else {
        output.table_header(&format!("{:<14} {:<28} {:<6} ALLOCATION", "ID", "TITLE", "WEEKS"), 70);
        for item in items {
            let allocation = match planner.find_anchor(&item.id) {
                Some(slot) => slot.to_string(),
                None => "available".to_string(),
            };
            println!(
                "{:<14} {:<28} {:<6} {}",
                item.id,
                item.title,
                item.span(),
                allocation
            );
        }
    }

    Ok(())
}
