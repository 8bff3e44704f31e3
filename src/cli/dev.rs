//! Developer CLI commands

use anyhow::Result;
use chrono::Utc;
use clap::Subcommand;
use tracing::debug;

use super::output::Output;
use crate::domain::{Developer, DeveloperId};
use crate::storage::Project;

#[derive(Subcommand)]
pub enum DevCommands {
    /// Add a developer to the catalog
    ///
    /// Examples:
    ///   planner dev add "Maria Oliveira" --id dev-2 --skill Backend
    ///   planner dev add "Pedro Costa"          # generated d-xxxxxxx ID
    Add {
        /// Display name
        name: String,

        /// Developer ID (generated when omitted)
        #[arg(long)]
        id: Option<String>,

        /// Skill tag (repeatable)
        #[arg(long = "skill")]
        skills: Vec<String>,
    },

    /// List developers
    List,
}

pub fn run(cmd: DevCommands, output: &Output) -> Result<()> {
    match cmd {
        DevCommands::Add { name, id, skills } => add_developer(output, &name, id.as_deref(), skills),
        DevCommands::List => list_developers(output),
    }
}

fn add_developer(output: &Output, name: &str, id: Option<&str>, skills: Vec<String>) -> Result<()> {
    let project = Project::open_current()?;

    let id = match id {
        Some(id) => id.parse::<DeveloperId>()?,
        None => DeveloperId::generate(name, Utc::now()),
    };
    let developer = Developer::new(id, name).with_skills(skills);

    debug!(id = %developer.id, "adding developer");
    project.catalog_file().add_developer(developer.clone())?;

    if output.is_json() {
        output.data(&developer);
    } else {
        output.success(&format!("Added developer: {} - {}", developer.id, developer.name));
    }

    Ok(())
}

fn list_developers(output: &Output) -> Result<()> {
    let project = Project::open_current()?;
    let planner = project.load_planner()?;
    let developers = planner.catalog().developers();

    if output.is_json() {
        let items: Vec<_> = developers
            .iter()
            .map(|d| {
                serde_json::json!({
                    "id": d.id,
                    "name": d.name,
                    "skills": d.skills,
                    "allocated": planner.allocations_for(&d.id).len(),
                })
            })
            .collect();
        output.data(&items);
    } else if developers.is_empty() {
        println!("No developers. Add one with 'planner dev add <name>'.");
    } else {
        output.table_header(&format!("{:<14} {:<24} {:<10} SKILLS", "ID", "NAME", "ITEMS"), 70);
        for dev in developers {
            println!(
                "{:<14} {:<24} {:<10} {}",
                dev.id,
                dev.name,
                planner.allocations_for(&dev.id).len(),
                dev.skills.join(", ")
            );
        }
    }

    Ok(())
}
