//! Main CLI application structure

use std::io::IsTerminal;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use super::output::{Output, OutputFormat};
use super::{dev, item, plan, query};
use crate::storage::{Config, Project};

#[derive(Parser)]
#[command(name = "planner")]
#[command(author, version, about = "Allocate multi-week projects to developers across sprints")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the global config, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new planner project
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,

        /// Number of weeks on the board
        #[arg(long)]
        weeks: Option<u32>,

        /// Weeks per sprint
        #[arg(long)]
        sprint_weeks: Option<u32>,

        /// First day of week 0 (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,
    },

    /// Manage developers
    #[command(subcommand)]
    Dev(dev::DevCommands),

    /// Manage work items
    #[command(subcommand)]
    Item(item::ItemCommands),

    /// Place an available item on the board
    Place {
        /// Item ID
        item: String,

        /// Developer ID
        dev: String,

        /// First week (0-based)
        week: u32,
    },

    /// Move an allocated item to another slot
    Move {
        /// Item ID
        item: String,

        /// Developer ID
        dev: String,

        /// New first week (0-based)
        week: u32,
    },

    /// Take an item off the board and make it available again
    Unassign {
        /// Item ID
        item: String,
    },

    /// Clear the board and make every item available
    Reset,

    /// Show allocations per developer
    Board {
        /// Only show this developer
        #[arg(long)]
        dev: Option<String>,
    },

    /// Check whether a slot is free
    Free {
        /// Developer ID
        dev: String,

        /// Week (0-based)
        week: u32,
    },

    /// Show sprints and their calendar weeks
    Sprints,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let format = match cli.format {
        Some(format) => format,
        None => Config::load_global()?.default_format.into(),
    };
    let output = Output::new(format);
    debug!(?format, "planner starting");

    match cli.command {
        Commands::Init {
            path,
            weeks,
            sprint_weeks,
            start,
        } => {
            debug!(%path, "initializing project");
            init(&output, &path, weeks, sprint_weeks, start)?
        }

        Commands::Dev(cmd) => dev::run(cmd, &output)?,
        Commands::Item(cmd) => item::run(cmd, &output)?,

        Commands::Place { item, dev, week } => plan::place(&output, &item, &dev, week)?,
        Commands::Move { item, dev, week } => plan::move_item(&output, &item, &dev, week)?,
        Commands::Unassign { item } => plan::unassign(&output, &item)?,
        Commands::Reset => plan::reset(&output)?,

        Commands::Board { dev } => query::board(&output, dev.as_deref())?,
        Commands::Free { dev, week } => query::free(&output, &dev, week)?,
        Commands::Sprints => query::sprints(&output)?,
    }

    Ok(())
}

/// Routes engine diagnostics to stderr; `RUST_LOG` overrides the level
fn init_tracing(verbose: bool) {
    let default = if verbose { "sprint_planner=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // try_init: a subscriber may already be installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}

fn init(
    output: &Output,
    path: &str,
    weeks: Option<u32>,
    sprint_weeks: Option<u32>,
    start: Option<NaiveDate>,
) -> Result<()> {
    // Checked before anything is written, so a bad size leaves no project behind
    let mut settings = Config::for_project(Path::new(path))?.project;
    if let Some(weeks) = weeks {
        settings.grid.total_weeks = weeks;
    }
    if let Some(sprint_weeks) = sprint_weeks {
        settings.grid.weeks_per_sprint = sprint_weeks;
    }
    if start.is_some() {
        settings.start_date = start;
    }
    settings.grid.to_grid().context("Invalid board size")?;

    let mut project = Project::init(path)?;
    debug!(dir = %project.planner_dir().display(), "created .planner directory");

    if weeks.is_some() || sprint_weeks.is_some() || start.is_some() {
        let config = project.config_mut();
        config.project = settings;
        config.save_project()?;
    }

    let grid = project.grid()?;
    if output.is_json() {
        output.data(&serde_json::json!({
            "root": project.root().display().to_string(),
            "total_weeks": grid.total_weeks(),
            "weeks_per_sprint": grid.weeks_per_sprint(),
            "total_sprints": grid.total_sprints(),
        }));
    } else {
        output.success(&format!(
            "Initialized planner project at {} ({} weeks, {} sprints)",
            project.root().display(),
            grid.total_weeks(),
            grid.total_sprints()
        ));
    }

    Ok(())
}
