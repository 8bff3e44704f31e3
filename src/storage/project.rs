//! Project management
//!
//! Handles project initialization and provides access to stores.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::{AllocationSink, AllocationStore, AvailableOrderStore, CatalogFile, Config};
use crate::domain::{Catalog, Planner, TimeGrid};

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Not in a planner project. Run 'planner init' first.")]
    NotInProject,
}

/// A sprint planning project
pub struct Project {
    root: PathBuf,
    config: Config,
}

impl Project {
    /// Opens an existing project at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let planner_dir = root.join(".planner");

        if !planner_dir.is_dir() {
            return Err(ProjectError::NotInProject.into());
        }

        let config = Config::for_project(&root)?;

        Ok(Self { root, config })
    }

    /// Opens the project at the current directory or a parent
    pub fn open_current() -> Result<Self> {
        let root = Config::find_project_root().ok_or(ProjectError::NotInProject)?;

        Self::open(root)
    }

    /// Initializes a new project at the given path
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let planner_dir = root.join(".planner");

        fs::create_dir_all(&planner_dir).with_context(|| {
            format!(
                "Failed to create .planner directory: {}",
                planner_dir.display()
            )
        })?;

        let config_path = planner_dir.join("config.toml");
        if !config_path.exists() {
            let default_config = r#"# Sprint planner configuration

# First day of week 0 (defaults to today)
# start_date = "2025-01-06"

[grid]
# Number of weeks on the board
total_weeks = 16

# Weeks per sprint
weeks_per_sprint = 2
"#;
            fs::write(&config_path, default_config)
                .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
        }

        let catalog = CatalogFile::for_project(&root);
        if !catalog.path().exists() {
            catalog.write(&Default::default())?;
        }

        Self::open(root)
    }

    /// Returns the project root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the .planner directory path
    pub fn planner_dir(&self) -> PathBuf {
        self.root.join(".planner")
    }

    /// Returns the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns a mutable reference to the configuration
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Returns the board grid from configuration
    pub fn grid(&self) -> Result<TimeGrid> {
        Ok(self.config.project.grid.to_grid()?)
    }

    /// Returns the catalog file
    pub fn catalog_file(&self) -> CatalogFile {
        CatalogFile::for_project(&self.root)
    }

    /// Returns the allocation store
    pub fn allocation_store(&self) -> AllocationStore {
        AllocationStore::for_project(&self.root)
    }

    /// Returns the store for the available list order
    pub fn available_store(&self) -> AvailableOrderStore {
        AvailableOrderStore::for_project(&self.root)
    }

    /// Builds the planner from the catalog and saved board
    pub fn load_planner(&self) -> Result<Planner> {
        let grid = self.grid()?;
        let catalog = self.load_catalog()?;
        let records = self.allocation_store().read_all()?;
        let order = self.available_store().read_all()?;

        Planner::restore(grid, catalog, &records, &order)
            .context("Saved allocations do not fit the board")
    }

    /// Builds an empty board from the catalog, ignoring saved allocations
    ///
    /// Used by `reset`, which has to work even when saved records no longer
    /// fit the catalog or the grid.
    pub fn empty_planner(&self) -> Result<Planner> {
        Ok(Planner::new(self.grid()?, self.load_catalog()?))
    }

    /// Persists the planner's allocations and available order
    pub fn save_planner(&self, planner: &Planner) -> Result<()> {
        self.allocation_store().save(&planner.records())?;
        self.available_store().write_all(&planner.available_order())
    }

    fn load_catalog(&self) -> Result<Catalog> {
        self.catalog_file()
            .read()?
            .into_catalog()
            .context("Invalid catalog")
    }
}
