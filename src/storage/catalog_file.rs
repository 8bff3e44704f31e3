//! YAML storage for the developer and item catalog
//!
//! The catalog lives in `.planner/catalog.yaml`:
//!
//! ```yaml
//! developers:
//!   - id: dev-1
//!     name: João Silva
//!     skills: [Frontend, React]
//! items:
//!   - id: proj-1
//!     title: User Authentication
//!     estimated_weeks: 4
//!     color: "#3f51b5"
//! ```

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::domain::{Catalog, CatalogError, Developer, Item};

/// Raw catalog contents as stored on disk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSource {
    pub developers: Vec<Developer>,
    pub items: Vec<Item>,
}

impl CatalogSource {
    /// Builds the in-memory catalog, rejecting duplicate IDs
    pub fn into_catalog(self) -> Result<Catalog, CatalogError> {
        Catalog::new(self.developers, self.items)
    }
}

/// Store for the catalog file
pub struct CatalogFile {
    path: PathBuf,
}

impl CatalogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates the default catalog file for a project
    pub fn for_project(project_root: &Path) -> Self {
        Self::new(project_root.join(".planner").join("catalog.yaml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the catalog; a missing file is an empty catalog
    pub fn read(&self) -> Result<CatalogSource> {
        if !self.path.exists() {
            return Ok(CatalogSource::default());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read catalog: {}", self.path.display()))?;

        if content.trim().is_empty() {
            return Ok(CatalogSource::default());
        }

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse catalog: {}", self.path.display()))
    }

    /// Writes the catalog (temp file + rename)
    pub fn write(&self, source: &CatalogSource) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let yaml = serde_yaml::to_string(source).context("Failed to serialize catalog")?;
        let temp_path = self.path.with_extension("yaml.tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            file.lock_exclusive()
                .context("Failed to acquire write lock on catalog")?;

            let mut writer = BufWriter::new(&file);
            writer
                .write_all(yaml.as_bytes())
                .context("Failed to write catalog")?;
            writer.flush().context("Failed to flush catalog")?;
        }

        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }

    /// Appends a developer, rejecting a duplicate ID
    pub fn add_developer(&self, developer: Developer) -> Result<()> {
        let mut source = self.read()?;
        if source.developers.iter().any(|d| d.id == developer.id) {
            return Err(CatalogError::DuplicateDeveloper(developer.id).into());
        }
        source.developers.push(developer);
        self.write(&source)
    }

    /// Appends an item, rejecting a duplicate ID
    pub fn add_item(&self, item: Item) -> Result<()> {
        let mut source = self.read()?;
        if source.items.iter().any(|i| i.id == item.id) {
            return Err(CatalogError::DuplicateItem(item.id).into());
        }
        source.items.push(item);
        self.write(&source)
    }
}
