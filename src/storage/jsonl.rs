//! JSONL storage for the board
//!
//! Two files under `.planner/`, one JSON object per line:
//! - `allocations.jsonl`: `{developer_id, item_id, week_index}` per anchor
//! - `available.jsonl`: `{item_id}` per unallocated item, in list order
//!
//! Uses file locking for concurrent access safety.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::{AllocationRecord, ItemId};

/// Receives the full allocation set after every successful change
pub trait AllocationSink {
    fn save(&self, records: &[AllocationRecord]) -> Result<()>;
}

/// Store for allocation records in JSONL format
pub struct AllocationStore {
    path: PathBuf,
}

impl AllocationStore {
    /// Creates a new allocation store at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates the default store for a project
    pub fn for_project(project_root: &Path) -> Self {
        Self::new(project_root.join(".planner").join("allocations.jsonl"))
    }

    /// Returns the path to the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all records in file order
    pub fn read_all(&self) -> Result<Vec<AllocationRecord>> {
        read_lines(&self.path, "allocation")
    }

    /// Writes all records to the store (full rewrite)
    pub fn write_all(&self, records: &[AllocationRecord]) -> Result<()> {
        write_lines(&self.path, records, "allocation")
    }
}

impl AllocationSink for AllocationStore {
    fn save(&self, records: &[AllocationRecord]) -> Result<()> {
        self.write_all(records)
    }
}

#[derive(Serialize, Deserialize)]
struct AvailableEntry {
    item_id: ItemId,
}

/// Store for the order of the available list
///
/// A missing file means "no saved order"; the catalog order is used then.
pub struct AvailableOrderStore {
    path: PathBuf,
}

impl AvailableOrderStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates the default store for a project
    pub fn for_project(project_root: &Path) -> Self {
        Self::new(project_root.join(".planner").join("available.jsonl"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read_all(&self) -> Result<Vec<ItemId>> {
        let entries: Vec<AvailableEntry> = read_lines(&self.path, "available item")?;
        Ok(entries.into_iter().map(|e| e.item_id).collect())
    }

    pub fn write_all(&self, order: &[ItemId]) -> Result<()> {
        let entries: Vec<_> = order
            .iter()
            .map(|id| AvailableEntry {
                item_id: id.clone(),
            })
            .collect();
        write_lines(&self.path, &entries, "available item")
    }
}

fn read_lines<T: DeserializeOwned>(path: &Path, what: &str) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;

    // Acquire shared lock for reading
    file.lock_shared()
        .with_context(|| format!("Failed to acquire read lock on {}", path.display()))?;

    let reader = BufReader::new(&file);
    let mut records = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", line_num + 1))?;

        if line.trim().is_empty() {
            continue;
        }

        let record: T = serde_json::from_str(&line)
            .with_context(|| format!("Failed to parse {} at line {}", what, line_num + 1))?;

        records.push(record);
    }

    // Lock is released when file is dropped
    Ok(records)
}

fn write_lines<T: Serialize>(path: &Path, records: &[T], what: &str) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    // Write to temp file first
    let temp_path = path.with_extension("jsonl.tmp");

    {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

        // Acquire exclusive lock
        file.lock_exclusive()
            .with_context(|| format!("Failed to acquire write lock on {}", path.display()))?;

        let mut writer = BufWriter::new(&file);

        for record in records {
            let line = serde_json::to_string(record)
                .with_context(|| format!("Failed to serialize {}", what))?;
            writeln!(writer, "{}", line).with_context(|| format!("Failed to write {}", what))?;
        }

        writer
            .flush()
            .with_context(|| format!("Failed to flush {}", path.display()))?;
    }

    // Atomic rename
    fs::rename(&temp_path, path).with_context(|| {
        format!(
            "Failed to rename {} to {}",
            temp_path.display(),
            path.display()
        )
    })?;

    Ok(())
}
