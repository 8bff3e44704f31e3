//! # Storage Layer
//!
//! Persistence layer for the sprint planner with git-friendly file formats.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Developers and items | YAML | `.planner/catalog.yaml` |
//! | Allocations | JSONL (one JSON per line) | `.planner/allocations.jsonl` |
//! | Available order | JSONL | `.planner/available.jsonl` |
//! | Config | TOML | `.planner/config.toml` |
//!
//! ## Concurrency Safety
//!
//! - [`AllocationStore`], [`AvailableOrderStore`] and [`CatalogFile`] use
//!   file locking (`fs2`)
//! - All writes are atomic (temp file + rename)
//!
//! ## Key Types
//!
//! - [`Project`] - Entry point for accessing a planner project
//! - [`CatalogFile`] - Read/write the developer and item catalog
//! - [`AllocationStore`] - Read/write allocations as JSONL
//! - [`Config`] - Project and global configuration

mod jsonl;
mod catalog_file;
mod config;
mod project;

pub use jsonl::{AllocationSink, AllocationStore, AvailableOrderStore};
pub use catalog_file::{CatalogFile, CatalogSource};
pub use config::{Config, ConfigError, GlobalConfig, GridConfig, OutputFormat, ProjectConfig};
pub use project::{Project, ProjectError};
