//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Core | Project setup | `init` |
//! | Catalog | Developers and items | `dev add`, `item add`, `item list` |
//! | Board | Allocation changes | `place`, `move`, `unassign`, `reset` |
//! | Query | Board state | `board`, `free`, `sprints` |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! The default comes from `default_format` in the global config.
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output, including the engine's
//! placement decisions:
//! ```bash
//! planner --verbose place proj-1 dev-1 0
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod dev;
mod item;
mod plan;
mod query;

pub use app::{Cli, Commands, run};
pub use output::{Output, OutputFormat};
