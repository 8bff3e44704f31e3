//! Output formatting for CLI commands
//!
//! Results go to stdout as text or JSON. Diagnostics are `tracing` events
//! on stderr, enabled by `--verbose` or `RUST_LOG`.

use serde::Serialize;

use crate::storage;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl From<storage::OutputFormat> for OutputFormat {
    fn from(format: storage::OutputFormat) -> Self {
        match format {
            storage::OutputFormat::Text => OutputFormat::Text,
            storage::OutputFormat::Json => OutputFormat::Json,
        }
    }
}

/// Writes command results in the selected format
pub struct Output {
    format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Confirms a board or catalog change
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Text => println!("{}", message),
            OutputFormat::Json => println!(
                "{}",
                serde_json::json!({ "success": true, "message": message })
            ),
        }
    }

    /// Prints a serializable result; text mode falls back to pretty JSON
    pub fn data<T: Serialize>(&self, data: &T) {
        let rendered = match self.format {
            OutputFormat::Text => serde_json::to_string_pretty(data),
            OutputFormat::Json => serde_json::to_string(data),
        };
        if let Ok(json) = rendered {
            println!("{}", json);
        }
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Prints a column header and a rule as wide as `width`
    pub fn table_header(&self, header: &str, width: usize) {
        println!("{}", header);
        println!("{}", "-".repeat(width));
    }
}
