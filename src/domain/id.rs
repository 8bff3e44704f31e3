//! Identifiers for developers and work items
//!
//! ID Format:
//! - Catalog IDs are free-form tokens of ASCII letters, digits, `-`, `_` and `.`
//!   (e.g., `dev-1`, `proj-7`), so catalogs from other tools load unchanged.
//! - Generated developer IDs: `d-{7-char-hash}` (e.g., `d-7f2b4c1`)
//! - Generated item IDs: `p-{7-char-hash}` (e.g., `p-9d3e5f2`)
//!
//! Hash is derived from name + creation timestamp, so adding the same name
//! twice yields two distinct IDs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("ID must not be empty")]
    Empty,

    #[error("Invalid ID '{0}': only ASCII letters, digits, '-', '_' and '.' are allowed")]
    InvalidCharacters(String),
}

/// Generates a 7-character hash from a name and timestamp
fn generate_hash(name: &str, timestamp: DateTime<Utc>) -> String {
    let input = format!("{}{}", name, timestamp.timestamp_nanos_opt().unwrap_or(0));
    let hash = blake3::hash(input.as_bytes());
    let hex = hash.to_hex();
    hex[..7].to_string()
}

fn validate(s: &str) -> Result<String, IdError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(IdError::Empty);
    }

    let valid = s
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if !valid {
        return Err(IdError::InvalidCharacters(s.to_string()));
    }

    Ok(s.to_string())
}

/// Developer ID
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeveloperId(String);

impl DeveloperId {
    /// Creates a new developer ID from a display name and timestamp
    pub fn generate(name: &str, timestamp: DateTime<Utc>) -> Self {
        Self(format!("d-{}", generate_hash(name, timestamp)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeveloperId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DeveloperId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate(s).map(Self)
    }
}

impl TryFrom<String> for DeveloperId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DeveloperId> for String {
    fn from(id: DeveloperId) -> Self {
        id.0
    }
}

/// Work item (project) ID
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId(String);

impl ItemId {
    /// Creates a new item ID from a title and timestamp
    pub fn generate(title: &str, timestamp: DateTime<Utc>) -> Self {
        Self(format!("p-{}", generate_hash(title, timestamp)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ItemId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate(s).map(Self)
    }
}

impl TryFrom<String> for ItemId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> Self {
        id.0
    }
}
