//! Developer domain model
//!
//! Developers are the rows of the planning board. The allocation engine only
//! uses their ID; name and skills are carried for display.

use serde::{Deserialize, Serialize};

use super::id::DeveloperId;

/// A developer that work items can be allocated to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Developer {
    /// Unique identifier
    pub id: DeveloperId,

    /// Display name
    pub name: String,

    /// Skill tags (display only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
}

impl Developer {
    /// Creates a developer with no skill tags
    pub fn new(id: DeveloperId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            skills: Vec::new(),
        }
    }

    /// Adds skill tags, skipping ones already present
    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for skill in skills {
            let skill = skill.into();
            if !self.skills.contains(&skill) {
                self.skills.push(skill);
            }
        }
        self
    }
}
