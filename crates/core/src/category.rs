//! The closed set of tyrant categories.
//!
//! Values are stored as TEXT in the database (guarded by a CHECK constraint)
//! and appear verbatim at the HTTP boundary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Jurisdiction a tyrant operates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Federal,
    State,
    Local,
    LawEnforcement,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 4] = [
        Category::Federal,
        Category::State,
        Category::Local,
        Category::LawEnforcement,
    ];

    /// The string stored in the `category` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Federal => "federal",
            Category::State => "state",
            Category::Local => "local",
            Category::LawEnforcement => "law_enforcement",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                let allowed: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
                CoreError::Validation(format!(
                    "Invalid category '{s}'. Must be one of: {allowed:?}"
                ))
            })
    }
}
