//! Segment safety rating.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Perceived safety of a track segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Safety {
    Low,
    Medium,
    High,
}

impl Safety {
    /// Returns the lowercase name used in network files and API responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            Safety::Low => "low",
            Safety::Medium => "medium",
            Safety::High => "high",
        }
    }
}

impl fmt::Display for Safety {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
