//! Per-request routing preferences.

use serde::{Deserialize, Deserializer, Serialize};

/// Preferences supplied with one routing request.
///
/// Missing keys and JSON `null` read as absent (or false for flags). Unknown
/// keys are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Penalise segments that change line.
    #[serde(deserialize_with = "null_as_false")]
    pub avoid_transfers: bool,

    /// Only route through wheelchair-accessible stations.
    #[serde(deserialize_with = "null_as_false")]
    pub wheelchair: bool,

    /// Tri-state: an explicit `false` penalises transfers, absent does nothing.
    pub prefer_fastest: Option<bool>,

    /// Penalise crowded segments.
    #[serde(deserialize_with = "null_as_false")]
    pub avoid_crowded: bool,

    /// Penalise low and medium safety segments.
    #[serde(deserialize_with = "null_as_false")]
    pub safe_priority: bool,

    /// Drop segments costing more than this.
    pub budget: Option<f64>,
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}
