//! Graph construction error types.

use std::path::PathBuf;

use crate::domain::{DomainError, StationId};

/// Errors raised while building or loading a transit graph.
///
/// These indicate bad network data or a programming error, never a
/// request-level routing failure.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Station was declared twice
    #[error("station {0} is already in the graph")]
    DuplicateStation(StationId),

    /// Segment endpoint is not a station of the graph
    #[error("unknown station: {0}")]
    UnknownStation(String),

    /// Segment connects a station to itself
    #[error("segment from {0} to itself is not allowed")]
    SelfLoop(StationId),

    /// A segment already joins this pair of stations
    #[error("stations {0} and {1} are already connected")]
    DuplicateSegment(StationId, StationId),

    /// An attribute failed validation
    #[error("invalid attribute: {0}")]
    InvalidAttribute(#[from] DomainError),

    /// Network file could not be read
    #[error("failed to read network file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Network file is not valid JSON for a network description
    #[error("failed to parse network file {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
