//! Network descriptions: the on-disk JSON form of a transit graph.
//!
//! A description lists stations and segments. Segment endpoints that are not
//! declared as stations are added implicitly without wheelchair access, so a
//! file only needs to list the stations it wants to mark accessible.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::{DomainError, Safety, StationId};

use super::{GraphError, SegmentAttrs, TransitGraph};

/// A station entry in a network description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationSpec {
    pub id: StationId,

    #[serde(default)]
    pub wheelchair: bool,
}

/// A segment entry in a network description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSpec {
    pub u: StationId,
    pub v: StationId,

    #[serde(flatten)]
    pub attrs: SegmentAttrs,

    /// Initial routing weight; travel time when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

/// Stations and segments of a network, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkDescription {
    #[serde(default)]
    pub stations: Vec<StationSpec>,

    #[serde(default)]
    pub segments: Vec<SegmentSpec>,
}

impl TransitGraph {
    /// Build a graph from a description.
    pub fn from_description(description: &NetworkDescription) -> Result<Self, GraphError> {
        let mut graph = TransitGraph::new();

        for station in &description.stations {
            graph.add_station(station.id.clone(), station.wheelchair)?;
        }

        for segment in &description.segments {
            for end in [&segment.u, &segment.v] {
                if !graph.contains_station(end.as_str()) {
                    debug!(station = %end, "declaring undeclared segment endpoint");
                    graph.add_station(end.clone(), false)?;
                }
            }

            let weight = segment.weight.unwrap_or(segment.attrs.travel_time);
            graph.add_segment_with_weight(
                segment.u.as_str(),
                segment.v.as_str(),
                segment.attrs.clone(),
                weight,
            )?;
        }

        Ok(graph)
    }
}

/// Load a network description from a JSON file and build its graph.
pub fn load_network(path: impl AsRef<Path>) -> Result<TransitGraph, GraphError> {
    let path = path.as_ref();

    let json = std::fs::read_to_string(path).map_err(|source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let description: NetworkDescription =
        serde_json::from_str(&json).map_err(|source| GraphError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    let graph = TransitGraph::from_description(&description)?;
    info!(
        path = %path.display(),
        stations = graph.station_count(),
        segments = graph.segment_count(),
        "loaded network"
    );
    Ok(graph)
}

/// Builder for network descriptions.
///
/// Provides a fluent API for the built-in sample network and for tests.
/// The first invalid station id is kept and reported by [`build`](Self::build).
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    inner: NetworkDescription,
    error: Option<DomainError>,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a station.
    pub fn station(mut self, id: &str, wheelchair: bool) -> Self {
        if let Some(id) = self.parse(id) {
            self.inner.stations.push(StationSpec { id, wheelchair });
        }
        self
    }

    /// Add a segment.
    pub fn segment(mut self, u: &str, v: &str, attrs: SegmentAttrs) -> Self {
        if let (Some(u), Some(v)) = (self.parse(u), self.parse(v)) {
            self.inner.segments.push(SegmentSpec {
                u,
                v,
                attrs,
                weight: None,
            });
        }
        self
    }

    fn parse(&mut self, id: &str) -> Option<StationId> {
        match StationId::parse(id) {
            Ok(id) => Some(id),
            Err(e) => {
                self.error.get_or_insert(e.into());
                None
            }
        }
    }

    pub fn build(self) -> Result<NetworkDescription, DomainError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.inner),
        }
    }
}

/// One line segment of the sample network.
fn track(time: f64, line: &str, wheelchair: bool, crowded: bool, safety: Safety) -> SegmentAttrs {
    SegmentAttrs::new(time, line)
        .with_wheelchair(wheelchair)
        .with_crowded(crowded)
        .with_safety(safety)
}

/// One inter-line connector of the sample network.
fn connector(time: f64, wheelchair: bool, crowded: bool, safety: Safety) -> SegmentAttrs {
    track(time, "X", wheelchair, crowded, safety).with_transfer(true)
}

/// Description of the built-in demo network.
///
/// Five lines: L1 east-west, L2 north-south, L3 diagonal, L4 a paid circular
/// line, L5 a short spur, joined by `X` transfer connectors. Only the
/// unconnected stations `A` to `G` are declared accessible; the line stations
/// come from segment endpoints and so have no wheelchair access.
pub fn sample_description() -> Result<NetworkDescription, DomainError> {
    use Safety::{High, Low, Medium};

    let builder = ["A", "B", "C", "D", "E", "F", "G"]
        .iter()
        .fold(NetworkBuilder::new(), |b, s| b.station(s, true));

    builder
        // L1
        .segment("A1", "A2", track(4.0, "L1", true, false, High))
        .segment("A2", "A3", track(5.0, "L1", true, true, Medium))
        .segment("A3", "A4", track(6.0, "L1", false, false, High))
        .segment("A4", "A5", track(7.0, "L1", true, true, Low))
        .segment("A5", "A6", track(5.0, "L1", true, false, High))
        // L2
        .segment("B1", "B2", track(5.0, "L2", true, true, Medium))
        .segment("B2", "B3", track(8.0, "L2", true, false, High))
        .segment("B3", "B4", track(6.0, "L2", false, true, Low))
        .segment("B4", "B5", track(7.0, "L2", true, false, Medium))
        .segment("B5", "B6", track(5.0, "L2", true, true, High))
        // L3
        .segment("C1", "C2", track(4.0, "L3", true, false, High))
        .segment("C2", "C3", track(7.0, "L3", true, true, Medium))
        .segment("C3", "C4", track(5.0, "L3", false, false, Low))
        .segment("C4", "C5", track(8.0, "L3", true, true, Medium))
        .segment("C5", "C6", track(6.0, "L3", true, false, High))
        // L4
        .segment("D1", "D2", track(5.0, "L4", true, true, Medium).with_cost(500.0))
        .segment("D2", "D3", track(6.0, "L4", true, false, High).with_cost(500.0))
        .segment("D3", "D4", track(5.0, "L4", true, true, Low).with_cost(500.0))
        .segment("D4", "D1", track(7.0, "L4", true, false, High).with_cost(500.0))
        // Transfers
        .segment("A3", "B2", connector(3.0, true, true, Medium))
        .segment("B4", "C3", connector(4.0, false, false, Low))
        .segment("C5", "D2", connector(5.0, true, true, Medium))
        .segment("A6", "D4", connector(6.0, true, false, High))
        // L5
        .segment("E1", "E2", track(4.0, "L5", true, false, High))
        .segment("E2", "E3", track(6.0, "L5", true, true, Medium))
        // Transfers to L5
        .segment("C6", "E1", connector(5.0, true, false, High))
        .segment("D3", "E2", connector(7.0, true, true, Medium))
        .build()
}

/// Build the demo network graph.
pub fn sample_network() -> Result<TransitGraph, GraphError> {
    TransitGraph::from_description(&sample_description()?)
}
