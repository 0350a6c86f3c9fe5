//! Data transfer objects for web requests and responses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::graph::{SegmentAttrs, Station, TransitGraph};
use crate::planner::{PathError, Route};
use crate::rules::Preferences;

/// Request to plan a route.
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    /// Origin station id
    pub origin: String,

    /// Destination station id
    pub destination: String,

    /// Routing preferences; `null` or missing means none
    #[serde(default)]
    pub preferences: Option<Preferences>,
}

/// Station attributes as exposed over the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationInfo {
    pub wheelchair: bool,
}

impl From<&Station> for StationInfo {
    fn from(station: &Station) -> Self {
        Self {
            wheelchair: station.wheelchair,
        }
    }
}

/// One station along a route.
#[derive(Debug, Serialize)]
pub struct RouteStep {
    /// Station id
    pub node: String,

    /// Station attributes in the rule-transformed network
    pub info: StationInfo,
}

/// Response to a route request.
///
/// When routing fails the path is empty, weight is zero and `detail`
/// explains why.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    /// Station ids from origin to destination
    pub path: Vec<String>,

    /// Total weight of the route
    pub weight: f64,

    /// Stations with their attributes
    pub steps: Vec<RouteStep>,

    /// Rules that changed the network for this request, in order
    pub applied_rules: Vec<String>,

    /// Why no route was found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl RouteResponse {
    /// Build a response from a found route over the graph it was found in.
    pub fn found(route: &Route, graph: &TransitGraph, applied_rules: Vec<String>) -> Self {
        let steps = route
            .path
            .iter()
            .filter_map(|id| {
                graph.station(id.as_str()).map(|station| RouteStep {
                    node: id.to_string(),
                    info: StationInfo::from(station),
                })
            })
            .collect();

        Self {
            path: route.path.iter().map(|id| id.to_string()).collect(),
            weight: route.weight,
            steps,
            applied_rules,
            detail: None,
        }
    }

    /// Build an empty response explaining a routing failure.
    pub fn failed(error: &PathError, applied_rules: Vec<String>) -> Self {
        let detail = match error {
            PathError::OriginUnreachable(origin) => {
                format!("Origin {origin} is not accessible under current rules")
            }
            PathError::DestinationUnreachable(destination) => {
                format!("Destination {destination} is not accessible under current rules")
            }
            PathError::NoPathFound {
                origin,
                destination,
            } => format!("No path between {origin} and {destination} under current rules"),
        };

        Self {
            path: Vec::new(),
            weight: 0.0,
            steps: Vec::new(),
            applied_rules,
            detail: Some(detail),
        }
    }
}

/// Segment attributes plus current weight.
#[derive(Debug, Serialize)]
pub struct SegmentData {
    #[serde(flatten)]
    pub attrs: SegmentAttrs,

    pub weight: f64,
}

/// One segment of the network export.
#[derive(Debug, Serialize)]
pub struct SegmentView {
    pub u: String,
    pub v: String,
    pub d: SegmentData,
}

/// Network export for visualisation clients.
#[derive(Debug, Serialize)]
pub struct GraphResponse {
    /// Stations keyed by id
    pub nodes: BTreeMap<String, StationInfo>,

    /// Segments in declaration order
    pub edges: Vec<SegmentView>,
}

impl GraphResponse {
    pub fn from_graph(graph: &TransitGraph) -> Self {
        let nodes = graph
            .stations()
            .map(|s| (s.id().to_string(), StationInfo::from(s)))
            .collect();

        let edges = graph
            .segments()
            .map(|seg| {
                let (u, v) = seg.endpoints();
                SegmentView {
                    u: u.to_string(),
                    v: v.to_string(),
                    d: SegmentData {
                        attrs: seg.attrs().clone(),
                        weight: seg.weight(),
                    },
                }
            })
            .collect();

        Self { nodes, edges }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
