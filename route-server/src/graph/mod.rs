//! In-memory transit network.
//!
//! Stations are nodes and track segments are undirected edges. Storage is an
//! arena: stations and segments live in slot vectors addressed by stable
//! indices, and removing one clears its slot. Lookup tables give constant-time
//! station membership and segment existence checks.
//!
//! `Clone` produces a fully independent copy. The routing engine relies on
//! this to give every request its own working graph while the base graph is
//! shared read-only.

mod error;
pub mod network;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Safety, StationId, non_negative};

pub use error::GraphError;
pub use network::{NetworkDescription, SegmentSpec, StationSpec, load_network, sample_network};

/// Index of a station slot in a [`TransitGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIdx(usize);

impl NodeIdx {
    /// Position of the slot, usable to index per-node side tables.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Index of a segment slot in a [`TransitGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeIdx(usize);

/// A station (node).
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    id: StationId,
    /// Whether the station is wheelchair accessible.
    pub wheelchair: bool,
}

impl Station {
    pub fn id(&self) -> &StationId {
        &self.id
    }
}

/// Descriptive attributes of a track segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentAttrs {
    /// Travel time in minutes.
    pub travel_time: f64,

    /// Line identifier, `"X"` for connectors between lines.
    pub line: String,

    /// True if the segment connects different lines.
    #[serde(default)]
    pub is_transfer: bool,

    #[serde(default)]
    pub wheelchair: bool,

    #[serde(default)]
    pub crowded: bool,

    pub safety: Safety,

    /// Monetary cost, 0 when not applicable.
    #[serde(default)]
    pub cost: f64,
}

impl SegmentAttrs {
    /// Accessible, uncrowded, safe, free, same-line segment.
    pub fn new(travel_time: f64, line: impl Into<String>) -> Self {
        Self {
            travel_time,
            line: line.into(),
            is_transfer: false,
            wheelchair: true,
            crowded: false,
            safety: Safety::High,
            cost: 0.0,
        }
    }

    pub fn with_transfer(mut self, is_transfer: bool) -> Self {
        self.is_transfer = is_transfer;
        self
    }

    pub fn with_wheelchair(mut self, wheelchair: bool) -> Self {
        self.wheelchair = wheelchair;
        self
    }

    pub fn with_crowded(mut self, crowded: bool) -> Self {
        self.crowded = crowded;
        self
    }

    pub fn with_safety(mut self, safety: Safety) -> Self {
        self.safety = safety;
        self
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }
}

/// A track segment (undirected edge).
///
/// Endpoints and descriptive attributes are fixed once the segment is in a
/// graph. Only the routing weight can change, and only upwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    ends: (NodeIdx, NodeIdx),
    ids: (StationId, StationId),
    attrs: SegmentAttrs,
    weight: f64,
}

impl Segment {
    /// Station ids at either end, in the order the segment was added.
    pub fn endpoints(&self) -> (&StationId, &StationId) {
        (&self.ids.0, &self.ids.1)
    }

    pub fn attrs(&self) -> &SegmentAttrs {
        &self.attrs
    }

    /// Cost used by the path search.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Add a non-negative penalty to the routing weight.
    pub fn add_penalty(&mut self, penalty: f64) {
        debug_assert!(penalty >= 0.0, "penalties must not be negative");
        self.weight += penalty;
    }

    /// The end opposite `from`.
    fn other_end(&self, from: NodeIdx) -> NodeIdx {
        if self.ends.0 == from {
            self.ends.1
        } else {
            self.ends.0
        }
    }
}

/// Undirected, simple, weighted transit graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitGraph {
    stations: Vec<Option<Station>>,
    segments: Vec<Option<Segment>>,
    station_index: HashMap<StationId, NodeIdx>,
    segment_index: HashMap<(NodeIdx, NodeIdx), EdgeIdx>,
    incident: Vec<Vec<EdgeIdx>>,
}

fn pair_key(a: NodeIdx, b: NodeIdx) -> (NodeIdx, NodeIdx) {
    if a <= b { (a, b) } else { (b, a) }
}

impl TransitGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a station.
    pub fn add_station(&mut self, id: StationId, wheelchair: bool) -> Result<NodeIdx, GraphError> {
        if self.station_index.contains_key(&id) {
            return Err(GraphError::DuplicateStation(id));
        }

        let idx = NodeIdx(self.stations.len());
        self.station_index.insert(id.clone(), idx);
        self.stations.push(Some(Station { id, wheelchair }));
        self.incident.push(Vec::new());
        Ok(idx)
    }

    /// Add a segment whose routing weight starts at its travel time.
    pub fn add_segment(
        &mut self,
        a: &str,
        b: &str,
        attrs: SegmentAttrs,
    ) -> Result<EdgeIdx, GraphError> {
        let weight = attrs.travel_time;
        self.add_segment_with_weight(a, b, attrs, weight)
    }

    /// Add a segment with an explicit initial routing weight.
    pub fn add_segment_with_weight(
        &mut self,
        a: &str,
        b: &str,
        attrs: SegmentAttrs,
        weight: f64,
    ) -> Result<EdgeIdx, GraphError> {
        non_negative("travel_time", attrs.travel_time)?;
        non_negative("cost", attrs.cost)?;
        non_negative("weight", weight)?;

        let (a_idx, a_id) = self.lookup(a)?;
        let (b_idx, b_id) = self.lookup(b)?;

        if a_idx == b_idx {
            return Err(GraphError::SelfLoop(a_id));
        }

        let key = pair_key(a_idx, b_idx);
        if self.segment_index.contains_key(&key) {
            return Err(GraphError::DuplicateSegment(a_id, b_id));
        }

        let idx = EdgeIdx(self.segments.len());
        self.segments.push(Some(Segment {
            ends: (a_idx, b_idx),
            ids: (a_id, b_id),
            attrs,
            weight,
        }));
        self.segment_index.insert(key, idx);
        self.incident[a_idx.0].push(idx);
        self.incident[b_idx.0].push(idx);
        Ok(idx)
    }

    /// Number of stations currently in the graph.
    pub fn station_count(&self) -> usize {
        self.station_index.len()
    }

    /// Number of segments currently in the graph.
    pub fn segment_count(&self) -> usize {
        self.segment_index.len()
    }

    /// Upper bound (exclusive) on `NodeIdx::index` values, including removed slots.
    pub fn node_bound(&self) -> usize {
        self.stations.len()
    }

    pub fn contains_station(&self, id: &str) -> bool {
        self.station_index.contains_key(id)
    }

    pub fn has_segment(&self, a: &str, b: &str) -> bool {
        self.edge_between(a, b).is_some()
    }

    pub fn index_of(&self, id: &str) -> Option<NodeIdx> {
        self.station_index.get(id).copied()
    }

    pub fn station(&self, id: &str) -> Option<&Station> {
        self.index_of(id).and_then(|idx| self.station_at(idx))
    }

    pub fn station_at(&self, idx: NodeIdx) -> Option<&Station> {
        self.stations.get(idx.0).and_then(Option::as_ref)
    }

    pub fn segment_between(&self, a: &str, b: &str) -> Option<&Segment> {
        self.edge_between(a, b).and_then(|e| self.segments[e.0].as_ref())
    }

    /// Stations in insertion order.
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter().flatten()
    }

    /// Segments in insertion order.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().flatten()
    }

    /// Segments in insertion order, for weight edits.
    pub fn segments_mut(&mut self) -> impl Iterator<Item = &mut Segment> {
        self.segments.iter_mut().flatten()
    }

    /// Neighbouring stations of `idx` with the connecting segment, in segment
    /// insertion order.
    pub fn neighbours(&self, idx: NodeIdx) -> impl Iterator<Item = (NodeIdx, &Segment)> {
        self.incident
            .get(idx.0)
            .into_iter()
            .flatten()
            .filter_map(move |e| self.segments[e.0].as_ref())
            .map(move |seg| (seg.other_end(idx), seg))
    }

    /// Remove a station and every segment touching it.
    ///
    /// Returns false if the station was not in the graph.
    pub fn remove_station(&mut self, id: &str) -> bool {
        match self.station_index.remove(id) {
            Some(idx) => {
                self.clear_station(idx);
                true
            }
            None => false,
        }
    }

    /// Remove the segment between two stations.
    ///
    /// Returns false if no such segment exists.
    pub fn remove_segment(&mut self, a: &str, b: &str) -> bool {
        match self.edge_between(a, b) {
            Some(e) => {
                self.clear_segment(e);
                true
            }
            None => false,
        }
    }

    /// Keep only the stations matching `keep`, cascading to their segments.
    ///
    /// Returns the number of stations removed.
    pub fn retain_stations(&mut self, mut keep: impl FnMut(&Station) -> bool) -> usize {
        let doomed: Vec<NodeIdx> = self
            .stations
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| match slot {
                Some(station) if !keep(station) => Some(NodeIdx(i)),
                _ => None,
            })
            .collect();

        for &idx in &doomed {
            if let Some(station) = &self.stations[idx.0] {
                self.station_index.remove(station.id.as_str());
            }
            self.clear_station(idx);
        }
        doomed.len()
    }

    /// Keep only the segments matching `keep`.
    ///
    /// Returns the number of segments removed.
    pub fn retain_segments(&mut self, mut keep: impl FnMut(&Segment) -> bool) -> usize {
        let doomed: Vec<EdgeIdx> = self
            .segments
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| match slot {
                Some(seg) if !keep(seg) => Some(EdgeIdx(i)),
                _ => None,
            })
            .collect();

        for &e in &doomed {
            self.clear_segment(e);
        }
        doomed.len()
    }

    fn lookup(&self, id: &str) -> Result<(NodeIdx, StationId), GraphError> {
        self.index_of(id)
            .and_then(|idx| self.station_at(idx).map(|s| (idx, s.id.clone())))
            .ok_or_else(|| GraphError::UnknownStation(id.to_string()))
    }

    fn edge_between(&self, a: &str, b: &str) -> Option<EdgeIdx> {
        let a_idx = self.index_of(a)?;
        let b_idx = self.index_of(b)?;
        self.segment_index.get(&pair_key(a_idx, b_idx)).copied()
    }

    /// Clear a station slot and its incident segments. The caller has already
    /// dropped the id from `station_index`.
    fn clear_station(&mut self, idx: NodeIdx) {
        let touching = std::mem::take(&mut self.incident[idx.0]);
        for e in touching {
            self.clear_segment(e);
        }
        self.stations[idx.0] = None;
    }

    fn clear_segment(&mut self, e: EdgeIdx) {
        let Some(seg) = self.segments[e.0].take() else {
            return;
        };
        self.segment_index.remove(&pair_key(seg.ends.0, seg.ends.1));
        for end in [seg.ends.0, seg.ends.1] {
            self.incident[end.0].retain(|&other| other != e);
        }
    }
}
