//! The standard rule set.
//!
//! Each rule checks its preference and returns false without touching the
//! graph when inactive. Penalties add to whatever weight earlier rules left,
//! so a segment matching several active rules pays all of them.

use crate::domain::Safety;
use crate::graph::{Segment, TransitGraph};

use super::Preferences;

/// Added to transfer segments when transfers are to be avoided.
pub const AVOID_TRANSFER_PENALTY: f64 = 30.0;

/// Added to transfer segments when fastest routing is switched off.
pub const SLOW_TRANSFER_PENALTY: f64 = 10.0;

/// Added to crowded segments.
pub const CROWDED_PENALTY: f64 = 15.0;

/// Added to low safety segments.
pub const LOW_SAFETY_PENALTY: f64 = 20.0;

/// Added to medium safety segments.
pub const MEDIUM_SAFETY_PENALTY: f64 = 5.0;

/// Rule names in the order [`super::RuleEngine::standard`] registers them.
pub const STANDARD_RULES: [&str; 6] = [
    "avoid_transfers",
    "wheelchair_only",
    "prefer_fastest_toggle",
    "avoid_crowded",
    "prioritize_safety",
    "budget_constraint",
];

/// Add `penalty(segment)` to every segment it returns `Some` for.
///
/// Returns true if any segment was penalised.
fn penalise(graph: &mut TransitGraph, penalty: impl Fn(&Segment) -> Option<f64>) -> bool {
    let mut changed = false;
    for segment in graph.segments_mut() {
        if let Some(amount) = penalty(segment) {
            segment.add_penalty(amount);
            changed = true;
        }
    }
    changed
}

pub fn avoid_transfers(graph: &mut TransitGraph, prefs: &Preferences) -> bool {
    if !prefs.avoid_transfers {
        return false;
    }
    penalise(graph, |s| s.attrs().is_transfer.then_some(AVOID_TRANSFER_PENALTY))
}

/// Remove inaccessible stations together with their segments.
pub fn wheelchair_only(graph: &mut TransitGraph, prefs: &Preferences) -> bool {
    if !prefs.wheelchair {
        return false;
    }
    graph.retain_stations(|station| station.wheelchair) > 0
}

/// Fires on an explicit `prefer_fastest: false` only, and then reports a
/// change even if the graph has no transfer segments.
pub fn prefer_fastest_toggle(graph: &mut TransitGraph, prefs: &Preferences) -> bool {
    if prefs.prefer_fastest != Some(false) {
        return false;
    }
    penalise(graph, |s| s.attrs().is_transfer.then_some(SLOW_TRANSFER_PENALTY));
    true
}

pub fn avoid_crowded(graph: &mut TransitGraph, prefs: &Preferences) -> bool {
    if !prefs.avoid_crowded {
        return false;
    }
    penalise(graph, |s| s.attrs().crowded.then_some(CROWDED_PENALTY))
}

pub fn prioritize_safety(graph: &mut TransitGraph, prefs: &Preferences) -> bool {
    if !prefs.safe_priority {
        return false;
    }
    penalise(graph, |s| match s.attrs().safety {
        Safety::Low => Some(LOW_SAFETY_PENALTY),
        Safety::Medium => Some(MEDIUM_SAFETY_PENALTY),
        Safety::High => None,
    })
}

/// Remove every segment costing more than the budget, whatever its weight.
pub fn budget_constraint(graph: &mut TransitGraph, prefs: &Preferences) -> bool {
    let Some(budget) = prefs.budget else {
        return false;
    };
    graph.retain_segments(|s| s.attrs().cost <= budget) > 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationId;
    use crate::graph::SegmentAttrs;

    /// Line L1: A1 - A2 - A3, connector A3 - B1 (crowded, low safety, paid).
    fn graph() -> TransitGraph {
        let mut g = TransitGraph::new();
        g.add_station(StationId::parse("A1").unwrap(), true).unwrap();
        g.add_station(StationId::parse("A2").unwrap(), false).unwrap();
        g.add_station(StationId::parse("A3").unwrap(), true).unwrap();
        g.add_station(StationId::parse("B1").unwrap(), true).unwrap();
        g.add_segment("A1", "A2", SegmentAttrs::new(4.0, "L1").with_safety(Safety::Medium))
            .unwrap();
        g.add_segment("A2", "A3", SegmentAttrs::new(5.0, "L1")).unwrap();
        g.add_segment(
            "A3",
            "B1",
            SegmentAttrs::new(3.0, "X")
                .with_transfer(true)
                .with_crowded(true)
                .with_safety(Safety::Low)
                .with_cost(500.0),
        )
        .unwrap();
        g
    }

    fn weight(g: &TransitGraph, a: &str, b: &str) -> f64 {
        g.segment_between(a, b).unwrap().weight()
    }

    #[test]
    fn every_rule_is_inert_without_preferences() {
        let prefs = Preferences::default();
        let rules: [fn(&mut TransitGraph, &Preferences) -> bool; 6] = [
            avoid_transfers,
            wheelchair_only,
            prefer_fastest_toggle,
            avoid_crowded,
            prioritize_safety,
            budget_constraint,
        ];

        for rule in rules {
            let mut g = graph();
            assert!(!rule(&mut g, &prefs));
            assert_eq!(g, graph());
        }
    }

    #[test]
    fn avoid_transfers_penalises_connectors_only() {
        let mut g = graph();
        let prefs = Preferences {
            avoid_transfers: true,
            ..Default::default()
        };
        assert!(avoid_transfers(&mut g, &prefs));
        assert_eq!(weight(&g, "A3", "B1"), 33.0);
        assert_eq!(weight(&g, "A1", "A2"), 4.0);
    }

    #[test]
    fn avoid_transfers_reports_no_change_without_transfers() {
        let mut g = graph();
        g.remove_segment("A3", "B1");
        let prefs = Preferences {
            avoid_transfers: true,
            ..Default::default()
        };
        assert!(!avoid_transfers(&mut g, &prefs));
    }

    #[test]
    fn wheelchair_only_removes_inaccessible_stations() {
        let mut g = graph();
        let prefs = Preferences {
            wheelchair: true,
            ..Default::default()
        };
        assert!(wheelchair_only(&mut g, &prefs));
        assert!(!g.contains_station("A2"));
        assert!(!g.has_segment("A1", "A2"));
        assert!(!g.has_segment("A2", "A3"));
        assert!(g.has_segment("A3", "B1"));

        // Nothing left to remove.
        assert!(!wheelchair_only(&mut g, &prefs));
    }

    #[test]
    fn prefer_fastest_toggle_needs_explicit_false() {
        let mut g = graph();
        let absent = Preferences::default();
        let yes = Preferences {
            prefer_fastest: Some(true),
            ..Default::default()
        };
        let no = Preferences {
            prefer_fastest: Some(false),
            ..Default::default()
        };

        assert!(!prefer_fastest_toggle(&mut g, &absent));
        assert!(!prefer_fastest_toggle(&mut g, &yes));
        assert_eq!(weight(&g, "A3", "B1"), 3.0);

        assert!(prefer_fastest_toggle(&mut g, &no));
        assert_eq!(weight(&g, "A3", "B1"), 13.0);
        assert_eq!(weight(&g, "A2", "A3"), 5.0);
    }

    #[test]
    fn prefer_fastest_toggle_fires_without_transfers() {
        let mut g = graph();
        g.remove_segment("A3", "B1");
        let before = g.clone();
        let prefs = Preferences {
            prefer_fastest: Some(false),
            ..Default::default()
        };
        assert!(prefer_fastest_toggle(&mut g, &prefs));
        assert_eq!(g, before);
    }

    #[test]
    fn avoid_crowded_penalises_crowded() {
        let mut g = graph();
        let prefs = Preferences {
            avoid_crowded: true,
            ..Default::default()
        };
        assert!(avoid_crowded(&mut g, &prefs));
        assert_eq!(weight(&g, "A3", "B1"), 18.0);
        assert_eq!(weight(&g, "A2", "A3"), 5.0);
    }

    #[test]
    fn prioritize_safety_by_level() {
        let mut g = graph();
        let prefs = Preferences {
            safe_priority: true,
            ..Default::default()
        };
        assert!(prioritize_safety(&mut g, &prefs));
        assert_eq!(weight(&g, "A3", "B1"), 23.0);
        assert_eq!(weight(&g, "A1", "A2"), 9.0);
        assert_eq!(weight(&g, "A2", "A3"), 5.0);
    }

    #[test]
    fn budget_removes_expensive_segments() {
        let mut g = graph();
        let prefs = Preferences {
            budget: Some(100.0),
            ..Default::default()
        };
        assert!(budget_constraint(&mut g, &prefs));
        assert!(!g.has_segment("A3", "B1"));
        assert!(g.contains_station("B1"));
        assert_eq!(g.segment_count(), 2);
    }

    #[test]
    fn budget_equal_to_cost_keeps_segment() {
        let mut g = graph();
        let prefs = Preferences {
            budget: Some(500.0),
            ..Default::default()
        };
        assert!(!budget_constraint(&mut g, &prefs));
        assert!(g.has_segment("A3", "B1"));
    }

    #[test]
    fn penalties_compound() {
        let mut g = graph();
        let prefs = Preferences {
            avoid_transfers: true,
            prefer_fastest: Some(false),
            avoid_crowded: true,
            safe_priority: true,
            ..Default::default()
        };
        avoid_transfers(&mut g, &prefs);
        prefer_fastest_toggle(&mut g, &prefs);
        avoid_crowded(&mut g, &prefs);
        prioritize_safety(&mut g, &prefs);
        assert_eq!(weight(&g, "A3", "B1"), 3.0 + 30.0 + 10.0 + 15.0 + 20.0);
    }
}
