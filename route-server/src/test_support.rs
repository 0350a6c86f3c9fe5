//! Proptest strategies shared by the rule and planner tests.

use std::collections::HashSet;

use proptest::prelude::*;

use crate::domain::{Safety, StationId};
use crate::graph::{NetworkDescription, SegmentAttrs, SegmentSpec, StationSpec, TransitGraph};
use crate::rules::Preferences;

fn arb_attrs() -> impl Strategy<Value = SegmentAttrs> {
    (
        0u32..20,
        any::<bool>(),
        any::<bool>(),
        prop_oneof![Just(Safety::Low), Just(Safety::Medium), Just(Safety::High)],
        prop_oneof![Just(0.0), Just(50.0), Just(500.0)],
    )
        .prop_map(|(minutes, transfer, crowded, safety, cost)| {
            SegmentAttrs::new(minutes as f64, if transfer { "X" } else { "L1" })
                .with_transfer(transfer)
                .with_crowded(crowded)
                .with_safety(safety)
                .with_cost(cost)
        })
}

/// Station id `S{i}`.
pub fn station_name(i: usize) -> StationId {
    StationId::parse(&format!("S{i}")).unwrap()
}

/// Random simple graphs on two to seven stations `S0..`.
pub fn arb_graph() -> impl Strategy<Value = TransitGraph> {
    (2usize..8)
        .prop_flat_map(|n| {
            (
                proptest::collection::vec(any::<bool>(), n),
                proptest::collection::vec((0..n, 0..n, arb_attrs()), 0..20),
            )
        })
        .prop_map(|(access, links)| {
            let stations = access
                .iter()
                .enumerate()
                .map(|(i, &wheelchair)| StationSpec {
                    id: station_name(i),
                    wheelchair,
                })
                .collect();

            let mut seen = HashSet::new();
            let segments = links
                .into_iter()
                .filter(|(u, v, _)| u != v && seen.insert((*u.min(v), *u.max(v))))
                .map(|(u, v, attrs)| SegmentSpec {
                    u: station_name(u),
                    v: station_name(v),
                    attrs,
                    weight: None,
                })
                .collect();

            TransitGraph::from_description(&NetworkDescription { stations, segments }).unwrap()
        })
}

pub fn arb_prefs() -> impl Strategy<Value = Preferences> {
    (
        any::<bool>(),
        any::<bool>(),
        proptest::option::of(any::<bool>()),
        any::<bool>(),
        any::<bool>(),
        proptest::option::of(prop_oneof![Just(0.0), Just(100.0), Just(1000.0)]),
    )
        .prop_map(
            |(avoid_transfers, wheelchair, prefer_fastest, avoid_crowded, safe_priority, budget)| {
                Preferences {
                    avoid_transfers,
                    wheelchair,
                    prefer_fastest,
                    avoid_crowded,
                    safe_priority,
                    budget,
                }
            },
        )
}
