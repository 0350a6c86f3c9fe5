//! Application state for the web layer.

use std::sync::Arc;

use crate::graph::TransitGraph;
use crate::rules::RuleEngine;

/// Shared application state.
///
/// Both members are read-only after start-up; requests clone the network
/// inside the rule engine rather than mutating it.
#[derive(Clone)]
pub struct AppState {
    /// Base transit network
    pub network: Arc<TransitGraph>,

    /// Rule pipeline applied to every request
    pub engine: Arc<RuleEngine>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(network: TransitGraph, engine: RuleEngine) -> Self {
        Self {
            network: Arc::new(network),
            engine: Arc::new(engine),
        }
    }
}
