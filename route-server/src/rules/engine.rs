//! Ordered rule pipeline.

use std::fmt;

use tracing::{debug, trace};

use crate::graph::TransitGraph;

use super::{Preferences, standard};

type ApplyFn = dyn Fn(&mut TransitGraph, &Preferences) -> bool + Send + Sync;

/// A named, conditionally active transform of the working graph.
///
/// `apply` returns true if the rule was active and changed the graph. An
/// inactive rule must leave the graph untouched.
pub struct Rule {
    name: String,
    apply: Box<ApplyFn>,
}

impl Rule {
    pub fn new<F>(name: impl Into<String>, apply: F) -> Self
    where
        F: Fn(&mut TransitGraph, &Preferences) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            apply: Box::new(apply),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn apply(&self, graph: &mut TransitGraph, prefs: &Preferences) -> bool {
        (self.apply)(graph, prefs)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// The working graph and fired rules of one [`RuleEngine::run`] call.
#[derive(Debug, Clone)]
pub struct RuleOutcome {
    /// Private copy of the base graph with every fired rule applied.
    pub graph: TransitGraph,

    /// Names of the rules that reported a change, in registration order.
    pub applied: Vec<String>,
}

/// Runs registered rules, in registration order, over a private copy of a
/// base graph.
///
/// The engine holds no per-call state: `run` takes `&self`, so one engine can
/// serve concurrent requests.
#[derive(Debug, Default)]
pub struct RuleEngine {
    rules: Vec<Rule>,
}

impl RuleEngine {
    /// Create an engine with no rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with the six standard rules.
    pub fn standard() -> Self {
        let mut engine = Self::new();
        engine.register("avoid_transfers", standard::avoid_transfers);
        engine.register("wheelchair_only", standard::wheelchair_only);
        engine.register("prefer_fastest_toggle", standard::prefer_fastest_toggle);
        engine.register("avoid_crowded", standard::avoid_crowded);
        engine.register("prioritize_safety", standard::prioritize_safety);
        engine.register("budget_constraint", standard::budget_constraint);
        engine
    }

    /// Append a rule to the pipeline.
    pub fn register<F>(&mut self, name: impl Into<String>, apply: F)
    where
        F: Fn(&mut TransitGraph, &Preferences) -> bool + Send + Sync + 'static,
    {
        self.rules.push(Rule::new(name, apply));
    }

    /// Rule names in registration order.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(Rule::name)
    }

    /// Apply every rule to a fresh copy of `base`.
    ///
    /// `base` is never modified. Never fails: inactive rules are skipped.
    pub fn run(&self, base: &TransitGraph, prefs: &Preferences) -> RuleOutcome {
        let mut graph = base.clone();
        let mut applied = Vec::new();

        for rule in &self.rules {
            if rule.apply(&mut graph, prefs) {
                debug!(rule = rule.name(), "rule applied");
                applied.push(rule.name().to_string());
            } else {
                trace!(rule = rule.name(), "rule inactive");
            }
        }

        RuleOutcome { graph, applied }
    }
}
