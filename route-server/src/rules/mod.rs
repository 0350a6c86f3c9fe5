//! Rule engine that reshapes a transit graph for one request.
//!
//! Rules run in a fixed order over a private copy of the base graph. Later
//! rules see the edits of earlier ones: penalties add up, and a station
//! removed for accessibility is gone before the budget rule runs.

mod engine;
mod preferences;
pub mod standard;


pub use engine::{Rule, RuleEngine, RuleOutcome};
pub use preferences::Preferences;
pub use standard::STANDARD_RULES;
