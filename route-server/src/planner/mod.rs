//! Route planner using Dijkstra search.
//!
//! The planner runs over a graph the rule engine has already reshaped, so
//! stations or segments may be missing and weights may carry penalties.
//! It answers "what is the cheapest way from here to there right now",
//! or says precisely why there is none.

mod search;


pub use search::{PathError, Route, find_path};
