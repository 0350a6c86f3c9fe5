//! Rule-driven transit route planner.
//!
//! Reshapes a copy of a transit network according to per-request
//! preferences (accessibility, crowding, safety, transfers, budget), then
//! finds the cheapest route through the result.

pub mod config;
pub mod domain;
pub mod graph;
pub mod planner;
pub mod rules;
pub mod web;

#[cfg(test)]
mod test_support;
