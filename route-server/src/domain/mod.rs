//! Domain types for the transit router.
//!
//! This module contains the value types shared by the graph, rule and
//! planner layers. All types enforce their invariants at construction
//! time, so code that receives these types can trust their validity.

mod error;
mod safety;
mod station;

pub use error::DomainError;
pub use safety::Safety;
pub use station::{InvalidStationId, StationId};

/// Check that a numeric attribute is finite and not negative.
pub(crate) fn non_negative(field: &'static str, value: f64) -> Result<f64, DomainError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(DomainError::InvalidNumber { field, value })
    }
}
