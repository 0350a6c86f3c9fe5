//! Domain error types.
//!
//! These errors represent validation failures of raw values entering the
//! domain layer. They are distinct from graph construction and routing errors.

use super::InvalidStationId;

/// Domain-level errors for value validation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// Station identifier failed validation
    #[error(transparent)]
    InvalidStation(#[from] InvalidStationId),

    /// A numeric attribute was negative or not finite
    #[error("{field} must be a non-negative finite number, got {value}")]
    InvalidNumber { field: &'static str, value: f64 },
}
