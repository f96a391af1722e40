use thiserror::Error;

/// Precondition failures. Every variant is detected synchronously before
/// any simulation work begins; there are no partial results.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Dimension mismatch. Expected {expected}, got {found}.")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Tick budget must be a non-negative whole number, got {0}.")]
    InvalidTickBudget(f64),

    #[error("State must have positive dimension.")]
    EmptyDimension,

    #[error("Invariant axis {axis} out of range for dimension {dimension}.")]
    InvariantAxisOutOfRange { axis: usize, dimension: usize },

    #[error("Invalid region: {0}")]
    InvalidRegion(String),
}
