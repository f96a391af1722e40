//! Membership predicates for tracked sub-regions of the torus.
//!
//! Regions are assumed not to straddle the 0/1 wrap seam; the membership
//! tests apply no wrap correction.

use crate::error::SimulationError;
use crate::torus::TorusPoint;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

/// A sub-region of the torus whose visit frequency is tracked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Region {
    /// Axis-aligned box, half-open in every coordinate:
    /// `lower[i] <= p[i] < lower[i] + sides[i]`. A point exactly on a lower
    /// face is inside; a point exactly on an upper face is outside.
    Box { lower: Vec<f64>, sides: Vec<f64> },
    /// Euclidean ball around `center`, closed: distance equal to the radius
    /// counts as inside. `axes` restricts the distance to a projection
    /// subset of the coordinates; `None` uses all of them.
    Ball {
        center: Vec<f64>,
        radius: f64,
        #[serde(default)]
        axes: Option<Vec<usize>>,
    },
}

impl Region {
    pub fn contains(&self, point: &TorusPoint) -> bool {
        let p = point.coords();
        match self {
            Region::Box { lower, sides } => lower
                .iter()
                .zip(sides)
                .zip(p)
                .all(|((lo, side), x)| *lo <= *x && *x < lo + side),
            Region::Ball {
                center,
                radius,
                axes,
            } => {
                let diffs: Vec<f64> = match axes {
                    Some(axes) => axes.iter().map(|&i| p[i] - center[i]).collect(),
                    None => p.iter().zip(center).map(|(x, c)| x - c).collect(),
                };
                DVector::from_vec(diffs).norm() <= *radius
            }
        }
    }

    /// Checks the region against the run dimension. Called before any
    /// simulation work; a failure here produces no partial result.
    pub fn validate(&self, dimension: usize) -> Result<(), SimulationError> {
        match self {
            Region::Box { lower, sides } => {
                if lower.len() != dimension {
                    return Err(SimulationError::DimensionMismatch {
                        expected: dimension,
                        found: lower.len(),
                    });
                }
                if sides.len() != lower.len() {
                    return Err(SimulationError::InvalidRegion(format!(
                        "box has {} lower bounds but {} side lengths",
                        lower.len(),
                        sides.len()
                    )));
                }
                if sides.iter().any(|side| *side < 0.0) {
                    return Err(SimulationError::InvalidRegion(
                        "box side lengths must be non-negative".to_string(),
                    ));
                }
            }
            Region::Ball {
                center,
                radius,
                axes,
            } => {
                if center.len() != dimension {
                    return Err(SimulationError::DimensionMismatch {
                        expected: dimension,
                        found: center.len(),
                    });
                }
                if *radius < 0.0 {
                    return Err(SimulationError::InvalidRegion(
                        "ball radius must be non-negative".to_string(),
                    ));
                }
                if let Some(axes) = axes {
                    if axes.is_empty() {
                        return Err(SimulationError::InvalidRegion(
                            "projection axes must not be empty".to_string(),
                        ));
                    }
                    for (i, &axis) in axes.iter().enumerate() {
                        if axis >= dimension {
                            return Err(SimulationError::InvalidRegion(format!(
                                "projection axis {axis} out of range for dimension {dimension}"
                            )));
                        }
                        if axes[..i].contains(&axis) {
                            return Err(SimulationError::InvalidRegion(format!(
                                "duplicate projection axis {axis}"
                            )));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}
