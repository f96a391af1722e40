use crate::error::SimulationError;
use crate::traits::{Scalar, TorusFlow};

/// The full-dimensional linear flow: a fixed velocity vector added to the
/// state at every tick. Irrationally related components make the long-run
/// visit statistics converge to region measure; rationally related ones
/// confine the orbit to a closed curve.
#[derive(Debug, Clone)]
pub struct LinearFlow<T: Scalar> {
    velocity: Vec<T>,
}

impl<T: Scalar> LinearFlow<T> {
    pub fn new(velocity: Vec<T>) -> Result<Self, SimulationError> {
        if velocity.is_empty() {
            return Err(SimulationError::EmptyDimension);
        }
        Ok(Self { velocity })
    }
}

impl<T: Scalar> TorusFlow<T> for LinearFlow<T> {
    fn dimension(&self) -> usize {
        self.velocity.len()
    }

    fn velocity(&self) -> &[T] {
        &self.velocity
    }
}

/// A flow restricted to the invariant sub-torus obtained by freezing one
/// coordinate. The velocity component along the invariant axis is forced
/// to exactly zero at construction rather than trusting the caller; with
/// the zero skip in `step_in_place`, the frozen coordinate never changes,
/// bit for bit.
#[derive(Debug, Clone)]
pub struct SubTorusFlow<T: Scalar> {
    velocity: Vec<T>,
    invariant_axis: usize,
}

impl<T: Scalar> SubTorusFlow<T> {
    pub fn new(mut velocity: Vec<T>, invariant_axis: usize) -> Result<Self, SimulationError> {
        if velocity.is_empty() {
            return Err(SimulationError::EmptyDimension);
        }
        if invariant_axis >= velocity.len() {
            return Err(SimulationError::InvariantAxisOutOfRange {
                axis: invariant_axis,
                dimension: velocity.len(),
            });
        }
        velocity[invariant_axis] = T::zero();
        Ok(Self {
            velocity,
            invariant_axis,
        })
    }

    pub fn invariant_axis(&self) -> usize {
        self.invariant_axis
    }
}

impl<T: Scalar> TorusFlow<T> for SubTorusFlow<T> {
    fn dimension(&self) -> usize {
        self.velocity.len()
    }

    fn velocity(&self) -> &[T] {
        &self.velocity
    }
}
