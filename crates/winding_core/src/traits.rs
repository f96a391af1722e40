use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;

/// A trait for types that can be used as scalars on the torus.
/// Must support basic arithmetic, debug printing, and conversion from f64.
pub trait Scalar: Float + FromPrimitive + Debug + 'static {}

impl<T: Float + FromPrimitive + Debug + 'static> Scalar for T {}

/// A discrete-time linear flow on the unit torus [0,1)^n.
pub trait TorusFlow<T: Scalar> {
    /// Returns the dimension of the state space.
    fn dimension(&self) -> usize;

    /// The fixed displacement added to the state at every tick,
    /// one component per coordinate.
    fn velocity(&self) -> &[T];
}
