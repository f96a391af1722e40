pub mod decomposition;
pub mod error;
pub mod flow;
pub mod recorder;
pub mod region;
pub mod simulation;
pub mod torus;
/// The `winding_core` crate is the simulation engine for Winding: discrete
/// linear flows on the 2-torus and 3-torus, with running visit statistics
/// for tracked sub-regions.
///
/// Key components:
/// - **Traits**: `Scalar` (numeric type abstraction), `TorusFlow` (flow seam).
/// - **Torus**: wrap-around arithmetic on [0,1)^n and the in-place stepper.
/// - **Regions**: half-open box and closed ball membership predicates.
/// - **Recorder**: trajectory accumulation and integer-counter statistics.
/// - **Simulation / Decomposition**: validated run drivers, including the
///   ergodic-decomposition contrast on an invariant sub-torus.
pub mod traits;
