//! Ergodic decomposition on the 3-torus: the same seeds advanced under the
//! full flow and under a flow restricted to the invariant sub-torus through
//! each seed, for side-by-side contrast.

use crate::error::SimulationError;
use crate::flow::{LinearFlow, SubTorusFlow};
use crate::region::Region;
use crate::simulation::{FlowRunResult, FlowSession};
use crate::traits::TorusFlow;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// The decomposition scenario: one full-flow run and one restricted run
/// per seed. The restricted velocity has its component along
/// `invariant_axis` forced to exactly zero, so each seed's invariant
/// coordinate selects the leaf it stays on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecompositionRequest {
    pub seeds: Vec<Vec<f64>>,
    pub velocity: Vec<f64>,
    pub sub_velocity: Vec<f64>,
    pub invariant_axis: usize,
    pub tick_budget: u64,
    #[serde(default)]
    pub regions: Vec<Region>,
}

/// Per-seed results: `full[i]` and `restricted[i]` started from `seeds[i]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecompositionResult {
    pub full: Vec<FlowRunResult>,
    pub restricted: Vec<FlowRunResult>,
}

/// Runs every seed through both flows. All inputs are validated before the
/// first tick; runs share no mutable state, each owning its point,
/// recorder, and statistics end-to-end.
pub fn run_decomposition(request: &DecompositionRequest) -> Result<DecompositionResult> {
    if request.seeds.is_empty() {
        bail!("Decomposition requires at least one seed point.");
    }
    if request.sub_velocity.len() != request.velocity.len() {
        return Err(SimulationError::DimensionMismatch {
            expected: request.velocity.len(),
            found: request.sub_velocity.len(),
        }
        .into());
    }

    let flow = LinearFlow::new(request.velocity.clone())?;
    let sub_flow = SubTorusFlow::new(request.sub_velocity.clone(), request.invariant_axis)?;
    for (index, seed) in request.seeds.iter().enumerate() {
        if seed.len() != flow.dimension() {
            return Err(SimulationError::DimensionMismatch {
                expected: flow.dimension(),
                found: seed.len(),
            })
            .with_context(|| format!("Seed {index} has the wrong dimension."));
        }
    }
    for region in &request.regions {
        region.validate(flow.dimension())?;
    }

    let mut full = Vec::with_capacity(request.seeds.len());
    let mut restricted = Vec::with_capacity(request.seeds.len());

    for seed in &request.seeds {
        let mut session = FlowSession::new(
            flow.clone(),
            seed,
            request.tick_budget,
            request.regions.clone(),
        )?;
        session.advance(request.tick_budget);
        full.push(session.into_result());

        let mut session = FlowSession::new(
            sub_flow.clone(),
            seed,
            request.tick_budget,
            request.regions.clone(),
        )?;
        session.advance(request.tick_budget);
        restricted.push(session.into_result());
    }

    Ok(DecompositionResult { full, restricted })
}

#[cfg(test)]
mod tests {
    use super::{run_decomposition, DecompositionRequest};
    use crate::region::Region;

    fn assert_err_contains<T: std::fmt::Debug>(result: anyhow::Result<T>, needle: &str) {
        let err = result.expect_err("expected error");
        let message = format!("{err}");
        assert!(
            message.contains(needle),
            "expected error to contain \"{needle}\", got \"{message}\""
        );
    }

    fn base_request() -> DecompositionRequest {
        DecompositionRequest {
            seeds: vec![vec![0.3, 0.1, 0.1], vec![0.7, 0.5, 0.2]],
            velocity: vec![2.0_f64.sqrt() / 100.0, 0.01, 0.0],
            sub_velocity: vec![0.0, 0.01, 0.0],
            invariant_axis: 0,
            tick_budget: 1000,
            regions: vec![Region::Ball {
                center: vec![0.5, 0.5, 0.5],
                radius: 0.25,
                axes: None,
            }],
        }
    }

    #[test]
    fn rejects_empty_seed_list() {
        let mut request = base_request();
        request.seeds.clear();
        assert_err_contains(run_decomposition(&request), "at least one seed");
    }

    #[test]
    fn rejects_mismatched_sub_velocity() {
        let mut request = base_request();
        request.sub_velocity = vec![0.0, 0.01];
        assert_err_contains(run_decomposition(&request), "Dimension mismatch");
    }

    #[test]
    fn rejects_mismatched_seed_before_any_run() {
        let mut request = base_request();
        request.seeds[1] = vec![0.5, 0.5];
        assert_err_contains(run_decomposition(&request), "Seed 1");
    }

    #[test]
    fn rejects_out_of_range_invariant_axis() {
        let mut request = base_request();
        request.invariant_axis = 3;
        assert_err_contains(run_decomposition(&request), "out of range");
    }

    #[test]
    fn rejects_mismatched_region() {
        let mut request = base_request();
        request.regions = vec![Region::Box {
            lower: vec![0.25, 0.25],
            sides: vec![0.25, 0.25],
        }];
        assert_err_contains(run_decomposition(&request), "Dimension mismatch");
    }

    #[test]
    fn restricted_flow_preserves_the_invariant_coordinate_exactly() {
        let mut request = base_request();
        // A deliberately non-zero invariant component must be forced to
        // zero, not merely assumed.
        request.sub_velocity = vec![0.37, 0.01, 0.003];
        let result = run_decomposition(&request).expect("decomposition should run");

        for (seed, run) in request.seeds.iter().zip(&result.restricted) {
            assert_eq!(run.trajectory.len(), 1000);
            for point in &run.trajectory {
                assert_eq!(point.coords()[0], seed[0]);
            }
        }
    }

    #[test]
    fn full_flow_leaves_the_invariant_leaf() {
        let request = base_request();
        let result = run_decomposition(&request).expect("decomposition should run");
        let first = &result.full[0].trajectory;
        assert!(first.iter().any(|p| p.coords()[0] != 0.3));
    }

    #[test]
    fn seeds_are_independent_runs() {
        let request = base_request();
        let both = run_decomposition(&request).expect("decomposition should run");

        let mut solo = base_request();
        solo.seeds = vec![request.seeds[1].clone()];
        let alone = run_decomposition(&solo).expect("decomposition should run");

        assert_eq!(both.full[1].trajectory, alone.full[0].trajectory);
        assert_eq!(both.restricted[1].trajectory, alone.restricted[0].trajectory);
    }
}
