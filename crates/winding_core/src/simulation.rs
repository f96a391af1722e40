//! Run driver: validated requests, the budgeted session state machine, and
//! the one-shot runner.

use crate::error::SimulationError;
use crate::flow::LinearFlow;
use crate::recorder::{RunningStatistic, TrajectoryRecorder};
use crate::region::Region;
use crate::torus::{step_in_place, wrap_unit, TorusPoint};
use crate::traits::TorusFlow;
use serde::{Deserialize, Serialize};

/// Parameters for one flow run. Each run owns its state end-to-end; there
/// is no process-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowRunRequest {
    pub initial: Vec<f64>,
    pub velocity: Vec<f64>,
    pub tick_budget: u64,
    #[serde(default)]
    pub regions: Vec<Region>,
}

/// Final and per-tick visit statistics for one tracked region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionReport {
    pub region: Region,
    pub statistic: RunningStatistic,
    pub final_proportion: Option<f64>,
    pub proportions: Vec<f64>,
    pub hit_ticks: Vec<u64>,
}

/// The temporal record of a run: every visited state in tick order, plus
/// one report per tracked region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowRunResult {
    pub trajectory: Vec<TorusPoint>,
    pub regions: Vec<RegionReport>,
}

/// Validates a raw tick budget as supplied by an external configuration
/// layer, where it may arrive negative or fractional.
pub fn validate_tick_budget(raw: f64) -> Result<u64, SimulationError> {
    if !raw.is_finite() || raw < 0.0 || raw.fract() != 0.0 {
        return Err(SimulationError::InvalidTickBudget(raw));
    }
    Ok(raw as u64)
}

/// A single trajectory run: running until the tick budget is exhausted,
/// then complete. Ticks are advanced in batches so a caller can sample
/// progress between batches; the recorder still sees every tick.
#[derive(Debug)]
pub struct FlowSession<F: TorusFlow<f64>> {
    flow: F,
    state: Vec<f64>,
    recorder: TrajectoryRecorder,
    ticks_done: u64,
    tick_budget: u64,
}

impl<F: TorusFlow<f64>> FlowSession<F> {
    /// Validates every precondition before any simulation work begins; a
    /// failure produces no partial result.
    pub fn new(
        flow: F,
        initial: &[f64],
        tick_budget: u64,
        regions: Vec<Region>,
    ) -> Result<Self, SimulationError> {
        let dim = flow.dimension();
        if dim == 0 {
            return Err(SimulationError::EmptyDimension);
        }
        if initial.len() != dim {
            return Err(SimulationError::DimensionMismatch {
                expected: dim,
                found: initial.len(),
            });
        }
        for region in &regions {
            region.validate(dim)?;
        }

        let state = initial.iter().copied().map(wrap_unit).collect();
        Ok(Self {
            flow,
            state,
            recorder: TrajectoryRecorder::new(regions),
            ticks_done: 0,
            tick_budget,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.ticks_done >= self.tick_budget
    }

    pub fn ticks_done(&self) -> u64 {
        self.ticks_done
    }

    pub fn tick_budget(&self) -> u64 {
        self.tick_budget
    }

    /// Runs up to `max_ticks` further ticks, stopping at the budget.
    /// Returns the number of ticks actually run.
    pub fn advance(&mut self, max_ticks: u64) -> u64 {
        let batch = (self.tick_budget - self.ticks_done).min(max_ticks);
        for _ in 0..batch {
            step_in_place(&mut self.state, self.flow.velocity());
            self.recorder.record(TorusPoint::new(self.state.clone()));
        }
        self.ticks_done += batch;
        batch
    }

    /// Current proportion per tracked region, `None` before any tick.
    pub fn proportions(&self) -> Vec<Option<f64>> {
        self.recorder
            .trackers
            .iter()
            .map(|tracker| tracker.statistic.proportion())
            .collect()
    }

    pub fn trajectory(&self) -> &[TorusPoint] {
        &self.recorder.trajectory
    }

    /// Snapshot of the run so far.
    pub fn result(&self) -> FlowRunResult {
        build_result(self.recorder.clone())
    }

    pub fn into_result(self) -> FlowRunResult {
        build_result(self.recorder)
    }
}

fn build_result(recorder: TrajectoryRecorder) -> FlowRunResult {
    let TrajectoryRecorder {
        trajectory,
        trackers,
    } = recorder;
    let regions = trackers
        .into_iter()
        .map(|tracker| RegionReport {
            final_proportion: tracker.statistic.proportion(),
            region: tracker.region,
            statistic: tracker.statistic,
            proportions: tracker.proportions,
            hit_ticks: tracker.hit_ticks,
        })
        .collect();
    FlowRunResult {
        trajectory,
        regions,
    }
}

/// Runs a linear flow to completion. A zero tick budget is valid and
/// yields an empty trajectory with undefined proportions.
pub fn run_flow(request: &FlowRunRequest) -> Result<FlowRunResult, SimulationError> {
    let flow = LinearFlow::new(request.velocity.clone())?;
    let mut session = FlowSession::new(
        flow,
        &request.initial,
        request.tick_budget,
        request.regions.clone(),
    )?;
    session.advance(request.tick_budget);
    Ok(session.into_result())
}
