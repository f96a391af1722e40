use crate::region::Region;
use crate::torus::TorusPoint;
use serde::{Deserialize, Serialize};

/// Visit counters for one tracked region.
///
/// The proportion is recomputed from the two integer counters at every
/// query; an incremental floating average would accumulate error over tens
/// of thousands of ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunningStatistic {
    pub count_in_region: u64,
    pub total_ticks: u64,
}

impl RunningStatistic {
    /// The fraction of ticks spent inside the region, or `None` before the
    /// first tick has run. Never silently zero.
    pub fn proportion(&self) -> Option<f64> {
        if self.total_ticks == 0 {
            None
        } else {
            Some(self.count_in_region as f64 / self.total_ticks as f64)
        }
    }
}

/// One tracked region with its running statistic, the per-tick proportion
/// series, and the tick indices at which the trajectory was inside.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionTracker {
    pub region: Region,
    pub statistic: RunningStatistic,
    pub proportions: Vec<f64>,
    pub hit_ticks: Vec<u64>,
}

impl RegionTracker {
    pub fn new(region: Region) -> Self {
        Self {
            region,
            statistic: RunningStatistic::default(),
            proportions: Vec::new(),
            hit_ticks: Vec::new(),
        }
    }

    fn observe(&mut self, tick: u64, point: &TorusPoint) {
        if self.region.contains(point) {
            self.statistic.count_in_region += 1;
            self.hit_ticks.push(tick);
        }
        self.statistic.total_ticks += 1;
        // total_ticks is at least 1 here, so the proportion is defined.
        if let Some(proportion) = self.statistic.proportion() {
            self.proportions.push(proportion);
        }
    }
}

/// Accumulates the visited states and the running visit statistics for a
/// set of tracked regions. The trajectory is append-only; insertion order
/// is the temporal record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrajectoryRecorder {
    pub trajectory: Vec<TorusPoint>,
    pub trackers: Vec<RegionTracker>,
}

impl TrajectoryRecorder {
    pub fn new(regions: Vec<Region>) -> Self {
        Self {
            trajectory: Vec::new(),
            trackers: regions.into_iter().map(RegionTracker::new).collect(),
        }
    }

    /// Appends `point` as the next tick of the trajectory and updates every
    /// tracked region's counters.
    pub fn record(&mut self, point: TorusPoint) {
        let tick = self.trajectory.len() as u64;
        for tracker in &mut self.trackers {
            tracker.observe(tick, &point);
        }
        self.trajectory.push(point);
    }

    pub fn ticks_recorded(&self) -> u64 {
        self.trajectory.len() as u64
    }
}
