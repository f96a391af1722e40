//! Budgeted flow runner with batched stepping and progress reporting.

use js_sys::Float64Array;
use serde::Serialize;
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;
use winding_core::flow::LinearFlow;
use winding_core::region::Region;
use winding_core::simulation::{validate_tick_budget, FlowSession};

/// Progress payload for the batched flow runner.
#[derive(Serialize)]
struct FlowRunProgress {
    done: bool,
    ticks_done: u64,
    tick_budget: u64,
    proportions: Vec<Option<f64>>,
}

#[wasm_bindgen]
pub struct WasmFlowRunner {
    session: FlowSession<LinearFlow<f64>>,
}

#[wasm_bindgen]
impl WasmFlowRunner {
    /// `tick_budget` arrives as a JS number and is validated to be a
    /// non-negative whole number before any simulation work. `regions` is
    /// an optional array of region objects.
    #[wasm_bindgen(constructor)]
    pub fn new(
        initial: Vec<f64>,
        velocity: Vec<f64>,
        tick_budget: f64,
        regions: JsValue,
    ) -> Result<WasmFlowRunner, JsValue> {
        console_error_panic_hook::set_once();

        let tick_budget =
            validate_tick_budget(tick_budget).map_err(|e| JsValue::from_str(&format!("{}", e)))?;
        let regions: Vec<Region> = if regions.is_undefined() || regions.is_null() {
            Vec::new()
        } else {
            serde_wasm_bindgen::from_value(regions)
                .map_err(|e| JsValue::from_str(&format!("Failed to decode regions: {}", e)))?
        };
        let flow = LinearFlow::new(velocity)
            .map_err(|e| JsValue::from_str(&format!("Failed to build flow: {}", e)))?;
        let session = FlowSession::new(flow, &initial, tick_budget, regions)
            .map_err(|e| JsValue::from_str(&format!("Failed to start run: {}", e)))?;

        Ok(WasmFlowRunner { session })
    }

    pub fn is_done(&self) -> bool {
        self.session.is_complete()
    }

    /// Advances up to `batch_size` ticks and reports progress. The batch
    /// size is the caller's frame-sampling cadence; the recorder still sees
    /// every tick.
    pub fn run_steps(&mut self, batch_size: u32) -> Result<JsValue, JsValue> {
        self.session.advance(u64::from(batch_size));
        self.progress_value()
    }

    pub fn get_progress(&self) -> Result<JsValue, JsValue> {
        self.progress_value()
    }

    /// The full run record so far: trajectory plus one report per region.
    pub fn get_result(&self) -> Result<JsValue, JsValue> {
        to_value(&self.session.result())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// The trajectory recorded so far, flattened tick-major.
    pub fn trajectory_flat(&self) -> Float64Array {
        let trajectory = self.session.trajectory();
        let dim = trajectory.first().map_or(0, |p| p.dimension());
        let mut flat = Vec::with_capacity(trajectory.len() * dim);
        for point in trajectory {
            flat.extend_from_slice(point.coords());
        }
        Float64Array::from(flat.as_slice())
    }

    fn progress_value(&self) -> Result<JsValue, JsValue> {
        let progress = FlowRunProgress {
            done: self.session.is_complete(),
            ticks_done: self.session.ticks_done(),
            tick_budget: self.session.tick_budget(),
            proportions: self.session.proportions(),
        };
        to_value(&progress).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_wrapper_tests {
    use super::WasmFlowRunner;
    use wasm_bindgen::JsValue;

    #[test]
    fn runner_rejects_negative_tick_budget() {
        let result = WasmFlowRunner::new(vec![0.0, 0.0], vec![0.1, 0.2], -1.0, JsValue::NULL);
        let message = result
            .err()
            .and_then(|err| err.as_string())
            .unwrap_or_default();
        assert!(message.contains("non-negative"));
    }

    #[test]
    fn runner_rejects_fractional_tick_budget() {
        let result = WasmFlowRunner::new(vec![0.0, 0.0], vec![0.1, 0.2], 2.5, JsValue::NULL);
        assert!(result.is_err(), "expected error for fractional budget");
    }

    #[test]
    fn runner_rejects_dimension_mismatch() {
        let result = WasmFlowRunner::new(vec![0.0], vec![0.1, 0.2], 10.0, JsValue::NULL);
        let message = result
            .err()
            .and_then(|err| err.as_string())
            .unwrap_or_default();
        assert!(message.contains("Dimension mismatch"));
    }

    #[test]
    fn runner_completes_within_budget() {
        let mut runner = WasmFlowRunner::new(vec![0.0, 0.0], vec![0.1, 0.2], 10.0, JsValue::NULL)
            .expect("runner");
        assert!(!runner.is_done());
        runner.run_steps(4).expect("run steps");
        assert!(!runner.is_done());
        runner.run_steps(100).expect("run steps");
        assert!(runner.is_done());
        assert_eq!(runner.trajectory_flat().length(), 20);
    }
}
