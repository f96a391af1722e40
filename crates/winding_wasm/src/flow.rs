//! Direct flow wrapper for ad-hoc stepping from the presentation layer.

use wasm_bindgen::prelude::*;
use winding_core::flow::LinearFlow;
use winding_core::torus::{step_in_place, TorusPoint};
use winding_core::traits::TorusFlow;

#[wasm_bindgen]
pub struct WasmFlow {
    flow: LinearFlow<f64>,
    state: Vec<f64>,
    tick: u64,
}

#[wasm_bindgen]
impl WasmFlow {
    #[wasm_bindgen(constructor)]
    pub fn new(initial: Vec<f64>, velocity: Vec<f64>) -> Result<WasmFlow, JsValue> {
        console_error_panic_hook::set_once();

        if initial.len() != velocity.len() {
            return Err(JsValue::from_str(&format!(
                "Initial state dimension mismatch. Expected {}, got {}.",
                velocity.len(),
                initial.len()
            )));
        }
        let flow = LinearFlow::new(velocity)
            .map_err(|e| JsValue::from_str(&format!("Failed to build flow: {}", e)))?;
        let state = TorusPoint::new(initial).coords().to_vec();

        Ok(WasmFlow {
            flow,
            state,
            tick: 0,
        })
    }

    pub fn set_state(&mut self, state: &[f64]) {
        self.state = TorusPoint::new(state.to_vec()).coords().to_vec();
    }

    pub fn get_state(&self) -> Vec<f64> {
        self.state.clone()
    }

    pub fn get_tick(&self) -> f64 {
        self.tick as f64
    }

    pub fn dimension(&self) -> usize {
        self.flow.dimension()
    }

    /// Advances `ticks` ticks of the wrap-around recurrence.
    pub fn step(&mut self, ticks: u32) {
        for _ in 0..ticks {
            step_in_place(&mut self.state, self.flow.velocity());
        }
        self.tick += u64::from(ticks);
    }
}
