//! Ergodic-decomposition scenario runner.

use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;
use winding_core::decomposition::{run_decomposition, DecompositionRequest, DecompositionResult};

#[wasm_bindgen]
pub struct WasmDecompositionRunner {
    result: DecompositionResult,
}

#[wasm_bindgen]
impl WasmDecompositionRunner {
    /// Decodes a decomposition request object and runs every seed through
    /// both the full and the restricted flow.
    #[wasm_bindgen(constructor)]
    pub fn new(request: JsValue) -> Result<WasmDecompositionRunner, JsValue> {
        console_error_panic_hook::set_once();

        let request: DecompositionRequest = from_value(request)
            .map_err(|e| JsValue::from_str(&format!("Failed to decode request: {}", e)))?;
        let result = run_decomposition(&request)
            .map_err(|e| JsValue::from_str(&format!("Decomposition failed: {}", e)))?;

        Ok(WasmDecompositionRunner { result })
    }

    pub fn seed_count(&self) -> usize {
        self.result.full.len()
    }

    pub fn get_result(&self) -> Result<JsValue, JsValue> {
        to_value(&self.result)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }
}
