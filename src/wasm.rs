use wasm_bindgen::prelude::*;
use crate::{Converter, InfoHash};
use std::str::FromStr;

#[wasm_bindgen]
pub fn init() {
    // Initialize panic hook for better error messages
    console_error_panic_hook::set_once();
}

#[wasm_bindgen]
pub struct WasmConverter {
    converter: Converter,
}

#[wasm_bindgen]
impl WasmConverter {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmConverter {
        init();
        WasmConverter {
            converter: Converter::new(),
        }
    }

    /// Detect the input kind: "magnet", "cipher", "phrase" or "unknown"
    #[wasm_bindgen]
    pub fn detect_type(&self, input: &str) -> String {
        self.converter.detect_type(input).to_string()
    }

    /// Convert an input to `{ kind, magnet, cipher, phrase }`, fields empty when unrecognized
    #[wasm_bindgen]
    pub fn convert(&mut self, input: &str) -> Result<JsValue, JsValue> {
        let conversion = self.converter.convert(input);
        serde_wasm_bindgen::to_value(&conversion).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Convert an input, rejecting with the failure reason instead of empty fields
    #[wasm_bindgen]
    pub fn try_convert(&mut self, input: &str) -> Result<JsValue, JsValue> {
        let conversion = self
            .converter
            .try_convert(input)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        serde_wasm_bindgen::to_value(&conversion).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Render a bare 40 character hex hash in all three forms
    #[wasm_bindgen]
    pub fn encode_hash(&mut self, hash: &str) -> Result<JsValue, JsValue> {
        let hash = InfoHash::from_str(hash.trim()).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let conversion = self
            .converter
            .encode_hash(&hash)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        serde_wasm_bindgen::to_value(&conversion).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl Default for WasmConverter {
    fn default() -> Self {
        Self::new()
    }
}

/// Detect the input kind without holding a converter
#[wasm_bindgen]
pub fn detect_type(input: &str) -> String {
    crate::detect_type(input).to_string()
}

/// Convert with the per-thread default converter
#[wasm_bindgen]
pub fn convert(input: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&crate::convert(input)).map_err(|e| JsValue::from_str(&e.to_string()))
}
