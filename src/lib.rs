//! Browser entry point. The native binary lives in `main.rs`.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Runs the game when the wasm module is instantiated.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    game_core::run().map_err(|e| JsValue::from_str(&e.to_string()))
}
