//! WASM bindings for uson-core.
//!
//! Exposes `parse` and `tokenize` as `#[wasm_bindgen]` functions that can be
//! called from JavaScript/TypeScript. Results cross the boundary as JSON strings;
//! callers `JSON.parse` them.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p uson-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/uson_wasm.wasm
//! ```

use wasm_bindgen::prelude::*;

/// Parse USON into a JSON string.
///
/// With `object_mode` the top-level items are merged into one object. Throws a
/// JS error carrying the syntax error message on malformed input.
#[wasm_bindgen]
pub fn parse(text: &str, object_mode: bool) -> std::result::Result<String, JsValue> {
    let options = uson_core::ParseOptions::new().object_mode(object_mode);
    let value = uson_core::parse_with(text, &options).map_err(to_js)?;
    serde_json::to_string(&value).map_err(to_js)
}

/// Parse USON and return the raw parse tree as a JSON string.
#[wasm_bindgen]
pub fn tokenize(text: &str) -> std::result::Result<String, JsValue> {
    let document = uson_core::tokenize(text).map_err(to_js)?;
    serde_json::to_string(&document).map_err(to_js)
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
