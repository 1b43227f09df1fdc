//! xltab - spreadsheet tab viewer for the web
//!
//! Parses XLSX files and renders each sheet as an HTML table in the
//! browser via WebAssembly:
//! - One tab per sheet
//! - Merged cells (full row/column spans)
//! - Basic cell styling (fill color, font size, bold)
//! - Print via the host environment
//!
//! The core is the grid normalizer ([`grid::normalize`]): it turns a parsed
//! sheet into a rectangular matrix of display cells annotated with spans,
//! visibility, and normalized style, which the view layer renders without
//! re-deriving any spreadsheet semantics.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { XlTab } from 'xltab';
//! await init();
//! const viewer = new XlTab(container);
//! viewer.load(bytes);
//! ```

// Parsing modules
pub mod cell_ref;
pub mod color;
pub mod error;
pub mod parser;
pub mod types;

// Normalization and presentation
pub mod grid;
pub mod session;
pub mod view;
pub mod viewer;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
pub use viewer::XlTab;

pub use types::*;

/// Decode an XLSX file and return the normalized render grids as JSON.
///
/// # Errors
/// Returns an error if the bytes are not a decodable spreadsheet.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn decode_xlsx(data: &[u8]) -> Result<String, JsValue> {
    let workbook = parser::decode(data).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let grids: Vec<RenderGrid> = workbook.sheets.iter().map(grid::normalize).collect();

    serde_json::to_string(&grids)
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
}

/// Decode an XLSX file and return the render grids as a `JsValue`.
///
/// More efficient than [`decode_xlsx`] when the result is consumed
/// directly in JavaScript.
///
/// # Errors
/// Returns an error if the bytes are not a decodable spreadsheet.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn decode_xlsx_to_js(data: &[u8]) -> Result<JsValue, JsValue> {
    let workbook = parser::decode(data).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let grids: Vec<RenderGrid> = workbook.sheets.iter().map(grid::normalize).collect();

    serde_wasm_bindgen::to_value(&grids)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

/// Get the library version
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
#[must_use]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
