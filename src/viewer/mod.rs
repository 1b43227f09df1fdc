//! Main XlTab struct - the wasm-exported viewer shell.
//!
//! Owns a [`crate::session::ViewSession`] and a container element. `load`
//! replaces the session contents and re-renders; tab switching and printing
//! are thin delegations. All spreadsheet semantics live in the normalizer;
//! this shell only moves markup into the DOM.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use crate::session::{LoadOutcome, ViewSession};
#[cfg(target_arch = "wasm32")]
use crate::view::viewer_html;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub struct XlTab {
    session: ViewSession,
    container: web_sys::Element,
    active_sheet: usize,
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl XlTab {
    /// Create a viewer that renders into the given container element.
    #[wasm_bindgen(constructor)]
    pub fn new(container: web_sys::Element) -> XlTab {
        console_error_panic_hook::set_once();
        XlTab {
            session: ViewSession::new(),
            container,
            active_sheet: 0,
        }
    }

    /// Load a spreadsheet file from its raw bytes and render it.
    ///
    /// On decode failure the previous view is kept and the error is
    /// returned to the caller.
    pub fn load(&mut self, data: &[u8]) -> Result<(), JsValue> {
        let ticket = self.session.begin_load();
        let result = crate::parser::decode(data);
        let error = result.as_ref().err().map(ToString::to_string);

        match self.session.finish_load(ticket, result) {
            LoadOutcome::Installed => {
                self.active_sheet = 0;
                self.render();
                Ok(())
            }
            LoadOutcome::Stale => Ok(()),
            LoadOutcome::Failed => Err(JsValue::from_str(
                &error.unwrap_or_else(|| "load failed".to_string()),
            )),
        }
    }

    /// Number of sheets in the current file.
    pub fn sheet_count(&self) -> usize {
        self.session.grids().len()
    }

    /// Tab labels as a JS array of strings.
    pub fn sheet_names(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.session.sheet_names())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Switch the visible tab and re-render. Out-of-range indices are ignored.
    pub fn set_active_sheet(&mut self, index: usize) {
        if index < self.session.grids().len() {
            self.active_sheet = index;
            self.render();
        }
    }

    /// Re-render the tab bar and the active sheet's table.
    pub fn render(&self) {
        let markup = viewer_html(self.session.grids(), self.active_sheet);
        self.container.set_inner_html(&markup);
    }

    /// Print the current view via the host environment.
    pub fn print(&self) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        window.print()
    }
}
