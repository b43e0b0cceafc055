//! Browser bindings for the control panel core
//!
//! The web shell served by the bridge talks to the core through these
//! functions. Events, effects and the view model cross the boundary
//! bincode-serialized.

use lazy_static::lazy_static;
use wasm_bindgen::prelude::{wasm_bindgen, JsError};

use crux_core::{bridge::Bridge, Core};

use crate::App;

lazy_static! {
    static ref CORE: Bridge<App> = Bridge::new(Core::new());
}

/// Runs once when the module is instantiated
#[wasm_bindgen(start)]
pub fn init_wasm() -> Result<(), JsError> {
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    console_log::init_with_level(level).map_err(|e| JsError::new(&e.to_string()))
}

/// Process an event from the shell, returns the serialized effect requests
#[wasm_bindgen]
pub fn process_event(event_bytes: &[u8]) -> Result<Vec<u8>, JsError> {
    let mut effects = Vec::new();
    CORE.update(event_bytes, &mut effects)
        .map_err(|e| JsError::new(&format!("failed to process event: {e}")))?;
    Ok(effects)
}

#[wasm_bindgen]
pub fn view() -> Result<Vec<u8>, JsError> {
    let mut view = Vec::new();
    CORE.view(&mut view)
        .map_err(|e| JsError::new(&format!("failed to render view: {e}")))?;
    Ok(view)
}

/// Resolve an effect request, e.g. an HTTP response or a fired timer
#[wasm_bindgen]
pub fn handle_response(id: u32, response_bytes: &[u8]) -> Result<Vec<u8>, JsError> {
    let mut effects = Vec::new();
    CORE.resolve(
        crux_core::bridge::EffectId(id),
        response_bytes,
        &mut effects,
    )
    .map_err(|e| JsError::new(&format!("failed to resolve effect {id}: {e}")))?;
    Ok(effects)
}
