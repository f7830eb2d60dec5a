use wasm_bindgen::prelude::*;

mod command_executors;
mod components;
mod dom_utils;
mod ids;
mod macros;
mod messages;
mod models;
mod network;
mod reducers;
mod state;
mod update;
mod utils;

// Main entry point for the WASM application
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Initialize better panic messages
    console_error_panic_hook::set_once();

    let window = web_sys::window().expect("no global `window` exists");
    let document = window.document().expect("should have a document on window");

    // Read the chat endpoint/credential pair once; everything else is
    // in-memory only.
    network::init_chat_config();

    // Build the static DOM skeleton, then render the seeded state into it.
    components::board::setup_board(&document)?;
    components::task_modal::setup_task_modal(&document)?;
    components::chat_drawer::setup_chat_drawer(&document)?;

    state::AppState::refresh_ui_after_state_change()?;

    debug_log!("task board ready");
    Ok(())
}
