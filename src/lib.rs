use wasm_bindgen::prelude::*;

mod command_executors;
mod components;
mod constants;
mod dom_utils;
mod macros;
mod messages;
mod models;
mod network;
mod state;
mod submission;
mod toast;
mod ui;
mod update;
mod utils;
mod views;

#[cfg(test)]
mod body_prop_test;
#[cfg(test)]
mod submission_guard_tests;

// Main entry point for the WASM application
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Initialize better panic messages
    console_error_panic_hook::set_once();

    let window = web_sys::window().expect("no global `window` exists");
    let document = window.document().expect("should have a document on window");

    // Modals, styles and other chrome the scripts own outright
    ui::setup::ensure_chrome(&document)?;

    // Adopt the server-rendered dropdowns and profile table into state
    // before anything triggers a render pass that rebuilds them.
    components::address_book::seed_state(&document);
    components::profile_form::seed_state(&document);

    // Wire every form/button present on this page
    ui::events::setup_ui_event_handlers(&document)?;

    // A `?template=` query string preselects a template on the compose page
    if let Ok(search) = window.location().search() {
        if let Ok(params) = web_sys::UrlSearchParams::new_with_str(&search) {
            if let Some(name) = params.get("template") {
                if !name.is_empty() {
                    state::dispatch_global_message(messages::Message::LoadTemplate(name));
                }
            }
        }
    }

    state::AppState::refresh_ui_after_state_change()?;

    Ok(())
}
