//! Aggregates the per-component event wiring.
//!
//! Entry point – call once after the page chrome exists.  Every component
//! checks for its own elements, so the same call works on the compose,
//! settings and templates pages.

use wasm_bindgen::prelude::*;
use web_sys::Document;

use crate::components::{address_book, compose_form, profile_form, template_viewer};

pub fn setup_ui_event_handlers(document: &Document) -> Result<(), JsValue> {
    compose_form::setup(document)?;
    address_book::setup(document)?;
    profile_form::setup(document)?;
    template_viewer::setup(document)?;
    Ok(())
}
