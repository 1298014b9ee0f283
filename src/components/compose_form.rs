//! Wiring for the compose-email form: submit interception, the HTML toggle,
//! template prefill, canned test emails and the connection-test button.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Event, HtmlInputElement, HtmlSelectElement, MouseEvent};

use crate::dom_utils::{self, field_value};
use crate::messages::Message;
use crate::models::{BodyType, ComposeSubmission};
use crate::state::dispatch_global_message;

pub fn setup(document: &Document) -> Result<(), JsValue> {
    setup_submit_handler(document)?;
    setup_html_toggle(document)?;
    setup_profile_select(document)?;
    setup_template_select(document)?;
    setup_test_connection_button(document)?;
    setup_special_test_links(document)?;
    setup_reset_button(document)?;
    Ok(())
}

/// Snapshot the form fields at submit time.
fn collect_submission(document: &Document) -> ComposeSubmission {
    let body_type = if dom_utils::is_checked("htmlToggle") {
        BodyType::Html
    } else {
        BodyType::Plain
    };
    ComposeSubmission {
        profile: select_value(document, "profile"),
        sender: field_value("sender"),
        recipients: field_value("recipients"),
        cc: field_value("cc"),
        bcc: field_value("bcc"),
        subject: field_value("subject"),
        body: field_value("body"),
        body_type,
    }
}

fn select_value(document: &Document, id: &str) -> String {
    document
        .get_element_by_id(id)
        .and_then(|e| e.dyn_into::<HtmlSelectElement>().ok())
        .map(|s| s.value())
        .unwrap_or_default()
}

/// `<form id="emailForm">` – intercepted so the guard sees every attempt.
fn setup_submit_handler(document: &Document) -> Result<(), JsValue> {
    if let Some(form) = document.get_element_by_id("emailForm") {
        let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |e: Event| {
            e.prevent_default();
            let document = match web_sys::window().and_then(|w| w.document()) {
                Some(d) => d,
                None => return,
            };
            dispatch_global_message(Message::SubmitCompose(collect_submission(&document)));
        }));
        form.add_event_listener_with_callback("submit", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }
    Ok(())
}

/// `<input type="checkbox" id="htmlToggle">`
fn setup_html_toggle(document: &Document) -> Result<(), JsValue> {
    if let Some(toggle) = document.get_element_by_id("htmlToggle") {
        let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |e: Event| {
            let checked = e
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                .map(|i| i.checked())
                .unwrap_or(false);
            let body_type = if checked { BodyType::Html } else { BodyType::Plain };
            dispatch_global_message(Message::SetBodyType(body_type));
        }));
        toggle.add_event_listener_with_callback("change", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }
    Ok(())
}

/// Keep the selected profile mirrored in state; the test-data precondition
/// reads it.
fn setup_profile_select(document: &Document) -> Result<(), JsValue> {
    if let Some(select) = document.get_element_by_id("profile") {
        let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |e: Event| {
            let value = e
                .target()
                .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
                .map(|s| s.value())
                .unwrap_or_default();
            dispatch_global_message(Message::SelectProfile(value));
        }));
        select.add_event_listener_with_callback("change", cb.as_ref().unchecked_ref())?;
        cb.forget();

        // Seed the initial selection (the server may pre-select a profile).
        let initial = select_value(document, "profile");
        if !initial.is_empty() {
            dispatch_global_message(Message::SelectProfile(initial));
        }
    }
    Ok(())
}

/// `<select id="template">` – picking a template prefills subject/body.
fn setup_template_select(document: &Document) -> Result<(), JsValue> {
    if let Some(select) = document.get_element_by_id("template") {
        let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |e: Event| {
            let value = e
                .target()
                .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
                .map(|s| s.value())
                .unwrap_or_default();
            dispatch_global_message(Message::LoadTemplate(value));
        }));
        select.add_event_listener_with_callback("change", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }
    Ok(())
}

fn setup_test_connection_button(document: &Document) -> Result<(), JsValue> {
    if let Some(button) = document.get_element_by_id("testConnection") {
        let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |_e: MouseEvent| {
            let document = match web_sys::window().and_then(|w| w.document()) {
                Some(d) => d,
                None => return,
            };
            dispatch_global_message(Message::TestConnection(select_value(&document, "profile")));
        }));
        button.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }
    Ok(())
}

/// Menu entries like `<a class="special-test" data-test="eicar">` load canned
/// field values from the server.
fn setup_special_test_links(document: &Document) -> Result<(), JsValue> {
    for element in dom_utils::query_all(document, ".special-test")? {
        let test_type = element.get_attribute("data-test").unwrap_or_default();
        let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |e: MouseEvent| {
            e.prevent_default();
            dispatch_global_message(Message::LoadTestData(test_type.clone()));
        }));
        element.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }
    Ok(())
}

/// A form reset also drops any pending special attachment.
fn setup_reset_button(document: &Document) -> Result<(), JsValue> {
    if let Some(button) = document.query_selector("#emailForm button[type='reset']")? {
        let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |_e: MouseEvent| {
            dispatch_global_message(Message::ClearSpecialAttachment);
        }));
        button.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }
    Ok(())
}
