//! Template management wiring: the read-only viewer modal, the body-type
//! toggle on the add-template form, and template deletion.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlIFrameElement, MouseEvent};

use crate::components::modal;
use crate::dom_utils;
use crate::messages::Message;
use crate::models::BodyType;
use crate::state::{dispatch_global_message, AppState};

const VIEW_MODAL_ID: &str = "viewTemplateModal";

pub fn setup(document: &Document) -> Result<(), JsValue> {
    setup_body_type_toggle(document)?;
    setup_view_buttons(document)?;
    setup_delete_buttons(document)?;
    setup_delete_form(document)?;
    Ok(())
}

/// Build the viewer modal skeleton once.
pub fn ensure(document: &Document) -> Result<(), JsValue> {
    let (backdrop, content) = modal::ensure_modal(document, VIEW_MODAL_ID)?;

    if content.query_selector("#viewTemplateTitle")?.is_none() {
        let title = document.create_element("h2")?;
        title.set_id("viewTemplateTitle");
        content.append_child(&title)?;

        let subject = document.create_element("div")?;
        subject.set_id("viewTemplateSubject");
        content.append_child(&subject)?;

        let body_text = document.create_element("pre")?;
        body_text.set_id("viewTemplateBodyText");
        content.append_child(&body_text)?;

        let body_html = document.create_element("iframe")?;
        body_html.set_id("viewTemplateBodyHtml");
        // Rendered HTML stays inert: no scripts, no same-origin access.
        body_html.set_attribute("sandbox", "")?;
        dom_utils::hide(&body_html);
        content.append_child(&body_html)?;

        let use_button = document.create_element("button")?;
        use_button.set_id("useTemplateButton");
        use_button.set_text_content(Some("Use This Template"));
        content.append_child(&use_button)?;
        setup_use_button(&backdrop, &use_button)?;

        modal::add_close_button(document, &content, Message::CloseTemplateModal)?;
    }

    Ok(())
}

/// Render the viewer modal from state.
pub fn render(state: &AppState, document: &Document) -> Result<(), JsValue> {
    let backdrop = match document.get_element_by_id(VIEW_MODAL_ID) {
        Some(el) => el,
        None => return Ok(()),
    };

    let (name, template) = match &state.template_view {
        Some(view) => view,
        None => {
            modal::hide(&backdrop);
            return Ok(());
        }
    };

    backdrop.set_attribute("data-template", name)?;

    if let Some(title) = document.get_element_by_id("viewTemplateTitle") {
        title.set_text_content(Some(&format!("Template: {}", name)));
    }
    if let Some(subject) = document.get_element_by_id("viewTemplateSubject") {
        subject.set_text_content(Some(
            template.subject.as_deref().unwrap_or("(No subject)"),
        ));
    }

    let body_text = document.get_element_by_id("viewTemplateBodyText");
    let body_html = document.get_element_by_id("viewTemplateBodyHtml");

    match template.body_type {
        BodyType::Html => {
            if let Some(text) = &body_text {
                dom_utils::hide(text);
            }
            if let Some(frame) = &body_html {
                dom_utils::show(frame);
                if let Some(iframe) = frame.dyn_ref::<HtmlIFrameElement>() {
                    iframe.set_srcdoc(&template.body);
                }
            }
        }
        BodyType::Plain => {
            if let Some(frame) = &body_html {
                dom_utils::hide(frame);
            }
            if let Some(text) = &body_text {
                dom_utils::show(text);
                text.set_text_content(Some(&template.body));
            }
        }
    }

    modal::show(&backdrop);
    Ok(())
}

/// Drop the templates-table row for a deleted template, if the page shows one.
pub fn remove_template_row(name: &str) {
    let document = match web_sys::window().and_then(|w| w.document()) {
        Some(d) => d,
        None => return,
    };
    let selector = format!("button.delete-template[data-template=\"{}\"]", name);
    if let Ok(Some(button)) = document.query_selector(&selector) {
        if let Ok(Some(row)) = button.closest("tr") {
            row.remove();
        }
    }
}

// The add-template form keeps a hidden body_type field in sync with its
// toggle, exactly like the compose form does.
fn setup_body_type_toggle(document: &Document) -> Result<(), JsValue> {
    if let Some(toggle) = document.get_element_by_id("template_html_toggle") {
        let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |e: web_sys::Event| {
            let checked = e
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
                .map(|i| i.checked())
                .unwrap_or(false);
            let value = if checked { "html" } else { "plain" };
            dom_utils::set_field_value("template_body_type", value);
        }));
        toggle.add_event_listener_with_callback("change", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }
    Ok(())
}

fn setup_view_buttons(document: &Document) -> Result<(), JsValue> {
    for element in dom_utils::query_all(document, ".view-template")? {
        let name = element.get_attribute("data-template").unwrap_or_default();
        let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |_e: MouseEvent| {
            dispatch_global_message(Message::ViewTemplate(name.clone()));
        }));
        element.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }
    Ok(())
}

fn setup_delete_buttons(document: &Document) -> Result<(), JsValue> {
    for element in dom_utils::query_all(document, ".delete-template")? {
        let name = element.get_attribute("data-template").unwrap_or_default();
        let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |_e: MouseEvent| {
            let document = match web_sys::window().and_then(|w| w.document()) {
                Some(d) => d,
                None => return,
            };
            if let Some(label) = document.get_element_by_id("deleteTemplateName") {
                label.set_text_content(Some(&name));
            }
            if let Some(form) = document.get_element_by_id("deleteTemplateForm") {
                let _ = form.set_attribute("data-template", &name);
            }
            if let Some(dialog) = document.get_element_by_id("deleteTemplateModal") {
                modal::show(&dialog);
            }
        }));
        element.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }
    Ok(())
}

fn setup_delete_form(document: &Document) -> Result<(), JsValue> {
    if let Some(form) = document.get_element_by_id("deleteTemplateForm") {
        let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |e: web_sys::Event| {
            e.prevent_default();
            let document = match web_sys::window().and_then(|w| w.document()) {
                Some(d) => d,
                None => return,
            };
            let name = document
                .get_element_by_id("deleteTemplateForm")
                .and_then(|f| f.get_attribute("data-template"))
                .unwrap_or_default();
            if let Some(dialog) = document.get_element_by_id("deleteTemplateModal") {
                modal::hide(&dialog);
            }
            if !name.is_empty() {
                dispatch_global_message(Message::DeleteTemplate(name));
            }
        }));
        form.add_event_listener_with_callback("submit", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }
    Ok(())
}

fn setup_use_button(backdrop: &Element, button: &Element) -> Result<(), JsValue> {
    let backdrop = backdrop.clone();
    let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |_e: MouseEvent| {
        let name = backdrop.get_attribute("data-template").unwrap_or_default();
        if name.is_empty() {
            return;
        }
        if let Some(window) = web_sys::window() {
            let href = format!("/?template={}", String::from(js_sys::encode_uri_component(&name)));
            let _ = window.location().set_href(&href);
        }
    }));
    button.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

