//! Shared modal helper used by the status, connection-test and template
//! viewer modals.
//!
//! Keeps creation / show / hide logic in one place so feature modals don't
//! duplicate the same boilerplate.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, MouseEvent};

use crate::dom_utils;
use crate::messages::Message;
use crate::state::dispatch_global_message;

/// Ensure a `<div id="{id}" class="modal">…` exists in the DOM and return it.
/// The returned element is the **backdrop** container.  A child `<div
/// class="modal-content">` is created (and returned) if missing so callers
/// can append their specific inner markup.
///
/// Returns `(backdrop, content)`.
pub fn ensure_modal(document: &Document, id: &str) -> Result<(Element, Element), JsValue> {
    let backdrop = if let Some(el) = document.get_element_by_id(id) {
        el
    } else {
        let el = document.create_element("div")?;
        el.set_id(id);
        el.set_class_name("modal");
        dom_utils::hide(&el);
        document
            .body()
            .ok_or_else(|| JsValue::from_str("No body found"))?
            .append_child(&el)?;
        el
    };

    let content = if let Some(el) = backdrop.query_selector(".modal-content")? {
        el
    } else {
        let el = document.create_element("div")?;
        el.set_class_name("modal-content");
        backdrop.append_child(&el)?;
        el
    };

    Ok((backdrop, content))
}

/// Append an `×` close control that dispatches `msg` when clicked.
pub fn add_close_button(
    document: &Document,
    content: &Element,
    msg: Message,
) -> Result<(), JsValue> {
    let close = document.create_element("span")?;
    close.set_class_name("close");
    close.set_inner_html("&times;");

    let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |_e: MouseEvent| {
        dispatch_global_message(msg.clone());
    }));
    close.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();

    content.append_child(&close)?;
    Ok(())
}

/// Show the modal backdrop.
pub fn show(modal_backdrop: &Element) {
    dom_utils::show(modal_backdrop);
}

/// Hide the modal backdrop.
pub fn hide(modal_backdrop: &Element) {
    dom_utils::hide(modal_backdrop);
}
