//! dom_utils.rs – thin helper layer for repetitive DOM operations.
//!
//! Small, ergonomic wrappers for the show / hide / fill / disable patterns the
//! form wiring needs, so `set_attribute("style", …)` calls don't get sprinkled
//! across the code-base.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlInputElement, HtmlTextAreaElement};

/// Remove the `hidden` class so the element becomes visible.
pub fn show(el: &Element) {
    let _ = el.class_list().remove_1("hidden");
    let _ = el.class_list().add_1("visible");
}

/// Hide the element by toggling CSS classes.
pub fn hide(el: &Element) {
    let _ = el.class_list().remove_1("visible");
    let _ = el.class_list().add_1("hidden");
}

fn document() -> Option<Document> {
    web_sys::window().and_then(|w| w.document())
}

/// Read the value of an `<input>` or `<textarea>` by id.  Missing elements
/// read as the empty string so submit handlers can collect optional fields
/// without peppering the call site with Options.
pub fn field_value(id: &str) -> String {
    let el = match document().and_then(|d| d.get_element_by_id(id)) {
        Some(el) => el,
        None => return String::new(),
    };
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        return input.value();
    }
    if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        return area.value();
    }
    String::new()
}

/// Write the value of an `<input>` or `<textarea>` by id.  No-op when the
/// element is absent (the settings page has no compose fields and vice versa).
pub fn set_field_value(id: &str, value: &str) {
    let el = match document().and_then(|d| d.get_element_by_id(id)) {
        Some(el) => el,
        None => return,
    };
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        area.set_value(value);
    }
}

/// Is the checkbox with this id currently checked?
pub fn is_checked(id: &str) -> bool {
    document()
        .and_then(|d| d.get_element_by_id(id))
        .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
        .map(|i| i.checked())
        .unwrap_or(false)
}

pub fn set_checked(id: &str, checked: bool) {
    if let Some(input) = document()
        .and_then(|d| d.get_element_by_id(id))
        .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
    {
        input.set_checked(checked);
    }
}

/// Enable/disable an input, textarea or button by id.
pub fn set_disabled(id: &str, disabled: bool) {
    let el = match document().and_then(|d| d.get_element_by_id(id)) {
        Some(el) => el,
        None => return,
    };
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.set_disabled(disabled);
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        area.set_disabled(disabled);
    } else if let Some(button) = el.dyn_ref::<HtmlButtonElement>() {
        button.set_disabled(disabled);
    }
}

/// Swap a button into its busy state: disabled, spinner, busy label.
pub fn set_button_busy(button: &HtmlButtonElement, label: &str) {
    button.set_disabled(true);
    button.set_inner_html(&format!("<span class=\"spinner\"></span>{}", label));
}

/// Restore a button to its idle state.
pub fn set_button_idle(button: &HtmlButtonElement, label: &str) {
    button.set_disabled(false);
    button.set_inner_html(label);
}

/// Fetch a `<button>` element by id, if present.
pub fn button(id: &str) -> Option<HtmlButtonElement> {
    document()
        .and_then(|d| d.get_element_by_id(id))
        .and_then(|e| e.dyn_into::<HtmlButtonElement>().ok())
}

/// Collect every element matching `selector` into a Vec, since `NodeList`
/// has no iterator on this side of the boundary.
pub fn query_all(
    document: &Document,
    selector: &str,
) -> Result<Vec<Element>, wasm_bindgen::JsValue> {
    let nodes = document.query_selector_all(selector)?;
    let mut out = Vec::with_capacity(nodes.length() as usize);
    for i in 0..nodes.length() {
        if let Some(node) = nodes.item(i) {
            if let Ok(element) = node.dyn_into::<Element>() {
                out.push(element);
            }
        }
    }
    Ok(out)
}
