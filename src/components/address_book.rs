//! Saved sender / recipient address books.  The dropdown rows are rendered
//! from state (see `views::render_address_menus`); this module seeds that
//! state from the server-rendered page and wires the save buttons.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, MouseEvent};

use crate::dom_utils::{self, field_value};
use crate::messages::{AddressKind, Message};
use crate::state::{dispatch_global_message, APP_STATE};

/// Read the server-rendered dropdown rows into state so the first render
/// pass owns them.
pub fn seed_state(document: &Document) {
    let senders = collect_emails(document, ".saved-sender");
    let recipients = collect_emails(document, ".saved-recipient");
    APP_STATE.with(|state| {
        let mut state = state.borrow_mut();
        state.saved_senders = senders;
        state.saved_recipients = recipients;
    });
}

fn collect_emails(document: &Document, selector: &str) -> Vec<String> {
    dom_utils::query_all(document, selector)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|el| el.get_attribute("data-email"))
        .filter(|email| !email.is_empty())
        .collect()
}

pub fn setup(document: &Document) -> Result<(), JsValue> {
    setup_save_sender(document)?;
    setup_save_recipient(document)?;

    // When the dropdowns are not state-rendered (no list container ids),
    // wire the server-rendered rows directly.
    if document.get_element_by_id("savedSendersList").is_none() {
        wire_existing_rows(document, AddressKind::Sender)?;
    }
    if document.get_element_by_id("savedRecipientsList").is_none() {
        wire_existing_rows(document, AddressKind::Recipient)?;
    }
    Ok(())
}

fn wire_existing_rows(document: &Document, kind: AddressKind) -> Result<(), JsValue> {
    let (pick_class, delete_class) = row_classes(kind);
    for link in dom_utils::query_all(document, &format!(".{}", pick_class))? {
        if let Some(email) = link.get_attribute("data-email") {
            wire_pick(&link, kind, email)?;
        }
    }
    for button in dom_utils::query_all(document, &format!(".{}", delete_class))? {
        if let Some(email) = button.get_attribute("data-email") {
            wire_delete(&button, kind, email)?;
        }
    }
    Ok(())
}

/// CSS hooks for one address book's dropdown rows.
pub fn row_classes(kind: AddressKind) -> (&'static str, &'static str) {
    match kind {
        AddressKind::Sender => ("saved-sender", "delete-sender-item"),
        AddressKind::Recipient => ("saved-recipient", "delete-recipient-item"),
    }
}

/// Clicking a saved address fills the matching compose field.
pub fn wire_pick(link: &web_sys::Element, kind: AddressKind, email: String) -> Result<(), JsValue> {
    let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |e: MouseEvent| {
        e.prevent_default();
        let msg = match kind {
            AddressKind::Sender => Message::PickSender(email.clone()),
            AddressKind::Recipient => Message::PickRecipient(email.clone()),
        };
        dispatch_global_message(msg);
    }));
    link.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

/// Row delete buttons confirm first, then post the deletion.
pub fn wire_delete(
    button: &web_sys::Element,
    kind: AddressKind,
    email: String,
) -> Result<(), JsValue> {
    let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |e: MouseEvent| {
        e.prevent_default();
        // Keep the dropdown open while the row is being removed.
        e.stop_propagation();
        let window = match web_sys::window() {
            Some(w) => w,
            None => return,
        };
        let question = format!(
            "Are you sure you want to delete this {}: {}?",
            kind.noun(),
            email
        );
        if window.confirm_with_message(&question).unwrap_or(false) {
            dispatch_global_message(Message::DeleteAddress {
                kind,
                email: email.clone(),
            });
        }
    }));
    button.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

fn setup_save_sender(document: &Document) -> Result<(), JsValue> {
    if let Some(button) = document.get_element_by_id("saveSender") {
        let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |e: MouseEvent| {
            e.prevent_default();
            dispatch_global_message(Message::SaveAddress {
                kind: AddressKind::Sender,
                email: field_value("sender"),
            });
        }));
        button.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }
    Ok(())
}

fn setup_save_recipient(document: &Document) -> Result<(), JsValue> {
    if let Some(button) = document.get_element_by_id("saveRecipient") {
        let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |e: MouseEvent| {
            e.prevent_default();
            if let Some(email) = pick_recipient_to_save() {
                dispatch_global_message(Message::SaveAddress {
                    kind: AddressKind::Recipient,
                    email,
                });
            }
        }));
        button.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }
    Ok(())
}

/// The recipients field may hold a comma-separated list; ask which entry to
/// save when there is more than one.
fn pick_recipient_to_save() -> Option<String> {
    let raw = field_value("recipients");
    if raw.is_empty() {
        // Reducer shows the "enter an address first" hint.
        return Some(raw);
    }

    let entries: Vec<String> = raw
        .split(',')
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .collect();

    match entries.len() {
        0 => Some(String::new()),
        1 => Some(entries[0].clone()),
        _ => {
            let window = web_sys::window()?;
            let answer = window
                .prompt_with_message(
                    "Multiple recipients found. Please enter the one you want to save:",
                )
                .ok()??;
            let answer = answer.trim().to_string();
            if answer.is_empty() {
                None
            } else {
                Some(answer)
            }
        }
    }
}
