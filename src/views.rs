// State → DOM render pass.  Every function here is idempotent and cheap, so
// the whole set runs after each dispatch.

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::constants::{SEND_BUTTON_BUSY_LABEL, SEND_BUTTON_IDLE_LABEL};
use crate::dom_utils;
use crate::messages::AddressKind;
use crate::models::BodyType;
use crate::state::AppState;

pub fn render_app(state: &AppState, document: &Document) -> Result<(), JsValue> {
    render_send_button(state);
    render_template_loading(state);
    render_body_mode(state, document)?;
    render_attachment_badge(state, document)?;
    render_status_modal(state, document)?;
    render_address_menus(state, document)?;
    crate::components::connection_modal::render(state, document)?;
    crate::components::template_viewer::render(state, document)?;
    crate::components::profile_form::render_rows(state, document)?;
    Ok(())
}

/// The send control mirrors the submission guard: busy and disabled while a
/// request is outstanding (and through the post-response delay).
fn render_send_button(state: &AppState) {
    if let Some(button) = dom_utils::button("sendButton") {
        if state.submission.is_in_flight() {
            dom_utils::set_button_busy(&button, SEND_BUTTON_BUSY_LABEL);
        } else {
            dom_utils::set_button_idle(&button, SEND_BUTTON_IDLE_LABEL);
        }
    }
}

fn render_template_loading(state: &AppState) {
    dom_utils::set_disabled("subject", state.template_loading);
    dom_utils::set_disabled("body", state.template_loading);
}

/// Keep the toggle, the hidden wire field and the textarea styling in sync
/// with the body-type state.
fn render_body_mode(state: &AppState, document: &Document) -> Result<(), JsValue> {
    dom_utils::set_field_value("body_type", state.body_type.as_str());
    dom_utils::set_checked("htmlToggle", state.body_type == BodyType::Html);

    if let Some(body) = document.get_element_by_id("body") {
        if state.body_type == BodyType::Html {
            body.class_list().add_1("html-mode")?;
        } else {
            body.class_list().remove_1("html-mode")?;
        }
    }
    Ok(())
}

fn render_attachment_badge(state: &AppState, document: &Document) -> Result<(), JsValue> {
    let badge = match document.get_element_by_id("specialAttachmentBadge") {
        Some(el) => el,
        None => return Ok(()),
    };

    match &state.special_attachment {
        Some(attachment) => {
            badge.set_text_content(Some(&attachment.display_name()));
            badge.class_list().remove_1("d-none")?;
            badge.class_list().add_1("d-inline-flex")?;
            if attachment.is_hazard() {
                badge.class_list().remove_1("bg-info")?;
                badge.class_list().add_1("bg-warning")?;
            } else {
                badge.class_list().remove_1("bg-warning")?;
                badge.class_list().add_1("bg-info")?;
            }
        }
        None => {
            badge.class_list().add_1("d-none")?;
            badge.class_list().remove_1("d-inline-flex")?;
        }
    }
    Ok(())
}

fn render_status_modal(state: &AppState, document: &Document) -> Result<(), JsValue> {
    let backdrop = match document.get_element_by_id("statusModal") {
        Some(el) => el,
        None => return Ok(()),
    };

    let status = match &state.send_status {
        Some(status) => status,
        None => {
            crate::components::modal::hide(&backdrop);
            return Ok(());
        }
    };

    if let Some(header) = document.get_element_by_id("statusModalHeader") {
        if status.success {
            header.class_list().remove_1("bg-danger")?;
            header.class_list().add_1("bg-success")?;
        } else {
            header.class_list().remove_1("bg-success")?;
            header.class_list().add_1("bg-danger")?;
        }
    }
    if let Some(title) = document.get_element_by_id("statusModalTitle") {
        title.set_text_content(Some(if status.success { "Success" } else { "Failed" }));
    }
    if let Some(message) = document.get_element_by_id("statusMessage") {
        message.set_text_content(Some(&status.message));
    }

    crate::components::modal::show(&backdrop);
    Ok(())
}

fn render_address_menus(state: &AppState, document: &Document) -> Result<(), JsValue> {
    render_address_menu(
        document,
        "savedSendersList",
        &state.saved_senders,
        AddressKind::Sender,
    )?;
    render_address_menu(
        document,
        "savedRecipientsList",
        &state.saved_recipients,
        AddressKind::Recipient,
    )?;
    Ok(())
}

/// Rebuild one dropdown list.  Rows get fresh closures every render, which is
/// fine: the old nodes (and their listeners) are dropped with the subtree.
fn render_address_menu(
    document: &Document,
    list_id: &str,
    emails: &[String],
    kind: AddressKind,
) -> Result<(), JsValue> {
    let list = match document.get_element_by_id(list_id) {
        Some(el) => el,
        None => return Ok(()),
    };
    list.set_inner_html("");

    let (pick_class, delete_class) = crate::components::address_book::row_classes(kind);

    for email in emails {
        let item = document.create_element("li")?;

        let link: Element = document.create_element("a")?;
        link.set_attribute("href", "#")?;
        link.set_class_name(pick_class);
        link.set_attribute("data-email", email)?;
        link.set_text_content(Some(email));
        crate::components::address_book::wire_pick(&link, kind, email.clone())?;
        item.append_child(&link)?;

        let delete = document.create_element("button")?;
        delete.set_class_name(delete_class);
        delete.set_attribute("data-email", email)?;
        delete.set_inner_html("&times;");
        crate::components::address_book::wire_delete(&delete, kind, email.clone())?;
        item.append_child(&delete)?;

        list.append_child(&item)?;
    }
    Ok(())
}
