//! Connection-test modal: a status line plus the server capability list
//! reported by a successful EHLO.

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::components::modal;
use crate::dom_utils;
use crate::messages::Message;
use crate::state::{AppState, ConnectionTest};

const MODAL_ID: &str = "connectionModal";

/// Build the modal skeleton once.  Ids match the server-rendered markup so we
/// adopt an existing modal when the page ships one.
pub fn ensure(document: &Document) -> Result<(), JsValue> {
    let (_backdrop, content) = modal::ensure_modal(document, MODAL_ID)?;

    if content.query_selector("#connectionStatus")?.is_none() {
        let title = document.create_element("h2")?;
        title.set_text_content(Some("Connection Test"));
        content.append_child(&title)?;

        let status = document.create_element("div")?;
        status.set_id("connectionStatus");
        content.append_child(&status)?;

        let details = document.create_element("div")?;
        details.set_id("connectionDetails");
        dom_utils::hide(&details);

        let heading = document.create_element("h3")?;
        heading.set_text_content(Some("Server Capabilities"));
        details.append_child(&heading)?;

        let list = document.create_element("ul")?;
        list.set_id("serverCapabilities");
        details.append_child(&list)?;
        content.append_child(&details)?;

        modal::add_close_button(document, &content, Message::CloseConnectionModal)?;
    }

    Ok(())
}

/// Render the modal from state.  Called on every refresh.
pub fn render(state: &AppState, document: &Document) -> Result<(), JsValue> {
    let backdrop = match document.get_element_by_id(MODAL_ID) {
        Some(el) => el,
        None => return Ok(()),
    };

    match &state.connection_test {
        ConnectionTest::Idle => {
            modal::hide(&backdrop);
        }
        ConnectionTest::Running => {
            set_status(document, "Testing connection...", None)?;
            hide_details(document);
            modal::show(&backdrop);
        }
        ConnectionTest::Succeeded {
            message,
            capabilities,
        } => {
            set_status(document, message, Some("alert alert-success"))?;
            render_capabilities(document, capabilities)?;
            modal::show(&backdrop);
        }
        ConnectionTest::Failed { message } => {
            set_status(document, message, Some("alert alert-danger"))?;
            // No capability list on failure.
            hide_details(document);
            modal::show(&backdrop);
        }
    }

    Ok(())
}

fn set_status(document: &Document, text: &str, alert_class: Option<&str>) -> Result<(), JsValue> {
    let status = match document.get_element_by_id("connectionStatus") {
        Some(el) => el,
        None => return Ok(()),
    };
    status.set_inner_html("");
    match alert_class {
        Some(class) => {
            let alert = document.create_element("div")?;
            alert.set_class_name(class);
            alert.set_text_content(Some(text));
            status.append_child(&alert)?;
        }
        None => status.set_text_content(Some(text)),
    }
    Ok(())
}

fn render_capabilities(document: &Document, capabilities: &[String]) -> Result<(), JsValue> {
    let list = match document.get_element_by_id("serverCapabilities") {
        Some(el) => el,
        None => return Ok(()),
    };
    list.set_inner_html("");
    for capability in capabilities {
        let item: Element = document.create_element("li")?;
        item.set_text_content(Some(capability));
        list.append_child(&item)?;
    }

    if let Some(details) = document.get_element_by_id("connectionDetails") {
        if capabilities.is_empty() {
            dom_utils::hide(&details);
        } else {
            dom_utils::show(&details);
        }
    }
    Ok(())
}

fn hide_details(document: &Document) {
    if let Some(details) = document.get_element_by_id("connectionDetails") {
        dom_utils::hide(&details);
    }
}
