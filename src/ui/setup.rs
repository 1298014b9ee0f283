use wasm_bindgen::prelude::*;
use web_sys::Document;

use crate::components::{connection_modal, modal, template_viewer};
use crate::messages::Message;

/// Create the page chrome the scripts own outright: the result/status modal,
/// the connection-test modal, the template viewer and their shared styles.
/// Server-rendered markup with the same ids is adopted instead of duplicated.
pub fn ensure_chrome(document: &Document) -> Result<(), JsValue> {
    ensure_styles(document)?;
    ensure_status_modal(document)?;
    connection_modal::ensure(document)?;
    template_viewer::ensure(document)?;
    Ok(())
}

/// Modal shown with the `/send_email` outcome.
fn ensure_status_modal(document: &Document) -> Result<(), JsValue> {
    let (_backdrop, content) = modal::ensure_modal(document, "statusModal")?;

    if content.query_selector("#statusMessage")?.is_none() {
        let header = document.create_element("div")?;
        header.set_id("statusModalHeader");
        header.set_class_name("modal-header");

        let title = document.create_element("h2")?;
        title.set_id("statusModalTitle");
        header.append_child(&title)?;
        content.append_child(&header)?;

        let message = document.create_element("p")?;
        message.set_id("statusMessage");
        content.append_child(&message)?;

        modal::add_close_button(document, &content, Message::CloseStatusModal)?;
    }

    Ok(())
}

/// Minimal styling for elements this crate creates itself.  Pages that ship
/// their own `.modal` / `.hidden` rules simply win on specificity order.
fn ensure_styles(document: &Document) -> Result<(), JsValue> {
    if document.get_element_by_id("app-styles").is_some() {
        return Ok(());
    }

    let css = "
.hidden{display:none !important}
.visible{display:block}
.modal{position:fixed;inset:0;background:rgba(0,0,0,.4);z-index:1050;display:flex;align-items:flex-start;justify-content:center;padding-top:10vh}
.modal.hidden{display:none !important}
.modal-content{background:#fff;border-radius:6px;min-width:320px;max-width:600px;padding:16px;position:relative}
.modal-content .close{position:absolute;top:8px;right:12px;cursor:pointer;font-size:20px}
.alert{padding:8px 12px;border-radius:4px}
.alert-success{background:#dcfce7;color:#166534}
.alert-danger{background:#fee2e2;color:#991b1b}
";

    let style = document.create_element("style")?;
    style.set_id("app-styles");
    style.set_text_content(Some(css));
    if let Some(head) = document.query_selector("head")? {
        head.append_child(&style)?;
    }
    Ok(())
}
