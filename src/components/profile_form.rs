//! SMTP profile management: the add-profile form, the edit/delete modals and
//! the profiles table on the settings page.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, MouseEvent};

use crate::components::modal;
use crate::dom_utils::{self, field_value, is_checked, set_checked, set_field_value};
use crate::messages::Message;
use crate::models::{Profile, ProfileSubmission, SecurityMode};
use crate::state::{dispatch_global_message, AppState, APP_STATE};

/// Read the profiles the server rendered into the settings table.  Each
/// `.edit-profile` button carries the full profile as data attributes.
pub fn seed_state(document: &Document) {
    let profiles: Vec<Profile> = dom_utils::query_all(document, ".edit-profile")
        .unwrap_or_default()
        .into_iter()
        .filter_map(|el| profile_from_attrs(&el))
        .collect();
    if profiles.is_empty() {
        return;
    }
    APP_STATE.with(|state| {
        state.borrow_mut().profiles = profiles;
    });
}

fn profile_from_attrs(el: &Element) -> Option<Profile> {
    let name = el.get_attribute("data-profile")?;
    let attr_flag = |attr: &str| {
        el.get_attribute(attr)
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
    Some(Profile {
        name,
        server: el.get_attribute("data-server").unwrap_or_default(),
        port: el
            .get_attribute("data-port")
            .and_then(|p| p.parse().ok())
            .unwrap_or(crate::constants::DEFAULT_PORT_PLAIN),
        security: SecurityMode::from_flags(attr_flag("data-tls"), attr_flag("data-ssl")),
        username: el.get_attribute("data-username").unwrap_or_default(),
        no_tls_verify: attr_flag("data-no-tls-verify"),
    })
}

pub fn setup(document: &Document) -> Result<(), JsValue> {
    setup_add_form_security_toggles(document)?;
    setup_add_form_submit(document)?;
    setup_edit_auth_toggle(document)?;
    setup_edit_form_submit(document)?;
    setup_delete_form_submit(document)?;
    // When the table body is state-rendered, render_rows owns the row
    // buttons; otherwise wire the server-rendered ones directly.
    if document.get_element_by_id("profilesList").is_none() {
        for button in dom_utils::query_all(document, ".edit-profile")? {
            if let Some(profile) = profile_from_attrs(&button) {
                wire_edit_button(&button, profile)?;
            }
        }
        for button in dom_utils::query_all(document, ".test-profile")? {
            if let Some(name) = button.get_attribute("data-profile") {
                wire_test_button(&button, name)?;
            }
        }
        for button in dom_utils::query_all(document, ".delete-profile")? {
            if let Some(name) = button.get_attribute("data-profile") {
                wire_delete_button(&button, name)?;
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Add-profile form
// ---------------------------------------------------------------------------

/// TLS and SSL are mutually exclusive; flipping either one also suggests the
/// conventional port for the resulting mode.
fn setup_add_form_security_toggles(document: &Document) -> Result<(), JsValue> {
    for (id, other) in [("use_tls", "use_ssl"), ("use_ssl", "use_tls")] {
        if let Some(checkbox) = document.get_element_by_id(id) {
            let other = other.to_string();
            let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |e: Event| {
                let checked = e
                    .target()
                    .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
                    .map(|i| i.checked())
                    .unwrap_or(false);
                if checked {
                    set_checked(&other, false);
                }
                set_field_value("port", &add_form_security().default_port().to_string());
            }));
            checkbox.add_event_listener_with_callback("change", cb.as_ref().unchecked_ref())?;
            cb.forget();
        }
    }
    Ok(())
}

fn add_form_security() -> SecurityMode {
    SecurityMode::from_flags(is_checked("use_tls"), is_checked("use_ssl"))
}

fn setup_add_form_submit(document: &Document) -> Result<(), JsValue> {
    if let Some(form) = document.get_element_by_id("addProfileForm") {
        let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |e: Event| {
            e.prevent_default();
            let security = add_form_security();
            dispatch_global_message(Message::SubmitProfile(ProfileSubmission {
                name: field_value("name"),
                server: field_value("server"),
                port: parse_port(&field_value("port"), security),
                security,
                username: field_value("username"),
                password: field_value("password"),
                no_tls_verify: is_checked("no_tls_verify"),
            }));
        }));
        form.add_event_listener_with_callback("submit", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }
    Ok(())
}

fn parse_port(raw: &str, security: SecurityMode) -> u16 {
    raw.trim().parse().unwrap_or_else(|_| security.default_port())
}

// ---------------------------------------------------------------------------
// Edit modal
// ---------------------------------------------------------------------------

/// Populate and show the edit modal for a stored profile.  The password field
/// is always cleared; it never round-trips from the server.
pub fn open_edit_modal(profile: &Profile) {
    let document = match web_sys::window().and_then(|w| w.document()) {
        Some(d) => d,
        None => return,
    };

    set_field_value("editProfileName", &profile.name);
    set_field_value("editServer", &profile.server);
    set_field_value("editPort", &profile.port.to_string());

    set_checked("editSecurityTLS", profile.security == SecurityMode::StartTls);
    set_checked("editSecuritySSL", profile.security == SecurityMode::Ssl);
    set_checked("editSecurityNone", profile.security == SecurityMode::None);
    set_checked("editNoTlsVerify", profile.no_tls_verify);

    let has_auth = !profile.username.is_empty();
    set_checked("editUseAuthentication", has_auth);
    set_field_value("editUsername", if has_auth { profile.username.as_str() } else { "" });
    set_field_value("editPassword", "");
    set_auth_fields_visible(&document, has_auth);

    if let Some(dialog) = document.get_element_by_id("editProfileModal") {
        modal::show(&dialog);
    }
}

pub fn hide_edit_modal() {
    if let Some(dialog) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("editProfileModal"))
    {
        modal::hide(&dialog);
    }
}

fn set_auth_fields_visible(document: &Document, visible: bool) {
    if let Some(fields) = document.get_element_by_id("editAuthFields") {
        if visible {
            dom_utils::show(&fields);
        } else {
            dom_utils::hide(&fields);
        }
    }
}

fn setup_edit_auth_toggle(document: &Document) -> Result<(), JsValue> {
    if let Some(toggle) = document.get_element_by_id("editUseAuthentication") {
        let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |e: Event| {
            let checked = e
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
                .map(|i| i.checked())
                .unwrap_or(false);
            let document = match web_sys::window().and_then(|w| w.document()) {
                Some(d) => d,
                None => return,
            };
            set_auth_fields_visible(&document, checked);
            if !checked {
                set_field_value("editUsername", "");
                set_field_value("editPassword", "");
            }
        }));
        toggle.add_event_listener_with_callback("change", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }
    Ok(())
}

fn edit_form_security() -> SecurityMode {
    if is_checked("editSecurityTLS") {
        SecurityMode::StartTls
    } else if is_checked("editSecuritySSL") {
        SecurityMode::Ssl
    } else {
        SecurityMode::None
    }
}

fn setup_edit_form_submit(document: &Document) -> Result<(), JsValue> {
    if let Some(form) = document.get_element_by_id("editProfileForm") {
        let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |e: Event| {
            e.prevent_default();
            let (username, password) = if is_checked("editUseAuthentication") {
                (field_value("editUsername"), field_value("editPassword"))
            } else {
                (String::new(), String::new())
            };
            let security = edit_form_security();
            dispatch_global_message(Message::SubmitProfile(ProfileSubmission {
                name: field_value("editProfileName"),
                server: field_value("editServer"),
                // Custom ports are preserved here: no suggestion on edit.
                port: parse_port(&field_value("editPort"), security),
                security,
                username,
                password,
                no_tls_verify: is_checked("editNoTlsVerify"),
            }));
        }));
        form.add_event_listener_with_callback("submit", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Delete modal
// ---------------------------------------------------------------------------

pub fn open_delete_modal(name: &str) {
    let document = match web_sys::window().and_then(|w| w.document()) {
        Some(d) => d,
        None => return,
    };
    if let Some(label) = document.get_element_by_id("deleteProfileName") {
        label.set_text_content(Some(name));
    }
    if let Some(form) = document.get_element_by_id("deleteProfileForm") {
        let _ = form.set_attribute("data-profile", name);
    }
    if let Some(dialog) = document.get_element_by_id("deleteProfileModal") {
        modal::show(&dialog);
    }
}

pub fn hide_delete_modal() {
    if let Some(dialog) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("deleteProfileModal"))
    {
        modal::hide(&dialog);
    }
}

fn setup_delete_form_submit(document: &Document) -> Result<(), JsValue> {
    if let Some(form) = document.get_element_by_id("deleteProfileForm") {
        let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |e: Event| {
            e.prevent_default();
            let name = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id("deleteProfileForm"))
                .and_then(|f| f.get_attribute("data-profile"))
                .unwrap_or_default();
            if !name.is_empty() {
                dispatch_global_message(Message::DeleteProfile(name));
            }
        }));
        form.add_event_listener_with_callback("submit", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Profiles table
// ---------------------------------------------------------------------------

/// Rebuild the settings-page table body from state.  No-op on pages without
/// the table.
pub fn render_rows(state: &AppState, document: &Document) -> Result<(), JsValue> {
    let tbody = match document.get_element_by_id("profilesList") {
        Some(el) => el,
        None => return Ok(()),
    };
    tbody.set_inner_html("");

    for profile in &state.profiles {
        let row = document.create_element("tr")?;
        row.set_attribute("data-profile", &profile.name)?;

        for text in [
            profile.name.as_str(),
            profile.server.as_str(),
            &profile.port.to_string(),
            security_label(profile.security),
        ] {
            let cell = document.create_element("td")?;
            cell.set_text_content(Some(text));
            row.append_child(&cell)?;
        }

        let actions = document.create_element("td")?;

        let edit = document.create_element("button")?;
        edit.set_class_name("edit-profile");
        edit.set_text_content(Some("Edit"));
        wire_edit_button(&edit, profile.clone())?;
        actions.append_child(&edit)?;

        let test = document.create_element("button")?;
        test.set_class_name("test-profile");
        test.set_text_content(Some("Test"));
        wire_test_button(&test, profile.name.clone())?;
        actions.append_child(&test)?;

        let delete = document.create_element("button")?;
        delete.set_class_name("delete-profile");
        delete.set_text_content(Some("Delete"));
        wire_delete_button(&delete, profile.name.clone())?;
        actions.append_child(&delete)?;

        row.append_child(&actions)?;
        tbody.append_child(&row)?;
    }

    Ok(())
}

fn security_label(mode: SecurityMode) -> &'static str {
    match mode {
        SecurityMode::None => "None",
        SecurityMode::StartTls => "STARTTLS",
        SecurityMode::Ssl => "SSL/TLS",
    }
}

fn wire_edit_button(button: &Element, profile: Profile) -> Result<(), JsValue> {
    let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |_e: MouseEvent| {
        open_edit_modal(&profile);
    }));
    button.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

fn wire_test_button(button: &Element, name: String) -> Result<(), JsValue> {
    let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |_e: MouseEvent| {
        dispatch_global_message(Message::TestConnection(name.clone()));
    }));
    button.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

fn wire_delete_button(button: &Element, name: String) -> Result<(), JsValue> {
    let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |_e: MouseEvent| {
        open_delete_modal(&name);
    }));
    button.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}
