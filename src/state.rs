use std::cell::RefCell;

use wasm_bindgen::JsValue;

use crate::messages::{Command, Message};
use crate::models::{BodyType, Profile, SpecialAttachment, Template};
use crate::submission::SubmissionGuard;
use crate::update::update;

/// Outcome of the last send attempt, shown in the status modal.
#[derive(Debug, Clone, PartialEq)]
pub struct SendStatus {
    pub success: bool,
    pub message: String,
}

/// Lifecycle of the connection-test modal.
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionTest {
    Idle,
    Running,
    Succeeded {
        message: String,
        capabilities: Vec<String>,
    },
    Failed {
        message: String,
    },
}

// Store global application state
pub struct AppState {
    // Compose form
    pub submission: SubmissionGuard,
    pub body_type: BodyType,
    pub selected_profile: Option<String>,
    pub special_attachment: Option<SpecialAttachment>,
    pub template_loading: bool,
    pub send_status: Option<SendStatus>,

    // Address book dropdowns
    pub saved_senders: Vec<String>,
    pub saved_recipients: Vec<String>,

    // SMTP profiles known to this page (seeded from the server-rendered DOM)
    pub profiles: Vec<Profile>,

    // Connection-test modal
    pub connection_test: ConnectionTest,

    // Template viewer modal: (name, template)
    pub template_view: Option<(String, Template)>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            submission: SubmissionGuard::new(),
            body_type: BodyType::Plain,
            selected_profile: None,
            special_attachment: None,
            template_loading: false,
            send_status: None,
            saved_senders: Vec::new(),
            saved_recipients: Vec::new(),
            profiles: Vec::new(),
            connection_test: ConnectionTest::Idle,
            template_view: None,
        }
    }

    /// Run the reducer for one message and hand back the commands it
    /// produced.  Callers must execute them only after the state borrow has
    /// been dropped.
    pub fn dispatch(&mut self, msg: Message) -> Vec<Command> {
        update(self, msg)
    }

    /// Re-render everything that is derived from state.  Safe to call after
    /// every dispatch; render functions are cheap and idempotent.
    pub fn refresh_ui_after_state_change() -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        APP_STATE.with(|state| {
            let state = state.borrow();
            crate::views::render_app(&state, &document)
        })
    }
}

thread_local! {
    pub static APP_STATE: RefCell<AppState> = RefCell::new(AppState::new());
}

/// Single entry point for every UI event and async completion.  Borrows the
/// state for the reducer only, then executes the returned commands and
/// refreshes the view.
pub fn dispatch_global_message(msg: Message) {
    let commands = APP_STATE.with(|state| {
        let mut state = state.borrow_mut();
        state.dispatch(msg)
    });

    // The mutable borrow is gone; commands may dispatch further messages.
    for command in commands {
        crate::command_executors::execute_command(command);
    }

    if let Err(e) = AppState::refresh_ui_after_state_change() {
        web_sys::console::warn_1(&format!("Failed to refresh UI after action: {:?}", e).into());
    }
}
