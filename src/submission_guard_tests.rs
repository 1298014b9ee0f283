use wasm_bindgen_test::*;

use crate::messages::{Command, Message};
use crate::models::{ApiResponse, BodyType, ComposeSubmission, ConnectionTestResponse, Template};
use crate::state::{AppState, ConnectionTest};
use crate::update::update;

wasm_bindgen_test_configure!(run_in_browser);

fn submission() -> ComposeSubmission {
    ComposeSubmission {
        profile: "default".to_string(),
        sender: "a@x.com".to_string(),
        recipients: "b@x.com".to_string(),
        cc: String::new(),
        bcc: String::new(),
        subject: "Hi".to_string(),
        body: "hello".to_string(),
        body_type: BodyType::Plain,
    }
}

fn count_send_commands(commands: &[Command]) -> usize {
    commands
        .iter()
        .filter(|c| matches!(c, Command::SendEmail(_)))
        .count()
}

#[wasm_bindgen_test]
fn rapid_repeat_submits_issue_exactly_one_request() {
    let mut state = AppState::new();

    let first = update(&mut state, Message::SubmitCompose(submission()));
    assert_eq!(count_send_commands(&first), 1, "first submit sends");
    assert!(state.submission.is_in_flight());

    for _ in 0..5 {
        let repeat = update(&mut state, Message::SubmitCompose(submission()));
        assert!(repeat.is_empty(), "repeat submits are dropped silently");
    }
}

#[wasm_bindgen_test]
fn server_response_holds_guard_through_the_delay() {
    let mut state = AppState::new();
    update(&mut state, Message::SubmitCompose(submission()));

    let commands = update(
        &mut state,
        Message::ComposeResponse(ApiResponse {
            success: true,
            message: Some("sent".to_string()),
            error: None,
        }),
    );

    // The control only re-enables once the delayed reset fires.
    assert!(state.submission.is_in_flight());
    assert!(commands
        .iter()
        .any(|c| matches!(c, Command::ScheduleSubmissionReset)));

    let status = state.send_status.as_ref().expect("status set");
    assert!(status.success);
    assert_eq!(status.message, "sent");

    update(&mut state, Message::ResetSubmission);
    assert!(!state.submission.is_in_flight());
}

#[wasm_bindgen_test]
fn failure_response_surfaces_server_message() {
    let mut state = AppState::new();
    update(&mut state, Message::SubmitCompose(submission()));
    update(
        &mut state,
        Message::ComposeResponse(ApiResponse {
            success: false,
            message: Some("relay rejected".to_string()),
            error: None,
        }),
    );

    let status = state.send_status.as_ref().expect("status set");
    assert!(!status.success);
    assert_eq!(status.message, "relay rejected");
}

#[wasm_bindgen_test]
fn transport_failure_resets_immediately_without_retry() {
    let mut state = AppState::new();
    update(&mut state, Message::SubmitCompose(submission()));

    let commands = update(
        &mut state,
        Message::ComposeTransportFailed("connection refused".to_string()),
    );

    assert!(!state.submission.is_in_flight(), "immediate reset");
    assert_eq!(count_send_commands(&commands), 0, "no automatic retry");
    let status = state.send_status.as_ref().expect("status set");
    assert!(!status.success);

    // The form stays usable for another attempt.
    let retry = update(&mut state, Message::SubmitCompose(submission()));
    assert_eq!(count_send_commands(&retry), 1);
}

#[wasm_bindgen_test]
fn html_submission_carries_wrapped_body_and_token() {
    let mut state = AppState::new();
    let mut sub = submission();
    sub.body = "hello\nworld".to_string();
    sub.body_type = BodyType::Html;

    let commands = update(&mut state, Message::SubmitCompose(sub));
    let payload = commands
        .iter()
        .find_map(|c| match c {
            Command::SendEmail(payload) => Some(payload),
            _ => None,
        })
        .expect("SendEmail command");

    assert!(payload.body.starts_with("<!DOCTYPE html>"));
    assert!(payload.body.contains("hello<br>world"));
    assert_eq!(payload.body_type, BodyType::Html);
    assert_eq!(Some(payload.client_id.as_str()), state.submission.token());
    assert!(payload.client_id.contains('-'));
}

#[wasm_bindgen_test]
fn plain_submission_body_is_untouched() {
    let mut state = AppState::new();
    let mut sub = submission();
    sub.body = "line one\nline two".to_string();

    let commands = update(&mut state, Message::SubmitCompose(sub));
    let payload = commands
        .iter()
        .find_map(|c| match c {
            Command::SendEmail(payload) => Some(payload),
            _ => None,
        })
        .expect("SendEmail command");

    assert_eq!(payload.body, "line one\nline two");
    assert_eq!(payload.body_type, BodyType::Plain);
}

#[wasm_bindgen_test]
fn connection_failure_shows_error_without_capabilities() {
    let mut state = AppState::new();

    update(&mut state, Message::TestConnection("default".to_string()));
    assert_eq!(state.connection_test, ConnectionTest::Running);

    update(
        &mut state,
        Message::ConnectionTested(ConnectionTestResponse {
            success: false,
            message: None,
            error: Some("timeout".to_string()),
            capabilities: Vec::new(),
        }),
    );

    match &state.connection_test {
        ConnectionTest::Failed { message } => assert!(message.contains("timeout")),
        other => panic!("expected failure state, got {:?}", other),
    }
}

#[wasm_bindgen_test]
fn connection_success_keeps_capabilities() {
    let mut state = AppState::new();
    update(&mut state, Message::TestConnection("default".to_string()));
    update(
        &mut state,
        Message::ConnectionTested(ConnectionTestResponse {
            success: true,
            message: Some("Connected to smtp.example.com".to_string()),
            error: None,
            capabilities: vec!["STARTTLS".to_string(), "SIZE 35882577".to_string()],
        }),
    );

    match &state.connection_test {
        ConnectionTest::Succeeded {
            message,
            capabilities,
        } => {
            assert!(message.contains("smtp.example.com"));
            assert_eq!(capabilities.len(), 2);
        }
        other => panic!("expected success state, got {:?}", other),
    }
}

#[wasm_bindgen_test]
fn test_data_requires_a_selected_profile() {
    let mut state = AppState::new();

    let commands = update(&mut state, Message::LoadTestData("eicar".to_string()));
    assert!(
        !commands.iter().any(|c| matches!(c, Command::FetchTestData(_))),
        "no request without a profile"
    );

    state.selected_profile = Some("default".to_string());
    let commands = update(&mut state, Message::LoadTestData("eicar".to_string()));
    assert!(commands.iter().any(|c| matches!(c, Command::FetchTestData(_))));
}

#[wasm_bindgen_test]
fn template_load_toggles_loading_and_body_type() {
    let mut state = AppState::new();

    let commands = update(&mut state, Message::LoadTemplate("welcome".to_string()));
    assert!(state.template_loading);
    assert!(commands.iter().any(|c| matches!(c, Command::FetchTemplate(_))));

    update(
        &mut state,
        Message::TemplateLoaded(Template {
            name: Some("welcome".to_string()),
            subject: Some("Hi".to_string()),
            body: "<p>x</p>".to_string(),
            body_type: BodyType::Html,
        }),
    );
    assert!(!state.template_loading);
    assert_eq!(state.body_type, BodyType::Html);
}

#[wasm_bindgen_test]
fn empty_template_selection_is_ignored() {
    let mut state = AppState::new();
    let commands = update(&mut state, Message::LoadTemplate(String::new()));
    assert!(commands.is_empty());
    assert!(!state.template_loading);
}
