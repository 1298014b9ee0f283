// The reducer: every state transition lives here.  Handlers dispatch
// messages; this function mutates `AppState` and returns the side effects to
// run once the state borrow is released.

use crate::constants::{GENERIC_SEND_FAILURE, PROFILE_REQUIRED_HINT};
use crate::debug_log;
use crate::messages::{Command, Message};
use crate::models::{BodyType, EmailPayload};
use crate::state::{AppState, ConnectionTest, SendStatus};
use crate::submission;
use crate::toast;
use crate::utils::capitalise_first;

pub fn update(state: &mut AppState, msg: Message) -> Vec<Command> {
    let mut commands = Vec::new();

    match msg {
        // -------------------------------------------------------------
        // Compose submission lifecycle
        // -------------------------------------------------------------
        Message::SubmitCompose(sub) => {
            // Single-flight check happens synchronously, before any future is
            // spawned.  A refused attempt is dropped without any feedback.
            if !state
                .submission
                .try_begin(crate::utils::fresh_submission_token())
            {
                debug_log!("Preventing duplicate submission");
                return commands;
            }
            let token = state.submission.token().unwrap_or_default().to_string();

            state.send_status = None;
            state.body_type = sub.body_type;

            let payload = EmailPayload {
                profile: sub.profile,
                sender: sub.sender,
                recipients: sub.recipients,
                cc: sub.cc,
                bcc: sub.bcc,
                subject: sub.subject,
                body: submission::normalize_body(&sub.body, sub.body_type),
                body_type: sub.body_type,
                client_id: token,
                special_attachment: state.special_attachment.clone(),
            };
            commands.push(Command::SendEmail(payload));
        }

        Message::ComposeResponse(resp) => {
            let fallback = if resp.success {
                "Email sent successfully"
            } else {
                GENERIC_SEND_FAILURE
            };
            state.send_status = Some(SendStatus {
                success: resp.success,
                message: resp.display_text(fallback).to_string(),
            });
            // The guard stays held for the post-response window; the executor
            // dispatches ResetSubmission once the delay elapses.
            commands.push(Command::ScheduleSubmissionReset);
        }

        Message::ComposeTransportFailed(err) => {
            web_sys::console::error_1(&format!("Error sending email: {}", err).into());
            state.submission.finish();
            state.send_status = Some(SendStatus {
                success: false,
                message: GENERIC_SEND_FAILURE.to_string(),
            });
        }

        Message::ResetSubmission => {
            state.submission.finish();
        }

        Message::CloseStatusModal => {
            state.send_status = None;
        }

        // -------------------------------------------------------------
        // Compose form state
        // -------------------------------------------------------------
        Message::SetBodyType(body_type) => {
            state.body_type = body_type;
            debug_log!("Body type set to: {}", body_type.as_str());
        }

        Message::SelectProfile(name) => {
            state.selected_profile = if name.is_empty() { None } else { Some(name) };
        }

        Message::ClearSpecialAttachment => {
            state.special_attachment = None;
        }

        // -------------------------------------------------------------
        // Templates
        // -------------------------------------------------------------
        Message::LoadTemplate(name) => {
            if name.is_empty() {
                return commands;
            }
            state.template_loading = true;
            commands.push(Command::FetchTemplate(name));
        }

        Message::TemplateLoaded(template) => {
            state.template_loading = false;
            state.body_type = template.body_type;
            let subject = template.subject.clone().unwrap_or_default();
            let body = template.body;
            commands.push(Command::update_ui(move || {
                crate::dom_utils::set_field_value("subject", &subject);
                crate::dom_utils::set_field_value("body", &body);
            }));
        }

        Message::TemplateLoadFailed(msg) => {
            state.template_loading = false;
            commands.push(Command::update_ui(move || {
                toast::error(&format!("Error loading template: {}", msg));
            }));
        }

        Message::ViewTemplate(name) => {
            commands.push(Command::FetchTemplateView(name));
        }

        Message::TemplateViewLoaded { name, template } => {
            state.template_view = Some((name, template));
        }

        Message::CloseTemplateModal => {
            state.template_view = None;
        }

        Message::DeleteTemplate(name) => {
            commands.push(Command::DeleteTemplate(name));
        }

        Message::TemplateDeleted(name) => {
            commands.push(Command::update_ui(move || {
                crate::components::template_viewer::remove_template_row(&name);
                toast::success("Template deleted successfully");
            }));
        }

        Message::TemplateOpFailed(msg) => {
            commands.push(Command::update_ui(move || {
                toast::error(&format!("Error deleting template: {}", msg));
            }));
        }

        // -------------------------------------------------------------
        // Canned test data
        // -------------------------------------------------------------
        Message::LoadTestData(test_type) => {
            // The canned emails need server settings from a profile.
            if state.selected_profile.is_none() {
                commands.push(Command::update_ui(|| toast::info(PROFILE_REQUIRED_HINT)));
                return commands;
            }
            commands.push(Command::FetchTestData(test_type));
        }

        Message::TestDataLoaded(data) => {
            if let Some(wire) = data.body_type.as_deref() {
                state.body_type = BodyType::from_wire(wire);
            }
            state.special_attachment = data.special_attachment.clone();
            commands.push(Command::update_ui(move || {
                if let Some(sender) = &data.sender {
                    crate::dom_utils::set_field_value("sender", sender);
                }
                if let Some(recipients) = &data.recipients {
                    crate::dom_utils::set_field_value("recipients", &recipients.join(", "));
                }
                if let Some(cc) = &data.cc {
                    if !cc.is_empty() {
                        crate::dom_utils::set_field_value("cc", &cc.join(", "));
                    }
                }
                if let Some(bcc) = &data.bcc {
                    if !bcc.is_empty() {
                        crate::dom_utils::set_field_value("bcc", &bcc.join(", "));
                    }
                }
                if let Some(subject) = &data.subject {
                    crate::dom_utils::set_field_value("subject", subject);
                }
                if let Some(body) = &data.body {
                    crate::dom_utils::set_field_value("body", body);
                }
                toast::info("Test data loaded. Review and click \"Send Email\" to proceed.");
            }));
        }

        Message::TestDataLoadFailed(msg) => {
            commands.push(Command::update_ui(move || {
                toast::error(&format!("Error loading test data: {}", msg));
            }));
        }

        // -------------------------------------------------------------
        // Connection testing
        // -------------------------------------------------------------
        Message::TestConnection(profile) => {
            if profile.is_empty() {
                commands.push(Command::update_ui(|| {
                    toast::info("Please select an SMTP profile first");
                }));
                return commands;
            }
            state.connection_test = ConnectionTest::Running;
            commands.push(Command::TestConnection(profile));
        }

        Message::ConnectionTested(resp) => {
            state.connection_test = if resp.success {
                ConnectionTest::Succeeded {
                    message: resp
                        .message
                        .clone()
                        .unwrap_or_else(|| "Connection successful".to_string()),
                    capabilities: resp.capabilities.clone(),
                }
            } else {
                ConnectionTest::Failed {
                    message: format!(
                        "Connection failed: {}",
                        resp.error.as_deref().unwrap_or("Unknown error")
                    ),
                }
            };
        }

        Message::ConnectionTestFailed(err) => {
            state.connection_test = ConnectionTest::Failed {
                message: format!("Error testing connection: {}", err),
            };
        }

        Message::CloseConnectionModal => {
            state.connection_test = ConnectionTest::Idle;
        }

        // -------------------------------------------------------------
        // Address book
        // -------------------------------------------------------------
        Message::PickSender(email) => {
            commands.push(Command::update_ui(move || {
                crate::dom_utils::set_field_value("sender", &email);
            }));
        }

        Message::PickRecipient(email) => {
            // Selecting a saved recipient always replaces the whole field.
            commands.push(Command::update_ui(move || {
                crate::dom_utils::set_field_value("recipients", &email);
            }));
        }

        Message::SaveAddress { kind, email } => {
            if email.is_empty() {
                commands.push(Command::update_ui(|| {
                    toast::info("Please enter an email address first");
                }));
                return commands;
            }
            commands.push(Command::SaveAddress { kind, email });
        }

        Message::AddressSaved { kind, email } => {
            let list = match kind {
                crate::messages::AddressKind::Sender => &mut state.saved_senders,
                crate::messages::AddressKind::Recipient => &mut state.saved_recipients,
            };
            if !list.contains(&email) {
                list.push(email);
            }
            commands.push(Command::update_ui(move || {
                toast::success(&format!("{} saved successfully", capitalise_first(kind.noun())));
            }));
        }

        Message::DeleteAddress { kind, email } => {
            commands.push(Command::DeleteAddress { kind, email });
        }

        Message::AddressDeleted { kind, email } => {
            let list = match kind {
                crate::messages::AddressKind::Sender => &mut state.saved_senders,
                crate::messages::AddressKind::Recipient => &mut state.saved_recipients,
            };
            list.retain(|e| e != &email);
            commands.push(Command::update_ui(move || {
                toast::success(&format!(
                    "{} deleted successfully",
                    capitalise_first(kind.noun())
                ));
            }));
        }

        Message::AddressOpFailed(msg) => {
            commands.push(Command::update_ui(move || toast::error(&msg)));
        }

        // -------------------------------------------------------------
        // Profiles
        // -------------------------------------------------------------
        Message::SubmitProfile(profile) => {
            commands.push(Command::SubmitProfile(profile));
        }

        Message::ProfileSaved(profile) => {
            match state.profiles.iter_mut().find(|p| p.name == profile.name) {
                Some(existing) => *existing = profile,
                None => state.profiles.push(profile),
            }
            commands.push(Command::update_ui(|| {
                crate::components::profile_form::hide_edit_modal();
                toast::success("Profile saved successfully");
            }));
        }

        Message::ProfileSaveFailed(msg) => {
            commands.push(Command::update_ui(move || {
                toast::error(&format!("Error updating profile: {}", msg));
            }));
        }

        Message::DeleteProfile(name) => {
            commands.push(Command::DeleteProfile(name));
        }

        Message::ProfileDeleted(name) => {
            state.profiles.retain(|p| p.name != name);
            if state.selected_profile.as_deref() == Some(name.as_str()) {
                state.selected_profile = None;
            }
            commands.push(Command::update_ui(move || {
                crate::components::profile_form::hide_delete_modal();
                toast::success(&format!("Profile {} deleted", name));
            }));
        }

        Message::ProfileDeleteFailed(msg) => {
            commands.push(Command::update_ui(move || {
                toast::error(&format!("Error deleting profile: {}", msg));
            }));
        }
    }

    commands
}
