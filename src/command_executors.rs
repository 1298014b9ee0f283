use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;

use crate::constants::SUBMIT_RESET_DELAY_MS;
use crate::messages::{Command, Message};
use crate::models::{ApiResponse, ConnectionTestResponse, TemplateResponse, TestDataResponse};
use crate::network::ApiClient;
use crate::state::dispatch_global_message;

/// Run one side effect.  Network commands spawn a future that dispatches a
/// completion message; nothing here touches `APP_STATE` directly.
pub fn execute_command(cmd: Command) {
    match cmd {
        Command::SendMessage(msg) => dispatch_global_message(msg),

        Command::UpdateUI(f) => f(),

        Command::NoOp => {}

        Command::SendEmail(payload) => {
            spawn_local(async move {
                match ApiClient::send_email(&payload).await {
                    Ok(text) => match serde_json::from_str::<ApiResponse>(&text) {
                        Ok(resp) => dispatch_global_message(Message::ComposeResponse(resp)),
                        Err(e) => dispatch_global_message(Message::ComposeTransportFailed(
                            format!("Failed to parse response: {}", e),
                        )),
                    },
                    Err(e) => dispatch_global_message(Message::ComposeTransportFailed(format!(
                        "{:?}",
                        e
                    ))),
                }
            });
        }

        Command::ScheduleSubmissionReset => {
            spawn_local(async {
                TimeoutFuture::new(SUBMIT_RESET_DELAY_MS).await;
                dispatch_global_message(Message::ResetSubmission);
            });
        }

        Command::FetchTemplate(name) => {
            spawn_local(async move {
                match fetch_template(&name).await {
                    Ok(template) => dispatch_global_message(Message::TemplateLoaded(template)),
                    Err(e) => dispatch_global_message(Message::TemplateLoadFailed(e)),
                }
            });
        }

        Command::FetchTemplateView(name) => {
            spawn_local(async move {
                match fetch_template(&name).await {
                    Ok(template) => {
                        dispatch_global_message(Message::TemplateViewLoaded { name, template })
                    }
                    Err(e) => dispatch_global_message(Message::TemplateLoadFailed(e)),
                }
            });
        }

        Command::FetchTestData(test_type) => {
            spawn_local(async move {
                match ApiClient::get_test_data(&test_type).await {
                    Ok(text) => match serde_json::from_str::<TestDataResponse>(&text) {
                        Ok(resp) => {
                            if let (true, Some(data)) = (resp.success, resp.test_data) {
                                dispatch_global_message(Message::TestDataLoaded(data));
                            } else {
                                dispatch_global_message(Message::TestDataLoadFailed(
                                    resp.message.unwrap_or_else(|| "Unknown error".to_string()),
                                ));
                            }
                        }
                        Err(e) => dispatch_global_message(Message::TestDataLoadFailed(format!(
                            "Failed to parse test data: {}",
                            e
                        ))),
                    },
                    Err(e) => {
                        dispatch_global_message(Message::TestDataLoadFailed(format!("{:?}", e)))
                    }
                }
            });
        }

        Command::TestConnection(profile) => {
            spawn_local(async move {
                match ApiClient::test_connection(&profile).await {
                    Ok(text) => match serde_json::from_str::<ConnectionTestResponse>(&text) {
                        Ok(resp) => dispatch_global_message(Message::ConnectionTested(resp)),
                        Err(e) => dispatch_global_message(Message::ConnectionTestFailed(format!(
                            "Failed to parse response: {}",
                            e
                        ))),
                    },
                    Err(e) => {
                        dispatch_global_message(Message::ConnectionTestFailed(format!("{:?}", e)))
                    }
                }
            });
        }

        Command::SaveAddress { kind, email } => {
            spawn_local(async move {
                match ApiClient::save_address(kind, &email).await {
                    Ok(text) => match serde_json::from_str::<ApiResponse>(&text) {
                        Ok(resp) if resp.success => {
                            dispatch_global_message(Message::AddressSaved { kind, email })
                        }
                        Ok(resp) => dispatch_global_message(Message::AddressOpFailed(format!(
                            "Error saving {}: {}",
                            kind.noun(),
                            resp.display_text("Unknown error")
                        ))),
                        Err(e) => dispatch_global_message(Message::AddressOpFailed(format!(
                            "Failed to parse response: {}",
                            e
                        ))),
                    },
                    Err(_) => dispatch_global_message(Message::AddressOpFailed(format!(
                        "Error saving {}",
                        kind.noun()
                    ))),
                }
            });
        }

        Command::DeleteAddress { kind, email } => {
            spawn_local(async move {
                match ApiClient::delete_address(kind, &email).await {
                    Ok(text) => match serde_json::from_str::<ApiResponse>(&text) {
                        Ok(resp) if resp.success => {
                            dispatch_global_message(Message::AddressDeleted { kind, email })
                        }
                        Ok(resp) => dispatch_global_message(Message::AddressOpFailed(format!(
                            "Error: {}",
                            resp.display_text(&format!("Failed to delete {}", kind.noun()))
                        ))),
                        Err(e) => dispatch_global_message(Message::AddressOpFailed(format!(
                            "Failed to parse response: {}",
                            e
                        ))),
                    },
                    Err(e) => {
                        web_sys::console::error_1(
                            &format!("Error deleting {}: {:?}", kind.noun(), e).into(),
                        );
                        dispatch_global_message(Message::AddressOpFailed(format!(
                            "Error deleting {} email",
                            kind.noun()
                        )));
                    }
                }
            });
        }

        Command::SubmitProfile(profile) => {
            spawn_local(async move {
                match ApiClient::add_profile(&profile).await {
                    Ok(text) => match serde_json::from_str::<ApiResponse>(&text) {
                        Ok(resp) if resp.success => {
                            dispatch_global_message(Message::ProfileSaved(profile.as_profile()))
                        }
                        Ok(resp) => dispatch_global_message(Message::ProfileSaveFailed(
                            resp.display_text("Unknown error").to_string(),
                        )),
                        Err(e) => dispatch_global_message(Message::ProfileSaveFailed(format!(
                            "Failed to parse response: {}",
                            e
                        ))),
                    },
                    Err(e) => {
                        dispatch_global_message(Message::ProfileSaveFailed(format!("{:?}", e)))
                    }
                }
            });
        }

        Command::DeleteProfile(name) => {
            spawn_local(async move {
                match ApiClient::delete_profile(&name).await {
                    Ok(text) => match serde_json::from_str::<ApiResponse>(&text) {
                        Ok(resp) if resp.success => {
                            dispatch_global_message(Message::ProfileDeleted(name))
                        }
                        Ok(resp) => dispatch_global_message(Message::ProfileDeleteFailed(
                            resp.display_text("Unknown error").to_string(),
                        )),
                        Err(e) => dispatch_global_message(Message::ProfileDeleteFailed(format!(
                            "Failed to parse response: {}",
                            e
                        ))),
                    },
                    Err(e) => {
                        dispatch_global_message(Message::ProfileDeleteFailed(format!("{:?}", e)))
                    }
                }
            });
        }

        Command::DeleteTemplate(name) => {
            spawn_local(async move {
                match ApiClient::delete_template(&name).await {
                    Ok(text) => match serde_json::from_str::<ApiResponse>(&text) {
                        Ok(resp) if resp.success => {
                            dispatch_global_message(Message::TemplateDeleted(name))
                        }
                        Ok(resp) => dispatch_global_message(Message::TemplateOpFailed(
                            resp.display_text("Unknown error").to_string(),
                        )),
                        Err(e) => dispatch_global_message(Message::TemplateOpFailed(format!(
                            "Failed to parse response: {}",
                            e
                        ))),
                    },
                    Err(e) => {
                        dispatch_global_message(Message::TemplateOpFailed(format!("{:?}", e)))
                    }
                }
            });
        }
    }
}

async fn fetch_template(name: &str) -> Result<crate::models::Template, String> {
    let text = ApiClient::get_template(name)
        .await
        .map_err(|e| format!("{:?}", e))?;
    let resp: TemplateResponse =
        serde_json::from_str(&text).map_err(|e| format!("Failed to parse template: {}", e))?;
    match (resp.success, resp.template) {
        (true, Some(template)) => Ok(template),
        _ => Err(resp.message.unwrap_or_else(|| "Unknown error".to_string())),
    }
}
