// The events that can occur in the UI, plus the side effects the reducer may
// request.  Handlers read field values out of the DOM and dispatch messages
// carrying them; completion messages are dispatched by the command executors.

use crate::models::{
    ApiResponse, ComposeSubmission, ConnectionTestResponse, EmailPayload, BodyType, Profile,
    ProfileSubmission, Template, TestData,
};

/// Which of the two address books an operation targets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AddressKind {
    Sender,
    Recipient,
}

impl AddressKind {
    pub fn noun(&self) -> &'static str {
        match self {
            AddressKind::Sender => "sender",
            AddressKind::Recipient => "recipient",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    // Compose submission lifecycle
    SubmitCompose(ComposeSubmission),
    ComposeResponse(ApiResponse),
    ComposeTransportFailed(String),
    ResetSubmission,
    CloseStatusModal,

    // Compose form state
    SetBodyType(BodyType),
    SelectProfile(String),
    ClearSpecialAttachment,

    // Templates
    LoadTemplate(String),
    TemplateLoaded(Template),
    TemplateLoadFailed(String),
    ViewTemplate(String),
    TemplateViewLoaded { name: String, template: Template },
    DeleteTemplate(String),
    TemplateDeleted(String),
    TemplateOpFailed(String),
    CloseTemplateModal,

    // Canned test data
    LoadTestData(String),
    TestDataLoaded(TestData),
    TestDataLoadFailed(String),

    // Connection testing
    TestConnection(String),
    ConnectionTested(ConnectionTestResponse),
    ConnectionTestFailed(String),
    CloseConnectionModal,

    // Address book
    PickSender(String),
    PickRecipient(String),
    SaveAddress { kind: AddressKind, email: String },
    DeleteAddress { kind: AddressKind, email: String },
    AddressSaved { kind: AddressKind, email: String },
    AddressDeleted { kind: AddressKind, email: String },
    AddressOpFailed(String),

    // Profiles
    SubmitProfile(ProfileSubmission),
    ProfileSaved(Profile),
    ProfileSaveFailed(String),
    DeleteProfile(String),
    ProfileDeleted(String),
    ProfileDeleteFailed(String),
}

/// Commands represent side effects that should be executed after state
/// updates.  This separates pure state changes from effects like network
/// calls, timers and imperative DOM writes.
pub enum Command {
    /// Chain another message to be processed
    SendMessage(Message),

    /// Execute a UI update function after state changes
    UpdateUI(Box<dyn FnOnce() + 'static>),

    /// POST the prepared payload to `/send_email`
    SendEmail(EmailPayload),

    /// Re-enable the send control after the post-response delay
    ScheduleSubmissionReset,

    /// Fetch a template to prefill the compose form
    FetchTemplate(String),

    /// Fetch a template for the read-only viewer modal
    FetchTemplateView(String),

    /// Fetch canned test data for a special test email
    FetchTestData(String),

    /// Ask the server to test an SMTP profile
    TestConnection(String),

    SaveAddress { kind: AddressKind, email: String },
    DeleteAddress { kind: AddressKind, email: String },

    /// Create or update a profile
    SubmitProfile(ProfileSubmission),
    DeleteProfile(String),
    DeleteTemplate(String),

    /// Represents no side effect
    NoOp,
}

impl Command {
    /// Helper to create a SendMessage command
    #[allow(dead_code)]
    pub fn send(msg: Message) -> Self {
        Command::SendMessage(msg)
    }

    /// Helper to create a NoOp command
    #[allow(dead_code)]
    pub fn none() -> Self {
        Command::NoOp
    }

    /// Helper to create an UpdateUI command
    pub fn update_ui<F>(f: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Command::UpdateUI(Box::new(f))
    }
}
