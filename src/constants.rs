// Endpoint paths and UI defaults - these are the single source of truth for the frontend
pub const SEND_EMAIL_PATH: &str = "/send_email";
pub const GET_TEMPLATE_PATH: &str = "/get_template";
pub const GET_TEST_DATA_PATH: &str = "/get_test_data";
pub const TEST_CONNECTION_PATH: &str = "/test_connection";
pub const SAVE_SENDER_PATH: &str = "/save_sender";
pub const SAVE_RECIPIENT_PATH: &str = "/save_recipient";
pub const DELETE_SENDER_PATH: &str = "/delete_sender";
pub const DELETE_RECIPIENT_PATH: &str = "/delete_recipient";
pub const ADD_PROFILE_PATH: &str = "/add_profile";
pub const DELETE_PROFILE_PATH: &str = "/delete_profile";
pub const DELETE_TEMPLATE_PATH: &str = "/delete_template";

// Send button labels
pub const SEND_BUTTON_IDLE_LABEL: &str = "Send Email";
pub const SEND_BUTTON_BUSY_LABEL: &str = "Sending...";

// How long the send control stays disabled after the server replied.
// Guards against a double-click racing the response render.
pub const SUBMIT_RESET_DELAY_MS: u32 = 2_000;

// Conventional SMTP ports suggested when the security mode changes
pub const DEFAULT_PORT_PLAIN: u16 = 25;
pub const DEFAULT_PORT_STARTTLS: u16 = 587;
pub const DEFAULT_PORT_SSL: u16 = 465;

pub const GENERIC_SEND_FAILURE: &str = "Email failed. Please try again.";
pub const PROFILE_REQUIRED_HINT: &str =
    "Please select an SMTP profile before using test emails.";
