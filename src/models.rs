use serde::{Serialize, Deserialize};

/// Discriminator for the compose body: plain text or rich HTML.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum BodyType {
    Plain,
    Html,
}

impl BodyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyType::Plain => "plain",
            BodyType::Html => "html",
        }
    }

    /// Parse the wire value; anything unrecognised falls back to plain, which
    /// is also the server default.
    pub fn from_wire(s: &str) -> Self {
        if s == "html" {
            BodyType::Html
        } else {
            BodyType::Plain
        }
    }
}

impl Default for BodyType {
    fn default() -> Self {
        BodyType::Plain
    }
}

/// Transport security for an SMTP profile.  The backend stores two booleans
/// (`use_tls` / `use_ssl`); client-side we keep a single enum and expand it
/// at the wire.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Debug)]
pub enum SecurityMode {
    None,
    StartTls,
    Ssl,
}

impl SecurityMode {
    pub fn from_flags(use_tls: bool, use_ssl: bool) -> Self {
        if use_tls {
            SecurityMode::StartTls
        } else if use_ssl {
            SecurityMode::Ssl
        } else {
            SecurityMode::None
        }
    }

    pub fn use_tls(&self) -> bool {
        matches!(self, SecurityMode::StartTls)
    }

    pub fn use_ssl(&self) -> bool {
        matches!(self, SecurityMode::Ssl)
    }

    /// Conventional port for the mode, suggested when the user flips the
    /// security toggle on the add-profile form.
    pub fn default_port(&self) -> u16 {
        match self {
            SecurityMode::None => crate::constants::DEFAULT_PORT_PLAIN,
            SecurityMode::StartTls => crate::constants::DEFAULT_PORT_STARTTLS,
            SecurityMode::Ssl => crate::constants::DEFAULT_PORT_SSL,
        }
    }
}

/// The universal reply envelope every endpoint uses.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct ApiResponse {
    pub success: bool,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ApiResponse {
    /// The text shown to the user: `message` first, then `error`, then the
    /// provided fallback.
    pub fn display_text<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .unwrap_or(fallback)
    }
}

/// A stored message template.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Template {
    pub name: Option<String>,
    pub subject: Option<String>,
    pub body: String,
    #[serde(default)]
    pub body_type: BodyType,
}

#[derive(Clone, Deserialize, Debug)]
pub struct TemplateResponse {
    pub success: bool,
    pub template: Option<Template>,
    pub message: Option<String>,
}

/// Server-generated attachment metadata for the special test emails.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct SpecialAttachment {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub malformed: bool,
    #[serde(default)]
    pub active_content: bool,
}

impl SpecialAttachment {
    /// Badge label for the compose form.
    pub fn display_name(&self) -> String {
        match self.kind.as_str() {
            "pdf" => {
                if self.malformed {
                    "Malformed PDF".to_string()
                } else if self.active_content {
                    "PDF with Active Content".to_string()
                } else {
                    "PDF".to_string()
                }
            }
            "docx" => "DOCX Document".to_string(),
            "xlsx" => "Excel Spreadsheet".to_string(),
            "eicar" => "EICAR Test File".to_string(),
            other => other.to_uppercase(),
        }
    }

    /// True when the badge should carry the warning style: content most
    /// filters are expected to flag.
    pub fn is_hazard(&self) -> bool {
        self.kind == "eicar" || self.malformed || self.active_content
    }
}

/// Canned field values returned by `/get_test_data`.
#[derive(Clone, Deserialize, Debug)]
pub struct TestData {
    pub sender: Option<String>,
    pub recipients: Option<Vec<String>>,
    pub cc: Option<Vec<String>>,
    pub bcc: Option<Vec<String>>,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub body_type: Option<String>,
    pub special_attachment: Option<SpecialAttachment>,
}

#[derive(Clone, Deserialize, Debug)]
pub struct TestDataResponse {
    pub success: bool,
    pub test_data: Option<TestData>,
    pub message: Option<String>,
}

/// Reply from `/test_connection`.  `capabilities` is only populated on
/// success.
#[derive(Clone, Deserialize, Debug)]
pub struct ConnectionTestResponse {
    pub success: bool,
    pub message: Option<String>,
    pub error: Option<String>,
    #[serde(default)]
    pub capabilities: Vec<String>,
}

/// A named SMTP connection profile as the client sees it.  The password never
/// round-trips; it is write-only on the form.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Profile {
    pub name: String,
    pub server: String,
    pub port: u16,
    pub security: SecurityMode,
    pub username: String,
    pub no_tls_verify: bool,
}

/// Field values captured from an add/edit profile form submit.
#[derive(Clone, Debug)]
pub struct ProfileSubmission {
    pub name: String,
    pub server: String,
    pub port: u16,
    pub security: SecurityMode,
    pub username: String,
    pub password: String,
    pub no_tls_verify: bool,
}

impl ProfileSubmission {
    pub fn as_profile(&self) -> Profile {
        Profile {
            name: self.name.clone(),
            server: self.server.clone(),
            port: self.port,
            security: self.security,
            username: self.username.clone(),
            no_tls_verify: self.no_tls_verify,
        }
    }
}

/// Field values captured from the compose form at submit time.
#[derive(Clone, Debug)]
pub struct ComposeSubmission {
    pub profile: String,
    pub sender: String,
    pub recipients: String,
    pub cc: String,
    pub bcc: String,
    pub subject: String,
    pub body: String,
    pub body_type: BodyType,
}

/// The fully prepared `/send_email` payload: body normalized, idempotency
/// token attached.
#[derive(Clone, Debug)]
pub struct EmailPayload {
    pub profile: String,
    pub sender: String,
    pub recipients: String,
    pub cc: String,
    pub bcc: String,
    pub subject: String,
    pub body: String,
    pub body_type: BodyType,
    pub client_id: String,
    pub special_attachment: Option<SpecialAttachment>,
}

// ---------------------------------------------------------------------------
// Unit tests – wire-format parsing
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_response_prefers_message_over_error() {
        let resp: ApiResponse =
            serde_json::from_str(r#"{"success": false, "message": "nope", "error": "boom"}"#)
                .unwrap();
        assert_eq!(resp.display_text("fallback"), "nope");

        let resp: ApiResponse =
            serde_json::from_str(r#"{"success": false, "error": "boom"}"#).unwrap();
        assert_eq!(resp.display_text("fallback"), "boom");

        let resp: ApiResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert_eq!(resp.display_text("fallback"), "fallback");
    }

    #[test]
    fn template_response_parses_body_type() {
        let json = r#"{
            "success": true,
            "template": {"name": "welcome", "subject": "Hi", "body": "<p>x</p>", "body_type": "html"}
        }"#;
        let resp: TemplateResponse = serde_json::from_str(json).unwrap();
        let template = resp.template.unwrap();
        assert_eq!(template.body_type, BodyType::Html);
        assert_eq!(template.subject.as_deref(), Some("Hi"));
    }

    #[test]
    fn test_data_parses_special_attachment() {
        let json = r#"{
            "success": true,
            "test_data": {
                "sender": "smtp@example.com",
                "recipients": ["a@example.com"],
                "cc": [],
                "bcc": [],
                "subject": "Malformed PDF Test",
                "body": "…",
                "body_type": "plain",
                "special_attachment": {"type": "pdf", "malformed": true, "active_content": false}
            }
        }"#;
        let resp: TestDataResponse = serde_json::from_str(json).unwrap();
        let att = resp.test_data.unwrap().special_attachment.unwrap();
        assert_eq!(att.display_name(), "Malformed PDF");
        assert!(att.is_hazard());
    }

    #[test]
    fn connection_response_defaults_capabilities_to_empty() {
        let resp: ConnectionTestResponse =
            serde_json::from_str(r#"{"success": false, "error": "timeout"}"#).unwrap();
        assert!(resp.capabilities.is_empty());
        assert_eq!(resp.error.as_deref(), Some("timeout"));
    }

    #[test]
    fn security_mode_round_trips_flags() {
        assert_eq!(SecurityMode::from_flags(true, false), SecurityMode::StartTls);
        assert_eq!(SecurityMode::from_flags(false, true), SecurityMode::Ssl);
        assert_eq!(SecurityMode::from_flags(false, false), SecurityMode::None);
        assert_eq!(SecurityMode::StartTls.default_port(), 587);
        assert_eq!(SecurityMode::Ssl.default_port(), 465);
        assert_eq!(SecurityMode::None.default_port(), 25);
    }
}
