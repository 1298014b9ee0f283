use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Headers, Request, RequestInit, RequestMode, Response};

use crate::constants::{
    ADD_PROFILE_PATH, DELETE_PROFILE_PATH, DELETE_RECIPIENT_PATH, DELETE_SENDER_PATH,
    DELETE_TEMPLATE_PATH, GET_TEMPLATE_PATH, GET_TEST_DATA_PATH, SAVE_RECIPIENT_PATH,
    SAVE_SENDER_PATH, SEND_EMAIL_PATH, TEST_CONNECTION_PATH,
};
use crate::messages::AddressKind;
use crate::models::{EmailPayload, ProfileSubmission};

// REST API client for the mail tester backend
pub struct ApiClient;

impl ApiClient {
    // Get the base URL for API calls
    fn base_url() -> String {
        super::get_api_base_url()
    }

    /// POST the compose payload as multipart form data.
    pub async fn send_email(payload: &EmailPayload) -> Result<String, JsValue> {
        let url = format!("{}{}", Self::base_url(), SEND_EMAIL_PATH);

        let form = FormData::new()?;
        form.append_with_str("profile", &payload.profile)?;
        form.append_with_str("sender", &payload.sender)?;
        form.append_with_str("recipients", &payload.recipients)?;
        form.append_with_str("cc", &payload.cc)?;
        form.append_with_str("bcc", &payload.bcc)?;
        form.append_with_str("subject", &payload.subject)?;
        form.append_with_str("body", &payload.body)?;
        form.append_with_str("body_type", payload.body_type.as_str())?;
        // Client-generated token so the server can spot duplicate submissions.
        form.append_with_str("client_id", &payload.client_id)?;
        if let Some(attachment) = &payload.special_attachment {
            let json = serde_json::to_string(attachment)
                .map_err(|e| JsValue::from_str(&format!("Failed to encode attachment: {}", e)))?;
            form.append_with_str("special_attachment", &json)?;
        }

        Self::fetch_multipart(&url, &form).await
    }

    pub async fn get_template(name: &str) -> Result<String, JsValue> {
        let url = format!("{}{}/{}", Self::base_url(), GET_TEMPLATE_PATH, encode(name));
        Self::fetch_json(&url, "GET", None).await
    }

    pub async fn get_test_data(test_type: &str) -> Result<String, JsValue> {
        let url = format!(
            "{}{}?test_type={}",
            Self::base_url(),
            GET_TEST_DATA_PATH,
            encode(test_type)
        );
        Self::fetch_json(&url, "GET", None).await
    }

    pub async fn test_connection(profile: &str) -> Result<String, JsValue> {
        let url = format!("{}{}", Self::base_url(), TEST_CONNECTION_PATH);
        let body = format!("profile={}", encode(profile));
        Self::fetch_urlencoded(&url, &body).await
    }

    pub async fn save_address(kind: AddressKind, email: &str) -> Result<String, JsValue> {
        let path = match kind {
            AddressKind::Sender => SAVE_SENDER_PATH,
            AddressKind::Recipient => SAVE_RECIPIENT_PATH,
        };
        let url = format!("{}{}", Self::base_url(), path);
        let body = serde_json::json!({ "email": email }).to_string();
        Self::fetch_json(&url, "POST", Some(&body)).await
    }

    pub async fn delete_address(kind: AddressKind, email: &str) -> Result<String, JsValue> {
        let path = match kind {
            AddressKind::Sender => DELETE_SENDER_PATH,
            AddressKind::Recipient => DELETE_RECIPIENT_PATH,
        };
        let url = format!("{}{}", Self::base_url(), path);
        let body = serde_json::json!({ "email": email }).to_string();
        Self::fetch_json(&url, "POST", Some(&body)).await
    }

    /// Create or update a profile.  The backend treats a checkbox field as
    /// set only when its value is `on`; unchecked boxes are omitted entirely.
    pub async fn add_profile(profile: &ProfileSubmission) -> Result<String, JsValue> {
        let url = format!("{}{}", Self::base_url(), ADD_PROFILE_PATH);
        let mut body = format!(
            "name={}&server={}&port={}&username={}&password={}",
            encode(&profile.name),
            encode(&profile.server),
            profile.port,
            encode(&profile.username),
            encode(&profile.password),
        );
        if profile.security.use_tls() {
            body.push_str("&use_tls=on");
        }
        if profile.security.use_ssl() {
            body.push_str("&use_ssl=on");
        }
        if profile.no_tls_verify {
            body.push_str("&no_tls_verify=on");
        }
        Self::fetch_urlencoded(&url, &body).await
    }

    pub async fn delete_profile(name: &str) -> Result<String, JsValue> {
        let url = format!("{}{}/{}", Self::base_url(), DELETE_PROFILE_PATH, encode(name));
        Self::fetch_json(&url, "POST", None).await
    }

    pub async fn delete_template(name: &str) -> Result<String, JsValue> {
        let url = format!("{}{}/{}", Self::base_url(), DELETE_TEMPLATE_PATH, encode(name));
        Self::fetch_json(&url, "POST", None).await
    }

    // Helper function to make fetch requests with an optional JSON body
    pub async fn fetch_json(url: &str, method: &str, body: Option<&str>) -> Result<String, JsValue> {
        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::SameOrigin);

        let headers = Headers::new()?;
        if let Some(data) = body {
            let js_body = JsValue::from_str(data);
            opts.set_body(&js_body);
            headers.append("Content-Type", "application/json")?;
        }
        opts.set_headers(&headers);

        let request = Request::new_with_str_and_init(url, &opts)?;
        Self::run_request(request).await
    }

    // POST with a urlencoded body, the classic form submit shape
    async fn fetch_urlencoded(url: &str, body: &str) -> Result<String, JsValue> {
        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::SameOrigin);

        let headers = Headers::new()?;
        headers.append("Content-Type", "application/x-www-form-urlencoded")?;
        opts.set_headers(&headers);
        opts.set_body(&JsValue::from_str(body));

        let request = Request::new_with_str_and_init(url, &opts)?;
        Self::run_request(request).await
    }

    // POST multipart form data; the browser supplies the boundary header.
    async fn fetch_multipart(url: &str, form: &FormData) -> Result<String, JsValue> {
        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::SameOrigin);
        opts.set_body(form.as_ref());

        let request = Request::new_with_str_and_init(url, &opts)?;
        Self::run_request(request).await
    }

    async fn run_request(request: Request) -> Result<String, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
        let resp: Response = resp_value.dyn_into()?;

        if !resp.ok() {
            return Err(JsValue::from_str(&format!(
                "API request failed: {} {}",
                resp.status(),
                resp.status_text()
            )));
        }

        // Parse body as text – caller decodes JSON.
        let text = JsFuture::from(resp.text()?).await?;
        Ok(text.as_string().unwrap_or_default())
    }
}

fn encode(s: &str) -> String {
    String::from(js_sys::encode_uri_component(s))
}
