// Re-export network modules
pub mod api_client;

pub use api_client::ApiClient;

/// Base URL for API calls.  The frontend is served by the same host that
/// exposes the JSON API, so relative URLs are correct on every page.
pub(crate) fn get_api_base_url() -> String {
    String::new()
}
