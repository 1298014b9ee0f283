//! Duplicate-submission guard for the compose form.
//!
//! A form owns one [`SubmissionGuard`].  The flag is flipped synchronously in
//! the reducer before any network future is spawned, so at most one request
//! can be outstanding per form no matter how fast the user hammers the send
//! button.  The guard also carries the idempotency token attached to the
//! in-flight payload so the server can spot accidental duplicates.

use crate::models::BodyType;

/// Single-flight state for one form instance.
#[derive(Debug, Default)]
pub struct SubmissionGuard {
    in_flight: bool,
    token: Option<String>,
}

impl SubmissionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept a submission attempt.  Returns `false` while a prior request is
    /// still outstanding; the caller must then drop the attempt silently.
    pub fn try_begin(&mut self, token: String) -> bool {
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        self.token = Some(token);
        true
    }

    /// Release the guard once the attempt has fully settled.
    pub fn finish(&mut self) {
        self.in_flight = false;
        self.token = None;
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// The token attached to the in-flight payload, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

/// Compose a submission token from a millisecond timestamp and a PRNG sample
/// in `[0, 1)`.  Format: `"{unix_ms}-{nine base36 chars}"`.  Collisions are
/// astronomically unlikely, which is all the server-side duplicate check
/// needs.
pub fn compose_token(now_ms: u64, entropy: f64) -> String {
    format!("{}-{}", now_ms, base36_suffix(entropy, 9))
}

fn base36_suffix(entropy: f64, len: usize) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut frac = entropy.fract().abs();
    let mut out = String::with_capacity(len);
    for _ in 0..len {
        frac *= 36.0;
        let idx = (frac as usize).min(DIGITS.len() - 1);
        out.push(DIGITS[idx] as char);
        frac = frac.fract();
    }
    out
}

/// Prepare the body field for the wire.  Plain bodies pass through untouched;
/// HTML-mode bodies are wrapped into a minimal well-formed document unless the
/// author already supplied one.
pub fn normalize_body(body: &str, body_type: BodyType) -> String {
    match body_type {
        BodyType::Plain => body.to_string(),
        BodyType::Html => ensure_html_document(body),
    }
}

fn ensure_html_document(body: &str) -> String {
    if body.contains("<html>") {
        return body.to_string();
    }
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n  <meta charset=\"UTF-8\">\n</head>\n<body>\n  {}\n</body>\n</html>",
        body.replace('\n', "<br>")
    )
}

// ---------------------------------------------------------------------------
// Unit tests – pure logic, no browser needed
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_accepts_only_one_submission_at_a_time() {
        let mut guard = SubmissionGuard::new();
        assert!(guard.try_begin("t1".into()));
        assert!(guard.is_in_flight());
        assert_eq!(guard.token(), Some("t1"));

        // Every further attempt is refused until the first one settles.
        assert!(!guard.try_begin("t2".into()));
        assert!(!guard.try_begin("t3".into()));
        assert_eq!(guard.token(), Some("t1"));

        guard.finish();
        assert!(!guard.is_in_flight());
        assert_eq!(guard.token(), None);
        assert!(guard.try_begin("t4".into()));
    }

    #[test]
    fn token_embeds_timestamp_and_base36_suffix() {
        let token = compose_token(1_700_000_000_123, 0.5);
        let (ts, suffix) = token.split_once('-').expect("dash separator");
        assert_eq!(ts, "1700000000123");
        assert_eq!(suffix.len(), 9);
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn tokens_differ_for_different_entropy() {
        let a = compose_token(1, 0.123_456);
        let b = compose_token(1, 0.654_321);
        assert_ne!(a, b);
    }

    #[test]
    fn plain_body_is_untouched() {
        let body = "line one\nline two <b>not html mode</b>";
        assert_eq!(normalize_body(body, BodyType::Plain), body);
    }

    #[test]
    fn html_body_gets_document_wrapper_and_br_line_breaks() {
        let out = normalize_body("hello\nworld", BodyType::Html);
        assert!(out.starts_with("<!DOCTYPE html>"));
        assert!(out.contains("<meta charset=\"UTF-8\">"));
        assert!(out.contains("hello<br>world"));
        assert!(!out.contains("hello\nworld"));
    }

    #[test]
    fn already_wrapped_html_passes_through() {
        let body = "<html><body><p>ready</p></body></html>";
        assert_eq!(normalize_body(body, BodyType::Html), body);
    }
}
