//! Utility helpers shared across the WASM frontend.

/// Return the current timestamp in **milliseconds** since UNIX epoch.
///
/// We use JS Date here because it is available in browser/WASM without adding
/// heavy chrono dependencies.
pub fn now_ms() -> u64 {
    // `js_sys::Date::now()` returns f64 representing milliseconds since epoch.
    js_sys::Date::now() as u64
}

/// Generate a fresh submission token from the wall clock and the browser's
/// PRNG.  The pure composition lives in [`crate::submission::compose_token`]
/// so it stays testable off-browser.
pub fn fresh_submission_token() -> String {
    crate::submission::compose_token(now_ms(), js_sys::Math::random())
}

/// Capitalise the first letter of a &str.
pub fn capitalise_first(s: &str) -> String {
    let mut c = s.chars();
    match c.next() {
        None => String::new(),
        Some(f) => f.to_uppercase().collect::<String>() + c.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalises_only_the_first_letter() {
        assert_eq!(capitalise_first("sender"), "Sender");
        assert_eq!(capitalise_first(""), "");
        assert_eq!(capitalise_first("EICAR"), "EICAR");
    }
}
