//! Small crate-wide convenience macros.

/// Log to the browser console in debug builds only.  Release builds compile
/// the call away entirely so hot paths stay silent.
///
/// ```rust,ignore
/// debug_log!("loaded {} profiles", profiles.len());
/// ```
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{
        #[cfg(debug_assertions)]
        web_sys::console::log_1(&format!($($arg)*).into());
    }};
}
