//! Small crate-wide convenience macros.

/// Console logging that compiles away in release builds. Useful while
/// wiring up event handlers without leaving noise in production output.
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{
        #[cfg(debug_assertions)]
        web_sys::console::log_1(&format!($($arg)*).into());
    }};
}
