//! Blocking browser prompts.
//!
//! Native builds have no dialog to show; alerts go to the log and
//! confirmations are declined.

pub fn alert(message: &str) {
    #[cfg(target_family = "wasm")]
    {
        if let Some(window) = web_sys::window() {
            if window.alert_with_message(message).is_ok() {
                return;
            }
        }
    }
    tracing::warn!("{message}");
}

pub fn confirm(message: &str) -> bool {
    #[cfg(target_family = "wasm")]
    {
        if let Some(window) = web_sys::window() {
            return window.confirm_with_message(message).unwrap_or(false);
        }
    }
    tracing::debug!("declining confirmation without a browser: {message}");
    false
}
