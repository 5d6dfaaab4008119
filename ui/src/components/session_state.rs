use dioxus::prelude::*;

use storecast_common::identity::{Session, SessionContext};

/// localStorage key holding the serialized session between page loads.
#[cfg_attr(not(target_family = "wasm"), allow(dead_code))]
const SESSION_KEY: &str = "storecast_session";

pub fn use_session() -> Signal<SessionContext> {
    use_context::<Signal<SessionContext>>()
}

/// Session saved by an earlier page load, if any.
pub fn load_saved() -> Option<Session> {
    let raw = read_storage()?;
    match serde_json::from_str(&raw) {
        Ok(session) => Some(session),
        Err(e) => {
            tracing::warn!("Discarding unreadable saved session: {e}");
            clear_saved();
            None
        }
    }
}

/// Store `session` in context and persist it.
pub fn sign_in(mut context: Signal<SessionContext>, session: Session) {
    persist(&session);
    context.write().sign_in(session);
}

/// Save `session` for the next page load.
pub fn persist(session: &Session) {
    match serde_json::to_string(session) {
        Ok(raw) => write_storage(&raw),
        Err(e) => tracing::warn!("Session not persisted: {e}"),
    }
}

pub fn clear_saved() {
    #[cfg(target_family = "wasm")]
    {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(SESSION_KEY);
        }
    }
}

#[cfg(target_family = "wasm")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

fn read_storage() -> Option<String> {
    #[cfg(target_family = "wasm")]
    {
        local_storage()?.get_item(SESSION_KEY).ok().flatten()
    }
    #[cfg(not(target_family = "wasm"))]
    {
        None
    }
}

fn write_storage(_raw: &str) {
    #[cfg(target_family = "wasm")]
    {
        if let Some(storage) = local_storage() {
            if storage.set_item(SESSION_KEY, _raw).is_err() {
                tracing::warn!("localStorage rejected the session");
            }
        }
    }
}
