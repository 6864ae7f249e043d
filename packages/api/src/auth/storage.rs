//! Refresh-token persistence.
//!
//! In the browser the token lives in `sessionStorage`, so a reload restores
//! the session until the tab closes. Native builds persist nothing.

#[cfg(target_arch = "wasm32")]
const REFRESH_TOKEN_KEY: &str = "portfolio.refresh_token";

#[cfg(target_arch = "wasm32")]
fn session_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.session_storage().ok().flatten()
}

#[cfg(target_arch = "wasm32")]
pub fn load() -> Option<String> {
    session_storage()?.get_item(REFRESH_TOKEN_KEY).ok().flatten()
}

#[cfg(target_arch = "wasm32")]
pub fn save(token: &str) {
    if let Some(storage) = session_storage() {
        if storage.set_item(REFRESH_TOKEN_KEY, token).is_err() {
            tracing::warn!("could not persist the session");
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn clear() {
    if let Some(storage) = session_storage() {
        let _ = storage.remove_item(REFRESH_TOKEN_KEY);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load() -> Option<String> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save(_token: &str) {}

#[cfg(not(target_arch = "wasm32"))]
pub fn clear() {}
