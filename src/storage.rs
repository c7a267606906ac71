//! Browser Session Storage
//!
//! Keeps the backend session in `window.localStorage` so a reload resumes it.

use shopping_list_lib::remote::{SessionStorage, SESSION_STORAGE_KEY};
use tracing::warn;

/// `localStorage`-backed [`SessionStorage`]
///
/// The storage object is looked up on every call; nothing browser-side is held.
#[derive(Default)]
pub struct LocalSessionStorage;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl SessionStorage for LocalSessionStorage {
    fn load(&self) -> Option<String> {
        local_storage()?.get_item(SESSION_STORAGE_KEY).ok().flatten()
    }

    fn save(&self, value: &str) {
        let saved = local_storage().map(|storage| storage.set_item(SESSION_STORAGE_KEY, value));
        if !matches!(saved, Some(Ok(()))) {
            warn!("session could not be persisted");
        }
    }

    fn clear(&self) {
        let removed = local_storage().map(|storage| storage.remove_item(SESSION_STORAGE_KEY));
        if !matches!(removed, Some(Ok(()))) {
            warn!("stored session could not be removed");
        }
    }
}
