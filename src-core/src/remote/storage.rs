//! Session persistence
//!
//! The HTTP backend keeps its session (tokens + user) in a [`SessionStorage`]
//! so a reload can resume it. The browser build plugs in `localStorage`.

use std::sync::Mutex;

/// Key under which the serialized session is stored
pub const SESSION_STORAGE_KEY: &str = "smart-shopping-list.auth";

pub trait SessionStorage: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, value: &str);
    fn clear(&self);
}

/// Process-local storage; sessions do not survive a restart
#[derive(Default)]
pub struct InMemorySessionStorage {
    value: Mutex<Option<String>>,
}

impl SessionStorage for InMemorySessionStorage {
    fn load(&self) -> Option<String> {
        self.value
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn save(&self, value: &str) {
        *self.value.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(value.to_string());
    }

    fn clear(&self) {
        *self.value.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }
}
