//! Application State Container
//!
//! Everything the view renders: who is signed in, whether the initial
//! session probe is still running, and the last fetched snapshot of the
//! three owned collections. State only changes through [`AppState::reduce`].

use std::sync::{Arc, Mutex};

use crate::domain::{find_by_id, Category, Identity, Item, Message};

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    /// Signed-in identity
    pub identity: Option<Identity>,
    /// Initial session probe still pending
    pub loading: bool,
    pub categories: Vec<Category>,
    pub items: Vec<Item>,
    pub messages: Vec<Message>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            identity: None,
            loading: true,
            categories: Vec::new(),
            items: Vec::new(),
            messages: Vec::new(),
        }
    }
}

/// State transitions
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Result of the startup session probe
    SessionResolved(Option<Identity>),
    /// Sign-in, sign-out or token refresh reported by the remote service
    AuthChanged(Option<Identity>),
    CategoriesLoaded {
        owner_id: String,
        categories: Vec<Category>,
    },
    ItemsLoaded {
        owner_id: String,
        items: Vec<Item>,
    },
    MessagesLoaded {
        owner_id: String,
        messages: Vec<Message>,
    },
    /// Tentative completion flag, applied before the write is confirmed
    ItemCompletedSet { item_id: String, completed: bool },
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next state from the current one and an action
    pub fn reduce(mut self, action: Action) -> Self {
        self.apply(action);
        self
    }

    /// In-place form of [`AppState::reduce`]
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::SessionResolved(identity) => {
                self.set_identity(identity);
                self.loading = false;
            }
            Action::AuthChanged(identity) => self.set_identity(identity),
            Action::CategoriesLoaded { owner_id, categories } => {
                if self.owner_id() == Some(owner_id.as_str()) {
                    self.categories = categories;
                }
            }
            Action::ItemsLoaded { owner_id, items } => {
                if self.owner_id() == Some(owner_id.as_str()) {
                    self.items = items;
                }
            }
            Action::MessagesLoaded { owner_id, messages } => {
                if self.owner_id() == Some(owner_id.as_str()) {
                    self.messages = messages;
                }
            }
            Action::ItemCompletedSet { item_id, completed } => {
                if let Some(item) = self.items.iter_mut().find(|item| item.id == item_id) {
                    item.completed = completed;
                }
            }
        }
    }

    fn set_identity(&mut self, identity: Option<Identity>) {
        let same_owner = match (&self.identity, &identity) {
            (Some(current), Some(next)) => current.id == next.id,
            _ => false,
        };
        if !same_owner {
            self.clear_collections();
        }
        self.identity = identity;
    }

    fn clear_collections(&mut self) {
        self.categories.clear();
        self.items.clear();
        self.messages.clear();
    }

    pub fn owner_id(&self) -> Option<&str> {
        self.identity.as_ref().map(|identity| identity.id.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        find_by_id(&self.categories, id)
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        find_by_id(&self.items, id)
    }
}

/// Where the stores read and write [`AppState`]
///
/// The browser build backs this with a reactive store; tests and other
/// hosts use [`SharedState`].
pub trait StateHandle: Clone + Send + Sync + 'static {
    /// Current state, untracked
    fn snapshot(&self) -> AppState;

    /// Reduce the held state with `action`
    fn dispatch(&self, action: Action);

    fn identity(&self) -> Option<Identity> {
        self.snapshot().identity
    }
}

/// Plain shared [`AppState`]
#[derive(Clone, Default)]
pub struct SharedState {
    inner: Arc<Mutex<AppState>>,
}

impl SharedState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateHandle for SharedState {
    fn snapshot(&self) -> AppState {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn dispatch(&self, action: Action) {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .apply(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(id: &str) -> Identity {
        Identity::new(id, Some(format!("{}@x.com", id)))
    }

    fn item(id: &str, completed: bool) -> Item {
        Item {
            id: id.to_string(),
            name: format!("Item {}", id),
            price: 1.0,
            category_id: "c1".to_string(),
            completed,
            owner_id: "a".to_string(),
            photo_url: None,
            product_url: None,
            notes: None,
        }
    }

    fn loaded(owner: &str) -> AppState {
        AppState::new()
            .reduce(Action::SessionResolved(Some(identity(owner))))
            .reduce(Action::ItemsLoaded {
                owner_id: owner.to_string(),
                items: vec![item("i1", false), item("i2", true)],
            })
    }

    #[test]
    fn test_starts_loading() {
        let state = AppState::new();
        assert!(state.loading);
        assert!(!state.is_authenticated());
    }

    #[test]
    fn test_session_resolved_clears_loading() {
        let state = AppState::new().reduce(Action::SessionResolved(None));
        assert!(!state.loading);
        assert_eq!(state.identity, None);
    }

    #[test]
    fn test_sign_out_clears_collections() {
        let state = loaded("a").reduce(Action::AuthChanged(None));
        assert!(state.items.is_empty());
        assert!(state.categories.is_empty());
        assert!(state.messages.is_empty());
    }

    #[test]
    fn test_token_refresh_keeps_collections() {
        let state = loaded("a").reduce(Action::AuthChanged(Some(identity("a"))));
        assert_eq!(state.items.len(), 2);
    }

    #[test]
    fn test_stale_owner_snapshot_ignored() {
        let state = AppState::new()
            .reduce(Action::SessionResolved(Some(identity("b"))))
            .reduce(Action::ItemsLoaded {
                owner_id: "a".to_string(),
                items: vec![item("i1", false)],
            });
        assert!(state.items.is_empty());
    }

    #[test]
    fn test_toggle_twice_restores() {
        let state = loaded("a");
        let flipped = state.clone().reduce(Action::ItemCompletedSet {
            item_id: "i1".to_string(),
            completed: true,
        });
        assert!(flipped.item("i1").unwrap().completed);
        let restored = flipped.reduce(Action::ItemCompletedSet {
            item_id: "i1".to_string(),
            completed: false,
        });
        assert_eq!(restored, state);
    }

    #[test]
    fn test_shared_state_dispatch() {
        let shared = SharedState::new();
        shared.dispatch(Action::SessionResolved(Some(identity("a"))));
        assert_eq!(shared.identity().map(|i| i.id), Some("a".to_string()));
        assert!(!shared.snapshot().loading);
    }
}
