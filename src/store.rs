//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The session and
//! domain operations write into it through [`UiStateHandle`].

use leptos::prelude::*;
use reactive_stores::Store;
use shopping_list_lib::domain::{Category, Identity, Item, Message};
use shopping_list_lib::{Action, AppState, StateHandle};

/// Reactive mirror of [`AppState`] with field-level reactivity
#[derive(Clone, Debug, Store)]
pub struct UiState {
    pub identity: Option<Identity>,
    /// Startup session probe still pending
    pub loading: bool,
    pub categories: Vec<Category>,
    pub items: Vec<Item>,
    pub messages: Vec<Message>,
}

impl Default for UiState {
    fn default() -> Self {
        AppState::new().into()
    }
}

impl From<AppState> for UiState {
    fn from(state: AppState) -> Self {
        Self {
            identity: state.identity,
            loading: state.loading,
            categories: state.categories,
            items: state.items,
            messages: state.messages,
        }
    }
}

impl From<UiState> for AppState {
    fn from(state: UiState) -> Self {
        Self {
            identity: state.identity,
            loading: state.loading,
            categories: state.categories,
            items: state.items,
            messages: state.messages,
        }
    }
}

/// Type alias for the store
pub type UiStore = Store<UiState>;

/// [`StateHandle`] over the reactive store
#[derive(Clone, Copy)]
pub struct UiStateHandle(pub UiStore);

impl StateHandle for UiStateHandle {
    fn snapshot(&self) -> AppState {
        self.0.get_untracked().into()
    }

    fn dispatch(&self, action: Action) {
        let next = self.snapshot().reduce(action);
        store_replace(&self.0, next);
    }

    fn identity(&self) -> Option<Identity> {
        self.0.identity().get_untracked()
    }
}

// ========================
// Store Helper Functions
// ========================

/// Write `next` into the store, touching only the fields that changed
fn store_replace(store: &UiStore, next: AppState) {
    if store.identity().get_untracked() != next.identity {
        store.identity().set(next.identity);
    }
    if store.loading().get_untracked() != next.loading {
        store.loading().set(next.loading);
    }
    if *store.categories().read_untracked() != next.categories {
        *store.categories().write() = next.categories;
    }
    if *store.items().read_untracked() != next.items {
        *store.items().write() = next.items;
    }
    if *store.messages().read_untracked() != next.messages {
        *store.messages().write() = next.messages;
    }
}
