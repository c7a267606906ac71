//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use leptos::prelude::*;
use shopping_list_lib::ShoppingStore;

use crate::store::{UiStateHandle, UiStore};

pub type Shop = ShoppingStore<UiStateHandle>;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Reactive application state
    pub store: UiStore,
    /// Session and domain operations
    shop: StoredValue<Shop>,
}

impl AppContext {
    pub fn new(store: UiStore, shop: Shop) -> Self {
        Self {
            store,
            shop: StoredValue::new(shop),
        }
    }

    /// Operations handle, cheap to clone into a task
    pub fn shop(&self) -> Shop {
        self.shop.get_value()
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
