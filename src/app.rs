//! Smart Shopping List Frontend App
//!
//! Builds the backend, provides context and renders the routed page.

use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;
use shopping_list_lib::remote::{MemoryRemote, RemoteDataService, SupabaseRemote};
use shopping_list_lib::routes::{self, Resolution, Route};
use shopping_list_lib::{RemoteConfig, ShoppingStore};
use tracing::{error, info, warn};

use crate::context::AppContext;
use crate::pages::{Account, Dashboard, ForgotPassword, Login, OldLists, Register};
use crate::router::{navigate, use_location_hash};
use crate::storage::LocalSessionStorage;
use crate::store::{UiState, UiStateHandle, UiStateStoreFields};

/// Hosted backend when configured, otherwise the in-memory demo backend
fn build_remote() -> Arc<dyn RemoteDataService> {
    match RemoteConfig::from_env() {
        Ok(Some(config)) => {
            info!(url = %config.url, "using hosted backend");
            Arc::new(SupabaseRemote::new(config, Box::new(LocalSessionStorage)))
        }
        Ok(None) => {
            warn!("no backend configured, data lives in this tab only");
            Arc::new(MemoryRemote::new())
        }
        Err(e) => {
            error!("invalid backend configuration: {}", e);
            Arc::new(MemoryRemote::new())
        }
    }
}

#[component]
fn LoadingScreen() -> impl IntoView {
    view! {
        <div class="loading-screen">
            <p>"Carregando..."</p>
        </div>
    }
}

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(UiState::default());
    let shop = ShoppingStore::new(build_remote(), UiStateHandle(store));

    // Provide context to all children
    provide_context(AppContext::new(store, shop.clone()));

    // Session probe, then follow auth changes for the life of the page
    let events = shop.remote().on_auth_change();
    spawn_local(async move {
        shop.initial_session().await;
        shop.listen_auth_changes(events).await;
    });

    let hash = use_location_hash();
    let resolution = Memo::new(move |_| routes::resolve(&hash.get(), store.identity().read().is_some()));

    // Keep the address bar on the page actually shown
    Effect::new(move |_| {
        if store.loading().get() {
            return;
        }
        if let Resolution::Redirect(route) = resolution.get() {
            navigate(route);
        }
    });

    let page = move || match resolution.get().route() {
        Route::Login => view! { <Login /> }.into_any(),
        Route::Register => view! { <Register /> }.into_any(),
        Route::ForgotPassword => view! { <ForgotPassword /> }.into_any(),
        Route::Dashboard => view! { <Dashboard /> }.into_any(),
        Route::OldLists => view! { <OldLists /> }.into_any(),
        Route::Account => view! { <Account /> }.into_any(),
    };

    view! {
        <Show when=move || !store.loading().get() fallback=|| view! { <LoadingScreen /> }>
            {page}
        </Show>
    }
}
