//! Hash Router
//!
//! The current location hash as a signal, and navigation by [`Route`].

use leptos::prelude::*;
use shopping_list_lib::routes::Route;
use tracing::warn;

fn window() -> Option<web_sys::Window> {
    web_sys::window()
}

/// Current location hash, e.g. `#/account`
pub fn current_hash() -> String {
    window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default()
}

/// Origin of the page, e.g. `https://lista.example`
pub fn origin() -> String {
    window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

/// Go to `route`; the hash listener picks up the change
pub fn navigate(route: Route) {
    let Some(window) = window() else {
        return;
    };
    if window.location().set_hash(route.path()).is_err() {
        warn!(path = route.path(), "navigation failed");
    }
}

/// Signal that follows the location hash
pub fn use_location_hash() -> ReadSignal<String> {
    let (hash, set_hash) = signal(current_hash());
    // lives as long as the page
    let _listener = window_event_listener(leptos::ev::hashchange, move |_| {
        set_hash.set(current_hash());
    });
    hash
}

/// Ask the user to confirm a destructive action
pub fn confirm(message: &str) -> bool {
    window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}
