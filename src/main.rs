//! Smart Shopping List Frontend Entry Point

mod context;
mod store;
mod storage;
mod router;
mod components;
mod pages;
mod app;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    mount_to_body(App);
}
