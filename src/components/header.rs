//! Top bar with the menu button

use leptos::prelude::*;
use shopping_list_lib::routes::Route;

#[component]
pub fn Header(#[prop(into)] on_menu: Callback<()>) -> impl IntoView {
    view! {
        <header class="app-header">
            <button class="menu-btn" aria-label="Abrir menu" on:click=move |_| on_menu.run(())>
                "☰"
            </button>
            <a class="app-title" href=Route::Dashboard.href()>"Lista de Compras"</a>
        </header>
    }
}
