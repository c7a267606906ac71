//! Side Menu Component
//!
//! Navigation drawer with the signed-in email and logout.

use leptos::prelude::*;
use leptos::task::spawn_local;
use shopping_list_lib::routes::Route;

use crate::context::use_app_context;
use crate::router::navigate;
use crate::store::UiStateStoreFields;

#[component]
pub fn SideMenu(open: ReadSignal<bool>, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();

    let email = move || {
        ctx.store
            .identity()
            .get()
            .and_then(|identity| identity.email)
            .unwrap_or_else(|| "Visitante".to_string())
    };

    let logout = move |_| {
        on_close.run(());
        let shop = ctx.shop();
        spawn_local(async move {
            shop.sign_out().await;
            navigate(Route::Login);
        });
    };

    view! {
        <div
            class=move || if open.get() { "menu-backdrop open" } else { "menu-backdrop" }
            aria-hidden="true"
            on:click=move |_| on_close.run(())
        ></div>
        <aside class=move || if open.get() { "side-menu open" } else { "side-menu" }>
            <h2>"Menu"</h2>
            <div class="menu-user">
                <span class="menu-user-label">"Usuário"</span>
                <p class="menu-user-email" title=email>{email}</p>
            </div>
            <nav class="menu-nav">
                <ul>
                    <li>
                        <a href=Route::Dashboard.href() on:click=move |_| on_close.run(())>
                            "Lista de Compras"
                        </a>
                    </li>
                    <li>
                        <a href=Route::Account.href() on:click=move |_| on_close.run(())>
                            "Minha Conta"
                        </a>
                    </li>
                </ul>
            </nav>
            <div class="menu-footer">
                <button class="logout-btn" on:click=logout>"Sair"</button>
            </div>
        </aside>
    }
}
