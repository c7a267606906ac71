//! Account Page
//!
//! Signed-in email, logout and account deletion.

use leptos::prelude::*;
use leptos::task::spawn_local;
use shopping_list_lib::routes::Route;
use tracing::warn;

use crate::components::PageShell;
use crate::context::use_app_context;
use crate::router::{confirm, navigate};
use crate::store::UiStateStoreFields;

const DELETE_WARNING: &str = "TEM CERTEZA? Isso apagará todos os seus itens, categorias e mensagens permanentemente. Esta ação não pode ser desfeita.";

#[component]
pub fn Account() -> impl IntoView {
    let ctx = use_app_context();

    let email = move || {
        ctx.store
            .identity()
            .get()
            .and_then(|identity| identity.email)
            .unwrap_or_default()
    };

    let logout = move |_| {
        let shop = ctx.shop();
        spawn_local(async move {
            shop.sign_out().await;
        });
    };

    let delete_account = move |_| {
        if !confirm(DELETE_WARNING) {
            return;
        }
        let shop = ctx.shop();
        spawn_local(async move {
            let report = shop.delete_account().await;
            if !report.is_complete() {
                warn!(failed = ?report.failed, "account deleted partially");
            }
            navigate(Route::Login);
        });
    };

    view! {
        <PageShell>
            <div class="panel">
                <h1>"Minha Conta"</h1>
                <div class="account-email">
                    <p class="label">"E-mail conectado"</p>
                    <p class="value">{email}</p>
                </div>
                <div class="danger-zone">
                    <h3>"Zona de Perigo"</h3>
                    <button class="secondary-btn" on:click=logout>"Sair da Conta"</button>
                    <button class="danger-btn" on:click=delete_account>"Excluir Conta e Dados"</button>
                </div>
            </div>
        </PageShell>
    }
}
