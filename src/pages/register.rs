//! Register Page

use leptos::prelude::*;
use leptos::task::spawn_local;
use shopping_list_lib::forms::{auth_error_text, validate_registration};
use shopping_list_lib::routes::Route;

use crate::context::use_app_context;
use crate::router::navigate;

#[component]
pub fn Register() -> impl IntoView {
    let ctx = use_app_context();
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirmation, set_confirmation) = signal(String::new());
    let (error, set_error) = signal(None::<String>);
    let (busy, set_busy) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_error.set(None);
        let (email, password) = (email.get_untracked(), password.get_untracked());
        if let Err(message) = validate_registration(&password, &confirmation.get_untracked()) {
            set_error.set(Some(message));
            return;
        }
        set_busy.set(true);
        let shop = ctx.shop();
        spawn_local(async move {
            match shop.sign_up(&email, &password).await {
                // Signed in already, or waiting on e-mail confirmation
                Ok(()) => navigate(Route::Login),
                Err(e) => {
                    set_error.set(Some(auth_error_text(&e, "Erro ao cadastrar.")));
                    set_busy.set(false);
                }
            }
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h2>"Crie sua conta"</h2>
                <form on:submit=submit>
                    {move || error.get().map(|e| view! { <p class="form-error">{e}</p> })}
                    <label for="email">"E-mail"</label>
                    <input
                        id="email"
                        type="email"
                        required
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                    <label for="password">"Senha"</label>
                    <input
                        id="password"
                        type="password"
                        required
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                    <label for="confirm-password">"Confirmar Senha"</label>
                    <input
                        id="confirm-password"
                        type="password"
                        required
                        prop:value=move || confirmation.get()
                        on:input=move |ev| set_confirmation.set(event_target_value(&ev))
                    />
                    <button type="submit" class="primary-btn" disabled=move || busy.get()>
                        {move || if busy.get() { "Cadastrando..." } else { "Cadastrar" }}
                    </button>
                </form>
                <p class="auth-switch">
                    "Já tem uma conta? "
                    <a href=Route::Login.href()>"Faça login"</a>
                </p>
            </div>
        </div>
    }
}
