//! Login Page

use leptos::prelude::*;
use leptos::task::spawn_local;
use shopping_list_lib::forms::auth_error_text;
use shopping_list_lib::routes::Route;

use crate::context::use_app_context;

#[component]
pub fn Login() -> impl IntoView {
    let ctx = use_app_context();
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal(None::<String>);
    let (busy, set_busy) = signal(false);

    // On success the auth listener signs the app in and the router leaves this page
    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_error.set(None);
        set_busy.set(true);
        let (email, password) = (email.get_untracked(), password.get_untracked());
        let shop = ctx.shop();
        spawn_local(async move {
            if let Err(e) = shop.sign_in(&email, &password).await {
                set_error.set(Some(auth_error_text(&e, "Erro ao entrar. Verifique e-mail e senha.")));
                set_busy.set(false);
            }
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h2>"Bem-vindo"</h2>
                <p class="subtitle">"Faça login na sua Lista de Compras"</p>
                <form on:submit=submit>
                    {move || error.get().map(|e| view! { <div class="form-error">{e}</div> })}
                    <label for="email">"E-mail"</label>
                    <input
                        id="email"
                        type="email"
                        required
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                    <div class="label-row">
                        <label for="password">"Senha"</label>
                        <a href=Route::ForgotPassword.href()>"Esqueceu a senha?"</a>
                    </div>
                    <input
                        id="password"
                        type="password"
                        required
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                    <button type="submit" class="primary-btn" disabled=move || busy.get()>
                        {move || if busy.get() { "Entrando..." } else { "Entrar" }}
                    </button>
                </form>
                <p class="auth-switch">
                    "Não tem uma conta? "
                    <a href=Route::Register.href()>"Cadastre-se"</a>
                </p>
            </div>
        </div>
    }
}
