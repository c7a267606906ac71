//! Forgot Password Page

use leptos::prelude::*;
use leptos::task::spawn_local;
use shopping_list_lib::forms::auth_error_text;
use shopping_list_lib::routes::Route;

use crate::context::use_app_context;
use crate::router::origin;

#[component]
pub fn ForgotPassword() -> impl IntoView {
    let ctx = use_app_context();
    let (email, set_email) = signal(String::new());
    let (message, set_message) = signal(None::<String>);
    let (error, set_error) = signal(None::<String>);
    let (busy, set_busy) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_error.set(None);
        set_message.set(None);
        set_busy.set(true);
        let email = email.get_untracked();
        let redirect_to = format!("{}{}", origin(), Route::Account.href());
        let shop = ctx.shop();
        spawn_local(async move {
            match shop.send_password_reset(&email, Some(&redirect_to)).await {
                Ok(()) => set_message.set(Some("Verifique seu e-mail para redefinir a senha.".to_string())),
                Err(e) => set_error.set(Some(auth_error_text(&e, "Erro ao enviar e-mail."))),
            }
            set_busy.set(false);
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h2>"Recuperar Senha"</h2>
                <p class="subtitle">"Digite seu e-mail para receber o link de redefinição."</p>
                <form on:submit=submit>
                    {move || error.get().map(|e| view! { <div class="form-error">{e}</div> })}
                    {move || message.get().map(|m| view! { <div class="form-success">{m}</div> })}
                    <label for="email">"E-mail"</label>
                    <input
                        id="email"
                        type="email"
                        required
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                    <button type="submit" class="primary-btn" disabled=move || busy.get()>
                        {move || if busy.get() { "Enviando..." } else { "Enviar Link" }}
                    </button>
                </form>
                <p class="auth-switch">
                    "Lembrou a senha? "
                    <a href=Route::Login.href()>"Voltar para o Login"</a>
                </p>
            </div>
        </div>
    }
}
