//! Chat Component
//!
//! Modal message log of the signed-in account.

use leptos::prelude::*;
use leptos::task::spawn_local;
use shopping_list_lib::domain::Message;
use shopping_list_lib::forms;

use crate::context::use_app_context;
use crate::store::UiStateStoreFields;

#[component]
fn MessageBubble(message: Message, mine: bool) -> impl IntoView {
    view! {
        <div class={if mine { "message mine" } else { "message" }}>
            <div class="bubble">
                {(!mine).then(|| view! { <p class="author">{message.author_name.clone()}</p> })}
                <p class="text">{message.text.clone()}</p>
                <p class="time">{message.time_label()}</p>
            </div>
        </div>
    }
}

#[component]
pub fn Chat(open: ReadSignal<bool>, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let (draft, set_draft) = signal(String::new());
    let end_ref = NodeRef::<leptos::html::Div>::new();

    // Follow the newest message
    Effect::new(move |_| {
        ctx.store.messages().track();
        if !open.get() {
            return;
        }
        if let Some(end) = end_ref.get() {
            let options = web_sys::ScrollIntoViewOptions::new();
            options.set_behavior(web_sys::ScrollBehavior::Smooth);
            end.scroll_into_view_with_scroll_into_view_options(&options);
        }
    });

    let send = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Ok(text) = forms::required_text("message", &draft.get_untracked()) else {
            return;
        };
        set_draft.set(String::new());
        let shop = ctx.shop();
        spawn_local(async move {
            shop.add_message(&text).await;
        });
    };

    let messages = move || {
        let owner = ctx.store.identity().get().map(|identity| identity.id);
        ctx.store
            .messages()
            .get()
            .into_iter()
            .map(|message| {
                let mine = owner.as_deref() == Some(message.owner_id.as_str());
                view! { <MessageBubble message=message mine=mine /> }
            })
            .collect_view()
    };

    view! {
        <Show when=move || open.get()>
            <div class="modal-backdrop" role="dialog" aria-modal="true" on:click=move |_| on_close.run(())>
                <div class="chat" on:click=|ev| ev.stop_propagation()>
                    <header class="chat-header">
                        <h3>"Chat da Lista"</h3>
                        <button class="close-btn" aria-label="Fechar" on:click=move |_| on_close.run(())>
                            "✕"
                        </button>
                    </header>
                    <div class="chat-messages">
                        {messages}
                        <div node_ref=end_ref></div>
                    </div>
                    <form class="chat-form" on:submit=send>
                        <input
                            type="text"
                            placeholder="Digite..."
                            prop:value=move || draft.get()
                            on:input=move |ev| set_draft.set(event_target_value(&ev))
                        />
                        <button type="submit" aria-label="Enviar">"➤"</button>
                    </form>
                </div>
            </div>
        </Show>
    }
}
