//! Add Category Modal

use leptos::prelude::*;
use leptos::task::spawn_local;
use shopping_list_lib::forms;

use crate::context::use_app_context;

#[component]
pub fn AddCategoryModal(open: ReadSignal<bool>, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let (name, set_name) = signal(String::new());

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Ok(name) = forms::required_text("name", &name.get_untracked()) else {
            return;
        };
        set_name.set(String::new());
        on_close.run(());
        let shop = ctx.shop();
        spawn_local(async move {
            shop.add_category(&name).await;
        });
    };

    view! {
        <Show when=move || open.get()>
            <div class="modal-backdrop" role="dialog" aria-modal="true" on:click=move |_| on_close.run(())>
                <div class="modal small" on:click=|ev| ev.stop_propagation()>
                    <h3>"Adicionar Nova Categoria"</h3>
                    <form on:submit=submit>
                        <label for="category-name">"Nome da Categoria"</label>
                        <input
                            id="category-name"
                            type="text"
                            required
                            autofocus
                            prop:value=move || name.get()
                            on:input=move |ev| set_name.set(event_target_value(&ev))
                        />
                        <div class="modal-actions">
                            <button type="button" class="secondary-btn" on:click=move |_| on_close.run(())>
                                "Cancelar"
                            </button>
                            <button type="submit" class="primary-btn">"Adicionar Categoria"</button>
                        </div>
                    </form>
                </div>
            </div>
        </Show>
    }
}
