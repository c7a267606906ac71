//! Item Modal Component
//!
//! Form for creating a new item or editing an existing one.

use leptos::prelude::*;
use leptos::task::spawn_local;
use shopping_list_lib::domain::{Category, Item};
use shopping_list_lib::forms::{form_error_text, ItemForm};

use crate::context::use_app_context;
use crate::store::UiStateStoreFields;

/// What the item modal is doing
#[derive(Debug, Clone, PartialEq)]
pub enum ItemModalMode {
    New,
    Edit(Item),
}

#[component]
pub fn ItemModal(
    mode: ReadSignal<Option<ItemModalMode>>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let (form, set_form) = signal(ItemForm::default());
    let (error, set_error) = signal(None::<String>);

    // Fill the form whenever the modal opens
    Effect::new(move |_| {
        let next = match mode.get() {
            Some(ItemModalMode::New) => ItemForm {
                category_id: ctx
                    .store
                    .categories()
                    .with_untracked(|categories| categories.first().map(|c| c.id.clone()))
                    .unwrap_or_default(),
                ..Default::default()
            },
            Some(ItemModalMode::Edit(item)) => ItemForm::from_item(&item),
            None => return,
        };
        set_error.set(None);
        set_form.set(next);
    });

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(current) = mode.get_untracked() else {
            return;
        };
        let draft = match form.get_untracked().validate() {
            Ok(draft) => draft,
            Err(e) => {
                set_error.set(Some(form_error_text(&e)));
                return;
            }
        };
        on_close.run(());
        let shop = ctx.shop();
        spawn_local(async move {
            match current {
                ItemModalMode::New => shop.add_item(&draft).await,
                ItemModalMode::Edit(item) => shop.update_item(&item.id, &draft).await,
            }
        });
    };

    let title = move || match mode.get() {
        Some(ItemModalMode::Edit(_)) => "Editar Item",
        _ => "Novo Item",
    };

    view! {
        <Show when=move || mode.get().is_some()>
            <div class="modal-backdrop" role="dialog" aria-modal="true" on:click=move |_| on_close.run(())>
                <div class="modal" on:click=|ev| ev.stop_propagation()>
                    <div class="modal-header">
                        <h3>{title}</h3>
                        <button class="close-btn" aria-label="Fechar" on:click=move |_| on_close.run(())>
                            "✕"
                        </button>
                    </div>
                    <form class="item-form" on:submit=submit>
                        {move || error.get().map(|e| view! { <p class="form-error">{e}</p> })}

                        <label for="item-name">"Nome do Produto *"</label>
                        <input
                            id="item-name"
                            type="text"
                            required
                            autofocus
                            placeholder="Ex: Arroz 5kg"
                            prop:value=move || form.get().name
                            on:input=move |ev| set_form.update(|f| f.name = event_target_value(&ev))
                        />

                        <div class="form-row">
                            <div>
                                <label for="item-price">"Preço Estimado"</label>
                                <div class="price-input">
                                    <span>"R$"</span>
                                    <input
                                        id="item-price"
                                        type="number"
                                        step="0.01"
                                        min="0"
                                        placeholder="0.00"
                                        prop:value=move || form.get().price
                                        on:input=move |ev| set_form.update(|f| f.price = event_target_value(&ev))
                                    />
                                </div>
                            </div>
                            <div>
                                <label for="item-category">"Categoria *"</label>
                                <select
                                    id="item-category"
                                    required
                                    prop:value=move || form.get().category_id
                                    on:change=move |ev| set_form.update(|f| f.category_id = event_target_value(&ev))
                                >
                                    <option value="" disabled>"Selecione..."</option>
                                    <For
                                        each=move || ctx.store.categories().get()
                                        key=|category| category.id.clone()
                                        children=move |category: Category| {
                                            let selected = {
                                                let id = category.id.clone();
                                                move || form.get().category_id == id
                                            };
                                            view! {
                                                <option value=category.id.clone() selected=selected>
                                                    {category.name.clone()}
                                                </option>
                                            }
                                        }
                                    />
                                </select>
                            </div>
                        </div>

                        <div class="form-row optional">
                            <div>
                                <label for="item-photo">"Link da Foto (URL)"</label>
                                <input
                                    id="item-photo"
                                    type="url"
                                    placeholder="https://..."
                                    prop:value=move || form.get().photo_url
                                    on:input=move |ev| set_form.update(|f| f.photo_url = event_target_value(&ev))
                                />
                            </div>
                            <div>
                                <label for="item-link">"Link da Loja (URL)"</label>
                                <input
                                    id="item-link"
                                    type="url"
                                    placeholder="https://..."
                                    prop:value=move || form.get().product_url
                                    on:input=move |ev| set_form.update(|f| f.product_url = event_target_value(&ev))
                                />
                            </div>
                        </div>

                        <label for="item-notes">"Observações"</label>
                        <textarea
                            id="item-notes"
                            rows="2"
                            placeholder="Marca preferida, detalhes..."
                            prop:value=move || form.get().notes
                            on:input=move |ev| set_form.update(|f| f.notes = event_target_value(&ev))
                        ></textarea>

                        <div class="modal-actions">
                            <button type="button" class="secondary-btn" on:click=move |_| on_close.run(())>
                                "Cancelar"
                            </button>
                            <button type="submit" class="save-btn">"Salvar Item"</button>
                        </div>
                    </form>
                </div>
            </div>
        </Show>
    }
}
