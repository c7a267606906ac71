//! Dashboard Page
//!
//! The shopping list: categories with their items and totals, plus the
//! category, item and chat modals.

use leptos::prelude::*;
use shopping_list_lib::aggregate::{category_totals, items_by_category};
use shopping_list_lib::domain::Category;

use crate::components::{AddCategoryModal, CategoryCard, Chat, ItemModal, ItemModalMode, PageShell};
use crate::context::use_app_context;
use crate::store::UiStateStoreFields;

#[component]
pub fn Dashboard() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;

    let (category_modal, set_category_modal) = signal(false);
    let (item_modal, set_item_modal) = signal(None::<ItemModalMode>);
    let (chat_open, set_chat_open) = signal(false);

    let groups = Memo::new(move |_| items_by_category(&store.items().read()));
    let totals = Memo::new(move |_| category_totals(&store.categories().read(), &groups.read()));
    let no_categories = move || store.categories().read().is_empty();

    let card = move |category: Category| {
        let items_id = category.id.clone();
        let totals_id = category.id.clone();
        view! {
            <CategoryCard
                category=category
                items=Signal::derive(move || groups.with(|g| g.get(&items_id).cloned().unwrap_or_default()))
                totals=Signal::derive(move || totals.with(|t| t.get(&totals_id).copied().unwrap_or_default()))
                on_edit_item=Callback::new(move |item| set_item_modal.set(Some(ItemModalMode::Edit(item))))
            />
        }
    };

    view! {
        <PageShell>
            <div class="dashboard">
                <div class="action-bar">
                    <button class="primary-btn" on:click=move |_| set_category_modal.set(true)>
                        "+ Categoria"
                    </button>
                    <button
                        class="add-item-btn"
                        disabled=no_categories
                        on:click=move |_| set_item_modal.set(Some(ItemModalMode::New))
                    >
                        "+ Novo Item"
                    </button>
                </div>

                <Show when=no_categories>
                    <div class="empty-list">
                        <p class="lead">"Sua lista está vazia."</p>
                        <p>"Comece adicionando uma categoria acima."</p>
                    </div>
                </Show>

                <div class="category-list">
                    <For
                        each=move || store.categories().get()
                        key=|category| (category.id.clone(), category.name.clone())
                        children=card
                    />
                </div>
            </div>

            <AddCategoryModal open=category_modal on_close=Callback::new(move |_| set_category_modal.set(false)) />
            <ItemModal mode=item_modal on_close=Callback::new(move |_| set_item_modal.set(None)) />
            <Chat open=chat_open on_close=Callback::new(move |_| set_chat_open.set(false)) />

            <button class="chat-fab" aria-label="Abrir chat" on:click=move |_| set_chat_open.set(true)>
                "💬"
            </button>
        </PageShell>
    }
}
