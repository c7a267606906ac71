//! Category Card Component
//!
//! One category with its totals and items.

use leptos::prelude::*;
use leptos::task::spawn_local;
use shopping_list_lib::aggregate::{format_price, CategoryTotals};
use shopping_list_lib::domain::{Category, Item};
use shopping_list_lib::forms;

use crate::context::use_app_context;
use crate::router::confirm;

/// Single item row
#[component]
fn ItemRow(item: Item, #[prop(into)] on_edit: Callback<Item>) -> impl IntoView {
    let ctx = use_app_context();
    let id = item.id.clone();
    let completed = item.completed;

    let toggle = {
        let id = id.clone();
        move |_| {
            let id = id.clone();
            let shop = ctx.shop();
            spawn_local(async move {
                shop.toggle_item_completed(&id, completed).await;
            });
        }
    };

    let delete = move |_| {
        if !confirm("Excluir este item?") {
            return;
        }
        let id = id.clone();
        let shop = ctx.shop();
        spawn_local(async move {
            shop.delete_item(&id).await;
        });
    };

    let edit_item = item.clone();

    view! {
        <li class={if completed { "item-row completed" } else { "item-row" }}>
            <input type="checkbox" prop:checked=completed on:change=toggle />
            <div class="item-info">
                <div class="item-title">
                    <span class="item-name">{item.name.clone()}</span>
                    {item.product_url.clone().map(|url| view! {
                        <a href=url target="_blank" rel="noopener noreferrer" title="Ver Produto">"🔗"</a>
                    })}
                    {item.photo_url.clone().map(|url| view! {
                        <a href=url target="_blank" rel="noopener noreferrer" title="Ver Foto">"🖼"</a>
                    })}
                </div>
                {item.notes.clone().map(|notes| view! { <p class="item-notes">{notes}</p> })}
            </div>
            <span class="item-price">{format_price(item.price)}</span>
            <div class="item-actions">
                <button class="edit-btn" title="Editar" on:click=move |_| on_edit.run(edit_item.clone())>
                    "✎"
                </button>
                <button class="delete-btn" title="Excluir" on:click=delete>
                    "🗑"
                </button>
            </div>
        </li>
    }
}

/// Category header with inline rename, totals and the item list
#[component]
pub fn CategoryCard(
    category: Category,
    #[prop(into)] items: Signal<Vec<Item>>,
    #[prop(into)] totals: Signal<CategoryTotals>,
    #[prop(into)] on_edit_item: Callback<Item>,
) -> impl IntoView {
    let ctx = use_app_context();
    let (renaming, set_renaming) = signal(false);
    let (new_name, set_new_name) = signal(category.name.clone());

    let rename = {
        let id = category.id.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            let Ok(name) = forms::required_text("name", &new_name.get_untracked()) else {
                return;
            };
            set_renaming.set(false);
            let id = id.clone();
            let shop = ctx.shop();
            spawn_local(async move {
                shop.rename_category(&id, &name).await;
            });
        }
    };

    let delete = {
        let id = category.id.clone();
        move |_| {
            if !confirm("Excluir esta categoria e todos os seus itens?") {
                return;
            }
            let id = id.clone();
            let shop = ctx.shop();
            spawn_local(async move {
                shop.delete_category(&id).await;
            });
        }
    };

    let name = category.name.clone();

    view! {
        <section class="category-card">
            <div class="category-header">
                <div class="category-title">
                    <Show
                        when=move || renaming.get()
                        fallback={
                            let name = name.clone();
                            move || view! {
                                <h3>{name.clone()}</h3>
                                <button
                                    class="edit-btn"
                                    aria-label="Editar Categoria"
                                    on:click=move |_| set_renaming.set(true)
                                >
                                    "✎"
                                </button>
                            }
                        }
                    >
                        <form class="rename-form" on:submit=rename.clone()>
                            <input
                                type="text"
                                required
                                prop:value=move || new_name.get()
                                on:input=move |ev| set_new_name.set(event_target_value(&ev))
                            />
                            <button type="submit">"✓"</button>
                            <button type="button" on:click=move |_| set_renaming.set(false)>"✗"</button>
                        </form>
                    </Show>
                    <button class="delete-btn" title="Excluir Categoria" on:click=delete>
                        "🗑"
                    </button>
                </div>
                <div class="category-stats">
                    <span class="stat pending">
                        "A Pagar: " <strong>{move || format_price(totals.get().pending)}</strong>
                    </span>
                    <span class="stat paid">
                        "Pago: " <strong>{move || format_price(totals.get().paid)}</strong>
                    </span>
                </div>
            </div>
            <ul class="item-list">
                {move || {
                    let items = items.get();
                    if items.is_empty() {
                        view! { <li class="empty">"Nenhum item nesta categoria."</li> }.into_any()
                    } else {
                        items
                            .into_iter()
                            .map(|item| view! { <ItemRow item=item on_edit=on_edit_item /> })
                            .collect_view()
                            .into_any()
                    }
                }}
            </ul>
        </section>
    }
}
