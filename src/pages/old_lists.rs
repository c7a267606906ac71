//! Old Lists Page (placeholder)

use leptos::prelude::*;

use crate::components::PageShell;

#[component]
pub fn OldLists() -> impl IntoView {
    view! {
        <PageShell>
            <div class="panel">
                <h1>"Listas Antigas"</h1>
                <p>
                    "Esta funcionalidade estará disponível em breve! Aqui você poderá ver suas listas de compras salvas anteriormente."
                </p>
            </div>
        </PageShell>
    }
}
