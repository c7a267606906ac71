//! Page Shell
//!
//! Header and side menu around the content of a signed-in page.

use leptos::prelude::*;

use super::{Header, SideMenu};

#[component]
pub fn PageShell(children: Children) -> impl IntoView {
    let (menu_open, set_menu_open) = signal(false);

    view! {
        <div class="page">
            <Header on_menu=Callback::new(move |_| set_menu_open.set(true)) />
            <SideMenu open=menu_open on_close=Callback::new(move |_| set_menu_open.set(false)) />
            <main class="page-main">{children()}</main>
        </div>
    }
}
