//! UI Components
//!
//! Reusable Leptos components.

mod header;
mod side_menu;
mod page_shell;
mod add_category_modal;
mod item_modal;
mod category_card;
mod chat;

pub use header::Header;
pub use side_menu::SideMenu;
pub use page_shell::PageShell;
pub use add_category_modal::AddCategoryModal;
pub use item_modal::{ItemModal, ItemModalMode};
pub use category_card::CategoryCard;
pub use chat::Chat;
