//! Domain Layer
//!
//! Records mirrored from the remote service and their wire shapes.

mod entity;
mod identity;
mod category;
mod item;
mod message;

pub use entity::{find_by_id, Entity, DomainError, DomainResult, RecordId};
pub use identity::{Identity, FALLBACK_DISPLAY_NAME};
pub use category::{Category, NewCategoryRow};
pub use item::{Item, ItemDraft, ItemPatch, ItemRow, NewItemRow};
pub use message::{Message, NewMessageRow};
