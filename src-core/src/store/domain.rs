//! Domain operations: hydration and write-through mutations.
//!
//! Every successful write is followed by a full re-fetch; a failed write is
//! logged and leaves local state as it was. The completion toggle is the one
//! optimistic operation: it flips locally first and, if the write fails, the
//! re-fetch is what corrects it.

use serde_json::json;
use tracing::{error, warn};

use super::ShoppingStore;
use crate::domain::{
    Category, Item, ItemDraft, ItemPatch, ItemRow, Message, NewCategoryRow, NewItemRow,
    NewMessageRow,
};
use crate::error::RemoteResult;
use crate::remote::{insert_row, select_rows, Collection, Filter, Query};
use crate::state::{Action, StateHandle};

impl<S: StateHandle> ShoppingStore<S> {
    /// Replace the three local collections with the remote rows of `owner_id`.
    ///
    /// Each collection is replaced independently; one that fails to load
    /// keeps its previous contents.
    pub async fn hydrate(&self, owner_id: &str) {
        let query = Query::owned_by(owner_id);

        match select_rows::<Category>(self.remote(), Collection::Categories, &query).await {
            Ok(categories) => self.state.dispatch(Action::CategoriesLoaded {
                owner_id: owner_id.to_string(),
                categories,
            }),
            Err(e) => warn!("failed to load categories: {}", e),
        }

        match select_rows::<ItemRow>(self.remote(), Collection::Items, &query).await {
            Ok(rows) => self.state.dispatch(Action::ItemsLoaded {
                owner_id: owner_id.to_string(),
                items: rows.into_iter().map(Item::from).collect(),
            }),
            Err(e) => warn!("failed to load items: {}", e),
        }

        match select_rows::<Message>(self.remote(), Collection::Messages, &query).await {
            Ok(messages) => self.state.dispatch(Action::MessagesLoaded {
                owner_id: owner_id.to_string(),
                messages,
            }),
            Err(e) => warn!("failed to load messages: {}", e),
        }
    }

    pub async fn add_category(&self, name: &str) {
        let Some(identity) = self.require_identity("add_category") else {
            return;
        };
        let row = NewCategoryRow {
            name,
            user_id: &identity.id,
        };
        self.write_then_hydrate(
            "create category",
            &identity.id,
            insert_row(self.remote(), Collection::Categories, &row).await,
        )
        .await;
    }

    pub async fn rename_category(&self, category_id: &str, name: &str) {
        let Some(identity) = self.require_identity("rename_category") else {
            return;
        };
        let result = self
            .remote
            .update(
                Collection::Categories,
                &Filter::by_id(category_id),
                json!({ "name": name }),
            )
            .await;
        self.write_then_hydrate("rename category", &identity.id, result).await;
    }

    /// Delete a category together with the items listed under it
    pub async fn delete_category(&self, category_id: &str) {
        let Some(identity) = self.require_identity("delete_category") else {
            return;
        };
        let items = Filter::owned_by(&identity.id).and_eq("category_id", category_id);
        if let Err(e) = self.remote.delete(Collection::Items, &items).await {
            error!("failed to delete category items: {}", e);
            return;
        }
        if let Err(e) = self
            .remote
            .delete(Collection::Categories, &Filter::by_id(category_id))
            .await
        {
            error!("failed to delete category: {}", e);
        }
        // Items are gone either way; re-fetch what the server now holds.
        self.hydrate(&identity.id).await;
    }

    pub async fn add_item(&self, draft: &ItemDraft) {
        let Some(identity) = self.require_identity("add_item") else {
            return;
        };
        let row = NewItemRow::new(draft, &identity.id);
        self.write_then_hydrate(
            "add item",
            &identity.id,
            insert_row(self.remote(), Collection::Items, &row).await,
        )
        .await;
    }

    pub async fn update_item(&self, item_id: &str, draft: &ItemDraft) {
        let Some(identity) = self.require_identity("update_item") else {
            return;
        };
        let patch = match serde_json::to_value(ItemPatch::from(draft)) {
            Ok(patch) => patch,
            Err(e) => {
                error!("failed to encode item update: {}", e);
                return;
            }
        };
        let result = self
            .remote
            .update(Collection::Items, &Filter::by_id(item_id), patch)
            .await;
        self.write_then_hydrate("update item", &identity.id, result).await;
    }

    /// Flip an item's completion flag.
    ///
    /// The new flag is shown immediately. On a failed write the state is
    /// re-fetched rather than rolled back, so it is eventually consistent.
    pub async fn toggle_item_completed(&self, item_id: &str, current_status: bool) {
        let Some(identity) = self.require_identity("toggle_item_completed") else {
            return;
        };
        let completed = !current_status;
        self.state.dispatch(Action::ItemCompletedSet {
            item_id: item_id.to_string(),
            completed,
        });

        let result = self
            .remote
            .update(
                Collection::Items,
                &Filter::by_id(item_id),
                json!({ "completed": completed }),
            )
            .await;
        if let Err(e) = result {
            error!("failed to update item: {}", e);
            self.hydrate(&identity.id).await;
        }
    }

    pub async fn delete_item(&self, item_id: &str) {
        let Some(identity) = self.require_identity("delete_item") else {
            return;
        };
        let result = self
            .remote
            .delete(Collection::Items, &Filter::by_id(item_id))
            .await;
        self.write_then_hydrate("delete item", &identity.id, result).await;
    }

    pub async fn add_message(&self, text: &str) {
        let Some(identity) = self.require_identity("add_message") else {
            return;
        };
        let author = identity.display_name();
        let row = NewMessageRow {
            text,
            user_name: &author,
            user_id: &identity.id,
        };
        self.write_then_hydrate(
            "send message",
            &identity.id,
            insert_row(self.remote(), Collection::Messages, &row).await,
        )
        .await;
    }

    async fn write_then_hydrate(&self, what: &str, owner_id: &str, result: RemoteResult<()>) {
        match result {
            Ok(()) => self.hydrate(owner_id).await,
            Err(e) => error!("failed to {}: {}", what, e),
        }
    }
}
