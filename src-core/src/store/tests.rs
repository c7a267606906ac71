//! Store Integration Tests
//!
//! Session and domain operations against the in-memory backend.

use std::sync::{Arc, Mutex};

use super::*;
use crate::domain::{Category, Item, ItemDraft, ItemRow, Message};
use crate::remote::{
    select_rows, AuthBroadcast, AuthChange, Collection, MemoryRemote, Operation, Query,
};
use crate::state::{Action, SharedState};

const PASSWORD: &str = "secret123";

/// State handle that also records every dispatched action
#[derive(Clone, Default)]
struct RecordingState {
    inner: SharedState,
    actions: Arc<Mutex<Vec<Action>>>,
}

impl RecordingState {
    fn actions(&self) -> Vec<Action> {
        self.actions.lock().unwrap().clone()
    }
}

impl StateHandle for RecordingState {
    fn snapshot(&self) -> AppState {
        self.inner.snapshot()
    }

    fn dispatch(&self, action: Action) {
        self.actions.lock().unwrap().push(action.clone());
        self.inner.dispatch(action);
    }
}

async fn setup_store() -> (Arc<MemoryRemote>, ShoppingStore<SharedState>) {
    let remote = Arc::new(MemoryRemote::new());
    let store = ShoppingStore::new(remote.clone(), SharedState::new());
    (remote, store)
}

async fn signed_in_store(email: &str) -> (Arc<MemoryRemote>, ShoppingStore<SharedState>) {
    let (remote, store) = setup_store().await;
    store.sign_up(email, PASSWORD).await.expect("sign-up failed");
    store.initial_session().await;
    (remote, store)
}

fn draft(name: &str, price: f64, category_id: &str) -> ItemDraft {
    ItemDraft {
        name: name.to_string(),
        price,
        category_id: category_id.to_string(),
        ..Default::default()
    }
}

async fn with_category(store: &ShoppingStore<SharedState>, name: &str) -> String {
    store.add_category(name).await;
    store
        .snapshot()
        .categories
        .iter()
        .find(|c| c.name == name)
        .map(|c| c.id.clone())
        .expect("category not created")
}

#[tokio::test]
async fn test_initial_session_without_account() {
    let (_remote, store) = setup_store().await;
    assert!(store.snapshot().loading);

    store.initial_session().await;

    let state = store.snapshot();
    assert!(!state.loading);
    assert!(!state.is_authenticated());
}

#[tokio::test]
async fn test_initial_session_failure_resolves_as_guest() {
    let (remote, store) = setup_store().await;
    remote.fail(Operation::GetSession, None);

    store.initial_session().await;

    assert!(!store.snapshot().loading);
    assert_eq!(store.snapshot().identity, None);
}

#[tokio::test]
async fn test_initial_session_hydrates() {
    let (_remote, store) = signed_in_store("ana@x.com").await;
    let category_id = with_category(&store, "Feira").await;
    store.add_item(&draft("Banana", 4.5, &category_id)).await;

    let fresh = ShoppingStore::new(Arc::clone(&store.remote), SharedState::new());
    fresh.initial_session().await;

    let state = fresh.snapshot();
    assert_eq!(state.identity.and_then(|i| i.email).as_deref(), Some("ana@x.com"));
    assert_eq!(state.categories.len(), 1);
    assert_eq!(state.items.len(), 1);
}

#[tokio::test]
async fn test_sign_in_errors_are_returned() {
    let (remote, store) = setup_store().await;
    remote.register("ana@x.com", PASSWORD);

    let err = store.sign_in("ana@x.com", "wrong").await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid login credentials");
    assert!(store.sign_in("ana@x.com", PASSWORD).await.is_ok());
}

#[tokio::test]
async fn test_sign_up_short_password_rejected() {
    let (_remote, store) = setup_store().await;
    assert!(store.sign_up("ana@x.com", "123").await.is_err());
}

#[tokio::test]
async fn test_password_reset_forwards_redirect() {
    let (remote, store) = setup_store().await;
    store
        .send_password_reset("ana@x.com", Some("https://app.example/#/account"))
        .await
        .unwrap();

    assert_eq!(
        remote.reset_requests(),
        vec![(
            "ana@x.com".to_string(),
            Some("https://app.example/#/account".to_string())
        )]
    );
}

#[tokio::test]
async fn test_hydrate_mirrors_remote_rows() {
    let (_remote, store) = signed_in_store("ana@x.com").await;
    let market = with_category(&store, "Mercado").await;
    store.add_item(&draft("Arroz", 10.0, &market)).await;
    store.add_item(&draft("Feijão", 5.0, &market)).await;
    store.add_message("oi").await;

    // local state drifts away from the remote rows
    let owner_id = store.snapshot().identity.unwrap().id;
    let mut stale = store.snapshot();
    stale.categories[0].name = "Antiga".to_string();
    stale.items[0].completed = true;
    stale.items.push(Item {
        id: "ghost".to_string(),
        ..stale.items[1].clone()
    });
    stale.messages.clear();
    store.state().dispatch(Action::CategoriesLoaded {
        owner_id: owner_id.clone(),
        categories: stale.categories,
    });
    store.state().dispatch(Action::ItemsLoaded {
        owner_id: owner_id.clone(),
        items: stale.items,
    });
    store.state().dispatch(Action::MessagesLoaded {
        owner_id: owner_id.clone(),
        messages: stale.messages,
    });
    assert_eq!(store.snapshot().items.len(), 3);

    store.hydrate(&owner_id).await;

    let query = Query::owned_by(&owner_id);
    let categories: Vec<Category> = select_rows(store.remote(), Collection::Categories, &query)
        .await
        .unwrap();
    let items: Vec<Item> = select_rows::<ItemRow>(store.remote(), Collection::Items, &query)
        .await
        .unwrap()
        .into_iter()
        .map(Item::from)
        .collect();
    let messages: Vec<Message> = select_rows(store.remote(), Collection::Messages, &query)
        .await
        .unwrap();

    let state = store.snapshot();
    assert_eq!(state.categories, categories);
    assert_eq!(state.items, items);
    assert_eq!(state.messages, messages);
    let names: Vec<_> = state.items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Arroz", "Feijão"]);
}

#[tokio::test]
async fn test_failed_add_category_leaves_state() {
    let (remote, store) = signed_in_store("ana@x.com").await;
    with_category(&store, "Feira").await;
    let before = store.snapshot();

    remote.fail(Operation::Insert, Some(Collection::Categories));
    store.add_category("Farmácia").await;

    assert_eq!(store.snapshot(), before);
}

#[tokio::test]
async fn test_mutations_need_identity() {
    let (remote, store) = setup_store().await;
    store.add_category("Feira").await;
    store.add_message("oi").await;

    assert!(remote.rows(Collection::Categories).is_empty());
    assert!(remote.rows(Collection::Messages).is_empty());
    assert_eq!(store.delete_account().await, AccountDeletion::default());
}

#[tokio::test]
async fn test_rename_and_delete_category() {
    let (remote, store) = signed_in_store("ana@x.com").await;
    let id = with_category(&store, "Feira").await;
    let other = with_category(&store, "Padaria").await;
    store.add_item(&draft("Maçã", 3.0, &id)).await;
    store.add_item(&draft("Pão", 1.0, &other)).await;

    store.rename_category(&id, "Hortifruti").await;
    assert_eq!(store.snapshot().category(&id).unwrap().name, "Hortifruti");

    store.delete_category(&id).await;
    let state = store.snapshot();
    assert!(state.category(&id).is_none());
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].category_id, other);
    assert_eq!(remote.rows(Collection::Items).len(), 1);
}

#[tokio::test]
async fn test_update_item() {
    let (_remote, store) = signed_in_store("ana@x.com").await;
    let id = with_category(&store, "Feira").await;
    store.add_item(&draft("Maçã", 3.0, &id)).await;
    let item_id = store.snapshot().items[0].id.clone();

    let mut changed = draft("Maçã verde", 4.25, &id);
    changed.notes = Some("bem madura".to_string());
    store.update_item(&item_id, &changed).await;

    let state = store.snapshot();
    let item = state.item(&item_id).unwrap();
    assert_eq!(item.name, "Maçã verde");
    assert_eq!(item.price, 4.25);
    assert_eq!(item.notes.as_deref(), Some("bem madura"));
}

#[tokio::test]
async fn test_toggle_and_delete_item() {
    let (remote, store) = signed_in_store("ana@x.com").await;
    let id = with_category(&store, "Feira").await;
    store.add_item(&draft("Maçã", 3.0, &id)).await;
    let item_id = store.snapshot().items[0].id.clone();

    store.toggle_item_completed(&item_id, false).await;
    assert!(store.snapshot().item(&item_id).unwrap().completed);
    assert_eq!(remote.rows(Collection::Items)[0]["completed"], true);

    store.delete_item(&item_id).await;
    assert!(store.snapshot().items.is_empty());
}

#[tokio::test]
async fn test_failed_toggle_is_reconciled() {
    let remote = Arc::new(MemoryRemote::new());
    let state = RecordingState::default();
    let store = ShoppingStore::new(remote.clone(), state.clone());
    store.sign_up("ana@x.com", PASSWORD).await.unwrap();
    store.initial_session().await;
    store.add_category("Feira").await;
    let category_id = store.snapshot().categories[0].id.clone();
    store.add_item(&draft("Maçã", 3.0, &category_id)).await;
    let item_id = store.snapshot().items[0].id.clone();

    remote.fail(Operation::Update, Some(Collection::Items));
    store.toggle_item_completed(&item_id, false).await;

    // flipped first, then overwritten by the re-fetch
    let actions = state.actions();
    let flip = actions
        .iter()
        .position(|a| matches!(a, Action::ItemCompletedSet { completed: true, .. }))
        .expect("no optimistic flip");
    assert!(actions[flip..]
        .iter()
        .any(|a| matches!(a, Action::ItemsLoaded { .. })));
    assert!(!store.snapshot().item(&item_id).unwrap().completed);
}

#[tokio::test]
async fn test_message_author_from_email() {
    let (_remote, store) = signed_in_store("bob@x.com").await;
    store.add_message("cheguei").await;

    let state = store.snapshot();
    assert_eq!(state.messages.len(), 1);
    assert_eq!(state.messages[0].author_name, "bob");
    assert_eq!(state.messages[0].text, "cheguei");
}

#[tokio::test]
async fn test_sign_out_clears_state() {
    let (remote, store) = signed_in_store("ana@x.com").await;
    with_category(&store, "Feira").await;

    store.sign_out().await;

    let state = store.snapshot();
    assert!(!state.is_authenticated());
    assert!(state.categories.is_empty());
    assert_eq!(remote.rows(Collection::Categories).len(), 1);
}

#[tokio::test]
async fn test_sign_out_failure_still_clears_local() {
    let (remote, store) = signed_in_store("ana@x.com").await;
    remote.fail(Operation::SignOut, None);

    store.sign_out().await;
    assert!(!store.snapshot().is_authenticated());
}

#[tokio::test]
async fn test_delete_account_removes_owned_rows() {
    let (remote, store) = signed_in_store("ana@x.com").await;
    let id = with_category(&store, "Feira").await;
    store.add_item(&draft("Maçã", 3.0, &id)).await;
    store.add_message("oi").await;

    let report = store.delete_account().await;
    assert!(report.is_complete());
    assert!(!store.snapshot().is_authenticated());
    for collection in Collection::ALL {
        assert!(remote.rows(collection).is_empty(), "{} not emptied", collection);
    }

    store.sign_in("ana@x.com", PASSWORD).await.unwrap();
    store.initial_session().await;
    let state = store.snapshot();
    assert!(state.categories.is_empty() && state.items.is_empty() && state.messages.is_empty());
}

#[tokio::test]
async fn test_delete_account_partial_failure() {
    let (remote, store) = signed_in_store("ana@x.com").await;
    let id = with_category(&store, "Feira").await;
    store.add_item(&draft("Maçã", 3.0, &id)).await;
    store.add_message("oi").await;

    remote.fail(Operation::Delete, Some(Collection::Categories));
    let report = store.delete_account().await;

    assert_eq!(report.failed, vec![Collection::Categories]);
    assert!(!store.snapshot().is_authenticated());
    assert!(remote.rows(Collection::Items).is_empty());
    assert!(remote.rows(Collection::Messages).is_empty());
    assert_eq!(remote.rows(Collection::Categories).len(), 1);
}

#[tokio::test]
async fn test_other_owner_rows_invisible() {
    let (remote, store) = signed_in_store("ana@x.com").await;
    with_category(&store, "Feira").await;
    store.sign_out().await;

    store.sign_up("bob@x.com", PASSWORD).await.unwrap();
    store.initial_session().await;

    assert!(store.snapshot().categories.is_empty());
    assert_eq!(remote.rows(Collection::Categories).len(), 1);
}

#[tokio::test]
async fn test_listen_auth_changes() {
    let (remote, store) = setup_store().await;
    let ana = remote.register("ana@x.com", PASSWORD);
    store.sign_in("ana@x.com", PASSWORD).await.unwrap();
    store.initial_session().await;
    with_category(&store, "Feira").await;

    let broadcast = AuthBroadcast::default();
    let events = broadcast.subscribe();
    broadcast.emit(AuthChange::signed_out());
    broadcast.emit(AuthChange::signed_in(ana.clone()));
    drop(broadcast);

    store.listen_auth_changes(events).await;

    let state = store.snapshot();
    assert_eq!(state.identity, Some(ana));
    assert_eq!(state.categories.len(), 1);
}

#[tokio::test]
async fn test_remote_notifies_sign_in() {
    let (remote, store) = setup_store().await;
    remote.register("ana@x.com", PASSWORD);
    let mut events = remote.on_auth_change();

    store.sign_in("ana@x.com", PASSWORD).await.unwrap();
    let change = futures::StreamExt::next(&mut events).await.unwrap();
    store.handle_auth_change(change.identity).await;

    assert_eq!(store.snapshot().identity.and_then(|i| i.email).as_deref(), Some("ana@x.com"));
}
