//! In-Memory Remote Data Service
//!
//! A complete stand-in for the hosted backend: accounts, sessions, the three
//! owned tables and auth notifications, all held in process memory.
//! Rows are only visible to their owner, as with the hosted row-level
//! security policies. Used by tests and as the offline demo backend.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use tracing::debug;

use super::events::{AuthBroadcast, AuthChange, AuthEvents};
use super::query::{Collection, Filter, Query, CREATED_AT_COLUMN, ID_COLUMN, OWNER_COLUMN};
use super::traits::{Credentials, RemoteDataService};
use crate::domain::Identity;
use crate::error::{AuthError, RemoteError, RemoteResult};

const MIN_PASSWORD_LEN: usize = 6;

/// Remote call that can be made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetSession,
    SignIn,
    SignUp,
    ResetPassword,
    SignOut,
    Select,
    Insert,
    Update,
    Delete,
}

#[derive(Debug, Clone)]
struct Account {
    identity: Identity,
    password: String,
}

#[derive(Debug, Clone)]
struct StoredRow {
    seq: u64,
    value: Value,
}

#[derive(Default)]
struct MemoryState {
    accounts: Vec<Account>,
    session: Option<Identity>,
    tables: HashMap<Collection, Vec<StoredRow>>,
    next_seq: u64,
    failures: Vec<(Operation, Option<Collection>)>,
    reset_requests: Vec<(String, Option<String>)>,
}

impl MemoryState {
    fn next_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    fn failing(&self, op: Operation, collection: Option<Collection>) -> bool {
        self.failures
            .iter()
            .any(|(f_op, f_col)| *f_op == op && (f_col.is_none() || *f_col == collection))
    }

    fn current_owner(&self) -> RemoteResult<String> {
        self.session
            .as_ref()
            .map(|identity| identity.id.clone())
            .ok_or(RemoteError::NotAuthenticated)
    }
}

/// Backend held entirely in memory
#[derive(Default)]
pub struct MemoryRemote {
    state: Mutex<MemoryState>,
    auth: AuthBroadcast,
}

impl MemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Register an account without signing it in; returns its identity
    pub fn register(&self, email: &str, password: &str) -> Identity {
        let mut state = self.lock();
        let identity = Identity::new(uuid::Uuid::new_v4().to_string(), Some(email.to_string()));
        state.accounts.push(Account {
            identity: identity.clone(),
            password: password.to_string(),
        });
        identity
    }

    /// Make every future `op` fail (optionally only on `collection`)
    pub fn fail(&self, op: Operation, collection: Option<Collection>) {
        self.lock().failures.push((op, collection));
    }

    pub fn clear_failures(&self) {
        self.lock().failures.clear();
    }

    /// All rows of a table regardless of owner
    pub fn rows(&self, collection: Collection) -> Vec<Value> {
        self.lock()
            .tables
            .get(&collection)
            .map(|rows| rows.iter().map(|row| row.value.clone()).collect())
            .unwrap_or_default()
    }

    /// Password-reset requests received so far, as `(email, redirect_to)`
    pub fn reset_requests(&self) -> Vec<(String, Option<String>)> {
        self.lock().reset_requests.clone()
    }

    fn check(&self, op: Operation, collection: Option<Collection>) -> RemoteResult<()> {
        if self.lock().failing(op, collection) {
            return Err(RemoteError::Unavailable(format!("{:?} failed", op)));
        }
        Ok(())
    }

    fn check_auth(&self, op: Operation) -> Result<(), AuthError> {
        if self.lock().failing(op, None) {
            return Err(AuthError::with_status(503, "Service unavailable"));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl RemoteDataService for MemoryRemote {
    async fn get_session(&self) -> RemoteResult<Option<Identity>> {
        self.check(Operation::GetSession, None)?;
        Ok(self.lock().session.clone())
    }

    fn on_auth_change(&self) -> AuthEvents {
        self.auth.subscribe()
    }

    async fn sign_in_with_password(&self, credentials: &Credentials) -> Result<(), AuthError> {
        self.check_auth(Operation::SignIn)?;
        let identity = {
            let mut state = self.lock();
            let account = state
                .accounts
                .iter()
                .find(|a| a.identity.email.as_deref() == Some(credentials.email.as_str()))
                .filter(|a| a.password == credentials.password)
                .ok_or_else(|| AuthError::with_status(400, "Invalid login credentials"))?;
            let identity = account.identity.clone();
            state.session = Some(identity.clone());
            identity
        };
        debug!(user = %identity.id, "memory sign-in");
        self.auth.emit(AuthChange::signed_in(identity));
        Ok(())
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<(), AuthError> {
        self.check_auth(Operation::SignUp)?;
        if credentials.password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::with_status(
                422,
                "Password should be at least 6 characters.",
            ));
        }
        let exists = self
            .lock()
            .accounts
            .iter()
            .any(|a| a.identity.email.as_deref() == Some(credentials.email.as_str()));
        if exists {
            return Err(AuthError::with_status(422, "User already registered"));
        }

        let identity = self.register(&credentials.email, &credentials.password);
        self.lock().session = Some(identity.clone());
        self.auth.emit(AuthChange::signed_in(identity));
        Ok(())
    }

    async fn reset_password_for_email(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> Result<(), AuthError> {
        self.check_auth(Operation::ResetPassword)?;
        self.lock()
            .reset_requests
            .push((email.to_string(), redirect_to.map(str::to_string)));
        Ok(())
    }

    async fn sign_out(&self) -> RemoteResult<()> {
        self.check(Operation::SignOut, None)?;
        let had_session = self.lock().session.take().is_some();
        if had_session {
            self.auth.emit(AuthChange::signed_out());
        }
        Ok(())
    }

    async fn select(&self, collection: Collection, query: &Query) -> RemoteResult<Vec<Value>> {
        self.check(Operation::Select, Some(collection))?;
        let state = self.lock();
        let owner = state.current_owner()?;

        let mut rows: Vec<&StoredRow> = state
            .tables
            .get(&collection)
            .map(|rows| {
                rows.iter()
                    .filter(|row| Filter::owned_by(&owner).matches(&row.value))
                    .filter(|row| query.filter.matches(&row.value))
                    .collect()
            })
            .unwrap_or_default();

        if let Some(order) = &query.order {
            rows.sort_by(|a, b| order.compare(&a.value, &b.value).then(a.seq.cmp(&b.seq)));
        }

        Ok(rows.into_iter().map(|row| row.value.clone()).collect())
    }

    async fn insert(&self, collection: Collection, rows: Vec<Value>) -> RemoteResult<()> {
        self.check(Operation::Insert, Some(collection))?;
        let mut state = self.lock();
        let owner = state.current_owner()?;

        let mut prepared = Vec::with_capacity(rows.len());
        for row in rows {
            let Value::Object(mut fields) = row else {
                return Err(RemoteError::Api {
                    status: 400,
                    message: "row must be a JSON object".to_string(),
                });
            };
            if !Filter::owned_by(&owner).matches(&Value::Object(fields.clone())) {
                return Err(RemoteError::Api {
                    status: 403,
                    message: format!(
                        "new row violates row-level security policy for table \"{}\"",
                        collection
                    ),
                });
            }
            fields
                .entry(ID_COLUMN)
                .or_insert_with(|| Value::String(uuid::Uuid::new_v4().to_string()));
            fields.entry(CREATED_AT_COLUMN).or_insert_with(|| {
                Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true))
            });
            prepared.push(Value::Object(fields));
        }

        for value in prepared {
            let seq = state.next_seq();
            state
                .tables
                .entry(collection)
                .or_default()
                .push(StoredRow { seq, value });
        }
        Ok(())
    }

    async fn update(&self, collection: Collection, filter: &Filter, patch: Value) -> RemoteResult<()> {
        self.check(Operation::Update, Some(collection))?;
        let Value::Object(patch) = patch else {
            return Err(RemoteError::Api {
                status: 400,
                message: "patch must be a JSON object".to_string(),
            });
        };
        let mut state = self.lock();
        let owner = state.current_owner()?;

        if let Some(rows) = state.tables.get_mut(&collection) {
            for row in rows.iter_mut() {
                if row.value.get(OWNER_COLUMN).and_then(Value::as_str) != Some(owner.as_str())
                    || !filter.matches(&row.value)
                {
                    continue;
                }
                if let Value::Object(fields) = &mut row.value {
                    for (key, value) in &patch {
                        fields.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        Ok(())
    }

    async fn delete(&self, collection: Collection, filter: &Filter) -> RemoteResult<()> {
        self.check(Operation::Delete, Some(collection))?;
        let mut state = self.lock();
        let owner = state.current_owner()?;

        if let Some(rows) = state.tables.get_mut(&collection) {
            rows.retain(|row| {
                !(Filter::owned_by(&owner).matches(&row.value) && filter.matches(&row.value))
            });
        }
        Ok(())
    }
}
