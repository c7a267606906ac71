//! Remote Data Service - Capability Trait
//!
//! The hosted backend as seen by the application: auth plus generic CRUD on
//! the owned collections. Implementations can talk HTTP, live in memory, etc.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use super::events::AuthEvents;
use super::query::{Collection, Filter, Query};
use crate::domain::Identity;
use crate::error::{AuthError, RemoteResult};

/// Email/password pair for sign-in and sign-up
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Auth and record storage provided by the backend
///
/// Futures are not `Send`: the application drives them from a single
/// thread (the browser event loop, or a current-thread runtime in tests).
#[async_trait(?Send)]
pub trait RemoteDataService: Send + Sync {
    /// Identity of an existing session, if any
    async fn get_session(&self) -> RemoteResult<Option<Identity>>;

    /// Subscribe to auth state changes
    fn on_auth_change(&self) -> AuthEvents;

    async fn sign_in_with_password(&self, credentials: &Credentials) -> Result<(), AuthError>;

    async fn sign_up(&self, credentials: &Credentials) -> Result<(), AuthError>;

    /// Send a password-reset email whose link lands on `redirect_to`
    async fn reset_password_for_email(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> Result<(), AuthError>;

    async fn sign_out(&self) -> RemoteResult<()>;

    /// Read rows of `collection`
    async fn select(&self, collection: Collection, query: &Query) -> RemoteResult<Vec<Value>>;

    /// Insert new rows into `collection`
    async fn insert(&self, collection: Collection, rows: Vec<Value>) -> RemoteResult<()>;

    /// Apply `patch` to every row matching `filter`
    async fn update(&self, collection: Collection, filter: &Filter, patch: Value) -> RemoteResult<()>;

    /// Delete every row matching `filter`
    async fn delete(&self, collection: Collection, filter: &Filter) -> RemoteResult<()>;
}
