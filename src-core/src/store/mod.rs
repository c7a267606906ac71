//! Session and Domain Stores
//!
//! [`ShoppingStore`] mediates every remote call the application makes and
//! feeds the results into the [`StateHandle`] as [`Action`](crate::state::Action)s.
//! - session: sign-in/out, auth notifications, account deletion
//! - domain: hydration and write-then-refetch mutations

mod session;
mod domain;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use tracing::debug;

use crate::domain::Identity;
use crate::remote::RemoteDataService;
use crate::state::{AppState, StateHandle};

pub use session::AccountDeletion;

/// Operations of the application over a remote service and a state handle
pub struct ShoppingStore<S: StateHandle> {
    remote: Arc<dyn RemoteDataService>,
    state: S,
}

impl<S: StateHandle> Clone for ShoppingStore<S> {
    fn clone(&self) -> Self {
        Self {
            remote: Arc::clone(&self.remote),
            state: self.state.clone(),
        }
    }
}

impl<S: StateHandle> ShoppingStore<S> {
    pub fn new(remote: Arc<dyn RemoteDataService>, state: S) -> Self {
        Self { remote, state }
    }

    pub fn remote(&self) -> &dyn RemoteDataService {
        self.remote.as_ref()
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn snapshot(&self) -> AppState {
        self.state.snapshot()
    }

    /// Signed-in identity, or `None` (logged) for mutations that need one
    fn require_identity(&self, operation: &str) -> Option<Identity> {
        let identity = self.state.identity();
        if identity.is_none() {
            debug!(operation, "ignored: no signed-in identity");
        }
        identity
    }
}
