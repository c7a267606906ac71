//! Session operations: who is signed in, and what happens when that changes.

use futures::StreamExt;
use tracing::{error, info, warn};

use super::ShoppingStore;
use crate::domain::Identity;
use crate::error::AuthError;
use crate::remote::{AuthEvents, Collection, Credentials, Filter};
use crate::state::{Action, StateHandle};

/// Outcome of [`ShoppingStore::delete_account`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountDeletion {
    /// Collections whose delete failed, in the order they were attempted
    pub failed: Vec<Collection>,
}

impl AccountDeletion {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Owned data is removed items first so no item outlives its category
const DELETION_ORDER: [Collection; 3] = [Collection::Items, Collection::Categories, Collection::Messages];

impl<S: StateHandle> ShoppingStore<S> {
    /// Startup probe for an existing session
    pub async fn initial_session(&self) {
        let identity = match self.remote.get_session().await {
            Ok(identity) => identity,
            Err(e) => {
                warn!("session probe failed: {}", e);
                None
            }
        };
        self.state.dispatch(Action::SessionResolved(identity.clone()));
        if let Some(identity) = identity {
            self.hydrate(&identity.id).await;
        }
    }

    /// React to an auth state change reported by the remote service
    pub async fn handle_auth_change(&self, identity: Option<Identity>) {
        self.state.dispatch(Action::AuthChanged(identity.clone()));
        if let Some(identity) = identity {
            self.hydrate(&identity.id).await;
        }
    }

    /// Drive [`handle_auth_change`](Self::handle_auth_change) from a subscription
    /// until the remote service drops it
    pub async fn listen_auth_changes(&self, mut events: AuthEvents) {
        while let Some(change) = events.next().await {
            info!(event = ?change.event, "auth state changed");
            self.handle_auth_change(change.identity).await;
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.remote
            .sign_in_with_password(&Credentials::new(email, password))
            .await
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.remote.sign_up(&Credentials::new(email, password)).await
    }

    pub async fn send_password_reset(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> Result<(), AuthError> {
        self.remote.reset_password_for_email(email, redirect_to).await
    }

    pub async fn sign_out(&self) {
        if let Err(e) = self.remote.sign_out().await {
            error!("sign-out failed: {}", e);
        }
        self.state.dispatch(Action::AuthChanged(None));
    }

    /// Delete everything the signed-in identity owns, then sign out.
    ///
    /// Steps are independent: a failed delete is recorded and the remaining
    /// steps and the sign-out still run. Nothing is rolled back.
    pub async fn delete_account(&self) -> AccountDeletion {
        let mut report = AccountDeletion::default();
        let Some(identity) = self.require_identity("delete_account") else {
            return report;
        };

        let owner = Filter::owned_by(&identity.id);
        for collection in DELETION_ORDER {
            if let Err(e) = self.remote.delete(collection, &owner).await {
                error!(%collection, "account data deletion failed: {}", e);
                report.failed.push(collection);
            }
        }

        self.sign_out().await;
        report
    }
}
