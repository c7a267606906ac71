//! Hosted Backend Client
//!
//! Talks to a Supabase project: GoTrue for auth (`/auth/v1`) and PostgREST
//! for the tables (`/rest/v1`). The session is kept in memory and mirrored to
//! a [`SessionStorage`] so it survives reloads.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, instrument, warn};

use super::events::{AuthBroadcast, AuthChange, AuthEvent, AuthEvents};
use super::query::{Collection, Filter, Query};
use super::storage::{SessionStorage, SESSION_STORAGE_KEY};
use super::traits::{Credentials, RemoteDataService};
use crate::config::RemoteConfig;
use crate::domain::Identity;
use crate::error::{AuthError, RemoteError, RemoteResult};

/// Refresh a stored session this many seconds before it expires
const EXPIRY_MARGIN_SECS: i64 = 30;

/// Unreserved characters stay as-is in query values
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Tokens and user of a signed-in session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Unix timestamp (seconds) at which the access token expires
    pub expires_at: Option<i64>,
    pub user: Identity,
}

impl Session {
    fn is_expired(&self, now: i64) -> bool {
        self.expires_at
            .is_some_and(|expires_at| expires_at <= now + EXPIRY_MARGIN_SECS)
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: Identity,
}

impl From<TokenResponse> for Session {
    fn from(token: TokenResponse) -> Self {
        let expires_at = token
            .expires_at
            .or_else(|| token.expires_in.map(|secs| Utc::now().timestamp() + secs));
        Self {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_at,
            user: token.user,
        }
    }
}

/// Client for a Supabase project
pub struct SupabaseRemote {
    http: reqwest::Client,
    config: RemoteConfig,
    session: RwLock<Option<Session>>,
    storage: Box<dyn SessionStorage>,
    auth: AuthBroadcast,
}

impl SupabaseRemote {
    /// Creates a client; a session saved in `storage` is picked up lazily
    pub fn new(config: RemoteConfig, storage: Box<dyn SessionStorage>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            session: RwLock::new(None),
            storage,
            auth: AuthBroadcast::default(),
        }
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    fn current_session(&self) -> Option<Session> {
        self.session
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn store_session(&self, session: Option<Session>) {
        match &session {
            Some(session) => match serde_json::to_string(session) {
                Ok(encoded) => self.storage.save(&encoded),
                Err(e) => warn!("failed to persist session: {}", e),
            },
            None => self.storage.clear(),
        }
        *self
            .session
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = session;
    }

    fn restore_session(&self) -> Option<Session> {
        let encoded = self.storage.load()?;
        match serde_json::from_str::<Session>(&encoded) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!(key = SESSION_STORAGE_KEY, "discarding unreadable stored session: {}", e);
                self.storage.clear();
                None
            }
        }
    }

    /// Bearer token for data requests: the user's access token, or the anon key.
    ///
    /// An access token about to expire is refreshed first. If that fails the
    /// session is over and subscribers are told the user signed out.
    async fn access_token(&self) -> RemoteResult<String> {
        let Some(session) = self.current_session() else {
            return Ok(self.config.anon_key.clone());
        };
        if !session.is_expired(Utc::now().timestamp()) {
            return Ok(session.access_token);
        }

        match self.refresh(&session.refresh_token).await {
            Ok(refreshed) => Ok(refreshed.access_token),
            Err(e) => {
                warn!("session expired and could not be refreshed: {}", e);
                self.store_session(None);
                self.auth.emit(AuthChange::signed_out());
                Err(RemoteError::NotAuthenticated)
            }
        }
    }

    fn request(&self, method: reqwest::Method, url: &str, bearer: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.config.anon_key)
            .header("Authorization", format!("Bearer {}", bearer))
            .header("Content-Type", "application/json")
    }

    #[instrument(skip(self, body))]
    async fn auth_post(&self, path: &str, body: &Value) -> RemoteResult<Value> {
        let url = self.config.auth_url(path);
        let response = self
            .request(reqwest::Method::POST, &url, &self.config.anon_key)
            .json(body)
            .send()
            .await?;
        read_json(response).await
    }

    async fn refresh(&self, refresh_token: &str) -> RemoteResult<Session> {
        debug!("refreshing session");
        let body = json!({ "refresh_token": refresh_token });
        let value = self.auth_post("token?grant_type=refresh_token", &body).await?;
        let session: Session = serde_json::from_value::<TokenResponse>(value)?.into();
        self.store_session(Some(session.clone()));
        self.auth.emit(AuthChange {
            event: AuthEvent::TokenRefreshed,
            identity: Some(session.user.clone()),
        });
        Ok(session)
    }

    async fn rest_request(
        &self,
        method: reqwest::Method,
        collection: Collection,
        params: &[(String, String)],
    ) -> RemoteResult<reqwest::RequestBuilder> {
        let bearer = self.access_token().await?;
        let url = rest_url(&self.config, collection, params);
        Ok(self.request(method, &url, &bearer))
    }
}

#[async_trait(?Send)]
impl RemoteDataService for SupabaseRemote {
    async fn get_session(&self) -> RemoteResult<Option<Identity>> {
        let Some(session) = self.current_session().or_else(|| self.restore_session()) else {
            return Ok(None);
        };

        if !session.is_expired(Utc::now().timestamp()) {
            let identity = session.user.clone();
            self.store_session(Some(session));
            return Ok(Some(identity));
        }

        match self.refresh(&session.refresh_token).await {
            Ok(refreshed) => Ok(Some(refreshed.user)),
            Err(e) => {
                warn!("stored session could not be refreshed: {}", e);
                self.store_session(None);
                Ok(None)
            }
        }
    }

    fn on_auth_change(&self) -> AuthEvents {
        self.auth.subscribe()
    }

    async fn sign_in_with_password(&self, credentials: &Credentials) -> Result<(), AuthError> {
        let body = serde_json::to_value(credentials).map_err(RemoteError::from)?;
        let value = self.auth_post("token?grant_type=password", &body).await?;
        let session: Session = serde_json::from_value::<TokenResponse>(value)
            .map_err(RemoteError::from)?
            .into();
        let identity = session.user.clone();
        self.store_session(Some(session));
        self.auth.emit(AuthChange::signed_in(identity));
        Ok(())
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<(), AuthError> {
        let body = serde_json::to_value(credentials).map_err(RemoteError::from)?;
        let value = self.auth_post("signup", &body).await?;

        // Without auto-confirm the service answers with the bare user and
        // sends a confirmation email instead of opening a session.
        if value.get("access_token").is_some() {
            let session: Session = serde_json::from_value::<TokenResponse>(value)
                .map_err(RemoteError::from)?
                .into();
            let identity = session.user.clone();
            self.store_session(Some(session));
            self.auth.emit(AuthChange::signed_in(identity));
        }
        Ok(())
    }

    async fn reset_password_for_email(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> Result<(), AuthError> {
        let path = match redirect_to {
            Some(target) => format!("recover?redirect_to={}", encode(target)),
            None => "recover".to_string(),
        };
        self.auth_post(&path, &json!({ "email": email })).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn sign_out(&self) -> RemoteResult<()> {
        let Some(session) = self.current_session() else {
            return Ok(());
        };

        let url = self.config.auth_url("logout");
        let result = self
            .request(reqwest::Method::POST, &url, &session.access_token)
            .send()
            .await;

        // The local session ends even if the service could not be reached.
        self.store_session(None);
        self.auth.emit(AuthChange::signed_out());

        let response = result?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body: Value = response.json().await.unwrap_or(Value::Null);
            return Err(RemoteError::Api {
                status,
                message: error_message(&body),
            });
        }
        Ok(())
    }

    #[instrument(skip(self, query), fields(table = %collection))]
    async fn select(&self, collection: Collection, query: &Query) -> RemoteResult<Vec<Value>> {
        let params = select_params(query);
        let response = self
            .rest_request(reqwest::Method::GET, collection, &params)
            .await?
            .send()
            .await?;
        let value = read_json(response).await?;
        match value {
            Value::Array(rows) => Ok(rows),
            other => Err(RemoteError::Api {
                status: 200,
                message: format!("expected a row array, got {}", other),
            }),
        }
    }

    #[instrument(skip(self, rows), fields(table = %collection, rows = rows.len()))]
    async fn insert(&self, collection: Collection, rows: Vec<Value>) -> RemoteResult<()> {
        let response = self
            .rest_request(reqwest::Method::POST, collection, &[])
            .await?
            .header("Prefer", "return=minimal")
            .json(&rows)
            .send()
            .await?;
        read_empty(response).await
    }

    #[instrument(skip(self, filter, patch), fields(table = %collection))]
    async fn update(&self, collection: Collection, filter: &Filter, patch: Value) -> RemoteResult<()> {
        let response = self
            .rest_request(reqwest::Method::PATCH, collection, &filter_params(filter))
            .await?
            .header("Prefer", "return=minimal")
            .json(&patch)
            .send()
            .await?;
        read_empty(response).await
    }

    #[instrument(skip(self, filter), fields(table = %collection))]
    async fn delete(&self, collection: Collection, filter: &Filter) -> RemoteResult<()> {
        let response = self
            .rest_request(reqwest::Method::DELETE, collection, &filter_params(filter))
            .await?
            .send()
            .await?;
        read_empty(response).await
    }
}

/// PostgREST filter parameters (`column=eq.value`)
fn filter_params(filter: &Filter) -> Vec<(String, String)> {
    filter
        .conditions()
        .iter()
        .map(|(column, value)| (column.clone(), format!("eq.{}", value)))
        .collect()
}

fn select_params(query: &Query) -> Vec<(String, String)> {
    let mut params = vec![("select".to_string(), "*".to_string())];
    params.extend(filter_params(&query.filter));
    if let Some(order) = &query.order {
        let direction = if order.ascending { "asc" } else { "desc" };
        params.push(("order".to_string(), format!("{}.{}", order.column, direction)));
    }
    params
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

fn rest_url(config: &RemoteConfig, collection: Collection, params: &[(String, String)]) -> String {
    let base = config.rest_url(collection.table());
    if params.is_empty() {
        return base;
    }
    let query: Vec<String> = params
        .iter()
        .map(|(key, value)| {
            // `*` and the `eq.` operator prefix are PostgREST syntax
            let value = if value == "*" { value.clone() } else { encode(value) };
            format!("{}={}", encode(key), value)
        })
        .collect();
    format!("{}?{}", base, query.join("&"))
}

/// Best human-readable message from a GoTrue / PostgREST error body
fn error_message(body: &Value) -> String {
    ["msg", "message", "error_description", "error"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
        .unwrap_or("Unknown error")
        .to_string()
}

async fn read_json(response: reqwest::Response) -> RemoteResult<Value> {
    let status = response.status();
    let text = response.text().await?;
    let body: Value = if text.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text)?
    };

    if !status.is_success() {
        return Err(RemoteError::Api {
            status: status.as_u16(),
            message: error_message(&body),
        });
    }
    Ok(body)
}

async fn read_empty(response: reqwest::Response) -> RemoteResult<()> {
    read_json(response).await.map(|_| ())
}
