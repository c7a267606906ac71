//! Smart Shopping List Core
//!
//! Layered architecture:
//! - domain: records mirrored from the backend and their wire shapes
//! - remote: the backend capability and its HTTP / in-memory implementations
//! - state: the application state container and its reducer
//! - store: session and domain operations over a remote service
//! - aggregate, forms, routes: pure helpers for the view layer

pub mod domain;
pub mod remote;
pub mod state;
pub mod store;
pub mod aggregate;
pub mod forms;
pub mod routes;
pub mod config;
pub mod error;

pub use config::RemoteConfig;
pub use error::{AuthError, ConfigError, RemoteError, RemoteResult};
pub use state::{Action, AppState, SharedState, StateHandle};
pub use store::{AccountDeletion, ShoppingStore};
