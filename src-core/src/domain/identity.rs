//! Identity
//!
//! The authenticated user as reported by the remote auth service.

use serde::{Deserialize, Serialize};

use super::entity::RecordId;

/// Author name used when the identity has no email
pub const FALLBACK_DISPLAY_NAME: &str = "Usuário";

/// Signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: RecordId,
    #[serde(default)]
    pub email: Option<String>,
}

impl Identity {
    pub fn new(id: impl Into<RecordId>, email: Option<String>) -> Self {
        Self {
            id: id.into(),
            email,
        }
    }

    /// Chat author name: the local part of the email address.
    ///
    /// An address with nothing before the `@` yields an empty name.
    pub fn display_name(&self) -> String {
        match self.email.as_deref().filter(|email| !email.is_empty()) {
            Some(email) => email.split('@').next().unwrap_or_default().to_string(),
            None => FALLBACK_DISPLAY_NAME.to_string(),
        }
    }
}
