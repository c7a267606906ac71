//! Message Entity
//!
//! Append-only chat log entry. Messages are scoped to their owner, so the
//! "list chat" is a per-identity log.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{Entity, RecordId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: RecordId,
    pub text: String,
    #[serde(rename = "user_name")]
    pub author_name: String,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "user_id")]
    pub owner_id: RecordId,
}

impl Message {
    /// Local wall-clock time as `HH:MM`
    pub fn time_label(&self) -> String {
        self.created_at.with_timezone(&Local).format("%H:%M").to_string()
    }
}

/// Insert payload for a new message
#[derive(Debug, Clone, Serialize)]
pub struct NewMessageRow<'a> {
    pub text: &'a str,
    pub user_name: &'a str,
    pub user_id: &'a str,
}

impl Entity for Message {
    fn id(&self) -> &str {
        &self.id
    }

    fn owner_id(&self) -> &str {
        &self.owner_id
    }
}
