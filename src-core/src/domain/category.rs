//! Category Entity
//!
//! A named bucket of items on the shopping list.

use serde::{Deserialize, Serialize};

use super::entity::{Entity, RecordId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: RecordId,
    pub name: String,
    #[serde(rename = "user_id")]
    pub owner_id: RecordId,
}

/// Insert payload for a new category
#[derive(Debug, Clone, Serialize)]
pub struct NewCategoryRow<'a> {
    pub name: &'a str,
    pub user_id: &'a str,
}

impl Entity for Category {
    fn id(&self) -> &str {
        &self.id
    }

    fn owner_id(&self) -> &str {
        &self.owner_id
    }
}
