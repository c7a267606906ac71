//! Item Entity
//!
//! A single purchase on the shopping list. The remote table uses its own
//! column names (`category_id`, `photo_url`, ...); [`ItemRow`] is the wire
//! shape and [`Item`] the shape the rest of the application works with.

use serde::{Deserialize, Deserializer, Serialize};

use super::entity::{Entity, RecordId};

/// A purchase item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier
    pub id: RecordId,
    /// Product name
    pub name: String,
    /// Estimated price, never negative
    pub price: f64,
    /// Category the item is listed under
    pub category_id: RecordId,
    /// Paid / picked up
    pub completed: bool,
    /// Owning identity
    pub owner_id: RecordId,
    /// Link to a photo of the product
    pub photo_url: Option<String>,
    /// Link to the product in a store
    pub product_url: Option<String>,
    /// Free-text notes (preferred brand, size, ...)
    pub notes: Option<String>,
}

impl Entity for Item {
    fn id(&self) -> &str {
        &self.id
    }

    fn owner_id(&self) -> &str {
        &self.owner_id
    }
}

/// Item as stored in the `items` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRow {
    pub id: RecordId,
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_price")]
    pub price: f64,
    pub category_id: RecordId,
    #[serde(default)]
    pub completed: bool,
    pub user_id: RecordId,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub product_url: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            price: row.price.max(0.0),
            category_id: row.category_id,
            completed: row.completed,
            owner_id: row.user_id,
            photo_url: non_blank(row.photo_url),
            product_url: non_blank(row.product_url),
            notes: non_blank(row.notes),
        }
    }
}

/// User-entered data for a new or edited item
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemDraft {
    pub name: String,
    pub price: f64,
    pub category_id: RecordId,
    pub photo_url: Option<String>,
    pub product_url: Option<String>,
    pub notes: Option<String>,
}

/// Insert payload for the `items` table
#[derive(Debug, Clone, Serialize)]
pub struct NewItemRow<'a> {
    pub name: &'a str,
    pub price: f64,
    pub category_id: &'a str,
    pub photo_url: Option<&'a str>,
    pub product_url: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub completed: bool,
    pub user_id: &'a str,
}

impl<'a> NewItemRow<'a> {
    pub fn new(draft: &'a ItemDraft, owner_id: &'a str) -> Self {
        Self {
            name: &draft.name,
            price: draft.price,
            category_id: &draft.category_id,
            photo_url: draft.photo_url.as_deref(),
            product_url: draft.product_url.as_deref(),
            notes: draft.notes.as_deref(),
            completed: false,
            user_id: owner_id,
        }
    }
}

/// Patch payload for editing an item's user-entered fields
#[derive(Debug, Clone, Serialize)]
pub struct ItemPatch<'a> {
    pub name: &'a str,
    pub price: f64,
    pub category_id: &'a str,
    pub photo_url: Option<&'a str>,
    pub product_url: Option<&'a str>,
    pub notes: Option<&'a str>,
}

impl<'a> From<&'a ItemDraft> for ItemPatch<'a> {
    fn from(draft: &'a ItemDraft) -> Self {
        Self {
            name: &draft.name,
            price: draft.price,
            category_id: &draft.category_id,
            photo_url: draft.photo_url.as_deref(),
            product_url: draft.product_url.as_deref(),
            notes: draft.notes.as_deref(),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Postgres `numeric` may arrive as a JSON number or as a string.
fn deserialize_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Price {
        Number(f64),
        Text(String),
        Null,
    }

    match Price::deserialize(deserializer)? {
        Price::Number(n) => Ok(n),
        Price::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
        Price::Null => Ok(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_translation() {
        let json = serde_json::json!({
            "id": "i1",
            "name": "Arroz 5kg",
            "price": 25.9,
            "category_id": "c1",
            "completed": true,
            "user_id": "u1",
            "photo_url": "",
            "product_url": "https://shop.example/arroz",
            "notes": null,
            "created_at": "2024-05-01T10:30:00Z",
        });
        let item: Item = serde_json::from_value::<ItemRow>(json).unwrap().into();
        assert_eq!(item.category_id, "c1");
        assert_eq!(item.owner_id, "u1");
        assert!(item.completed);
        assert_eq!(item.photo_url, None);
        assert_eq!(item.product_url.as_deref(), Some("https://shop.example/arroz"));
        assert_eq!(item.notes, None);
    }

    #[test]
    fn test_price_as_text() {
        let json = serde_json::json!({
            "id": "i1",
            "name": "Leite",
            "price": "4.50",
            "category_id": "c1",
            "user_id": "u1",
        });
        let row: ItemRow = serde_json::from_value(json).unwrap();
        assert_eq!(row.price, 4.5);
        assert!(!row.completed);
    }

    #[test]
    fn test_new_row_is_not_completed() {
        let draft = ItemDraft {
            name: "Pão".to_string(),
            price: 8.0,
            category_id: "c1".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(NewItemRow::new(&draft, "u1")).unwrap();
        assert_eq!(value["completed"], false);
        assert_eq!(value["user_id"], "u1");
        assert_eq!(value["category_id"], "c1");
    }
}
