//! Collection addressing
//!
//! Equality filters and ordering, the only query shapes the application
//! issues against the remote tables.

use std::cmp::Ordering;

use serde_json::Value;

pub const ID_COLUMN: &str = "id";
pub const OWNER_COLUMN: &str = "user_id";
pub const CREATED_AT_COLUMN: &str = "created_at";

/// Remote record collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Categories,
    Items,
    Messages,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Collection::Categories, Collection::Items, Collection::Messages];

    pub fn table(&self) -> &'static str {
        match self {
            Collection::Categories => "categories",
            Collection::Items => "items",
            Collection::Messages => "messages",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table())
    }
}

/// Conjunction of `column = value` conditions
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Filter {
    conditions: Vec<(String, String)>,
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::default().and_eq(column, value)
    }

    pub fn and_eq(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.conditions.push((column.into(), value.into()));
        self
    }

    /// Rows owned by `owner_id`
    pub fn owned_by(owner_id: &str) -> Self {
        Self::eq(OWNER_COLUMN, owner_id)
    }

    /// The row with primary key `id`
    pub fn by_id(id: &str) -> Self {
        Self::eq(ID_COLUMN, id)
    }

    pub fn conditions(&self) -> &[(String, String)] {
        &self.conditions
    }

    /// Whether a JSON row satisfies every condition
    pub fn matches(&self, row: &Value) -> bool {
        self.conditions.iter().all(|(column, expected)| {
            row.get(column)
                .and_then(value_text)
                .is_some_and(|actual| &actual == expected)
        })
    }
}

/// Sort order on a single column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

impl Order {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: true,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: false,
        }
    }

    /// Compare two JSON rows on this order's column
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        let ordering = compare_values(a.get(&self.column), b.get(&self.column));
        if self.ascending {
            ordering
        } else {
            ordering.reverse()
        }
    }
}

/// A filtered, optionally ordered read
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    pub filter: Filter,
    pub order: Option<Order>,
}

impl Query {
    pub fn new(filter: Filter) -> Self {
        Self { filter, order: None }
    }

    /// Rows of `owner_id` in creation order
    pub fn owned_by(owner_id: &str) -> Self {
        Self::new(Filter::owned_by(owner_id)).order_by(Order::asc(CREATED_AT_COLUMN))
    }

    pub fn order_by(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }
}

/// Text form of a scalar JSON value, as used in equality filters
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Null => Some("null".to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or_default();
            let y = y.as_f64().unwrap_or_default();
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        // Nulls and missing values sort last
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Greater,
        (_, None | Some(Value::Null)) => Ordering::Less,
        _ => Ordering::Equal,
    }
}
