//! Aggregation
//!
//! Per-category grouping and price totals, derived from the hydrated
//! collections on every render.

use std::collections::HashMap;

use crate::domain::{Category, Item, RecordId};

/// Items grouped by category id
pub type ItemGroups = HashMap<RecordId, Vec<Item>>;

/// Price sums of one category
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CategoryTotals {
    /// Sum of all item prices
    pub total: f64,
    /// Sum of prices of items not yet completed
    pub pending: f64,
    /// `total - pending`
    pub paid: f64,
}

impl CategoryTotals {
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a Item>) -> Self {
        let (total, pending) = items.into_iter().fold((0.0, 0.0), |(total, pending), item| {
            let pending = if item.completed { pending } else { pending + item.price };
            (total + item.price, pending)
        });
        Self {
            total,
            pending,
            paid: total - pending,
        }
    }
}

/// Group items by category, keeping their order within each group
pub fn items_by_category(items: &[Item]) -> ItemGroups {
    let mut groups: ItemGroups = HashMap::new();
    for item in items {
        groups
            .entry(item.category_id.clone())
            .or_default()
            .push(item.clone());
    }
    groups
}

/// Totals for every category; categories without items get zeros
pub fn category_totals(categories: &[Category], groups: &ItemGroups) -> HashMap<RecordId, CategoryTotals> {
    categories
        .iter()
        .map(|category| {
            let totals = groups
                .get(&category.id)
                .map(|items| CategoryTotals::from_items(items))
                .unwrap_or_default();
            (category.id.clone(), totals)
        })
        .collect()
}

/// Display form of a price: `R$ 12.34`
pub fn format_price(value: f64) -> String {
    format!("R$ {:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, category_id: &str, price: f64, completed: bool) -> Item {
        Item {
            id: id.to_string(),
            name: format!("Item {}", id),
            price,
            category_id: category_id.to_string(),
            completed,
            owner_id: "a".to_string(),
            photo_url: None,
            product_url: None,
            notes: None,
        }
    }

    fn category(id: &str, name: &str) -> Category {
        Category {
            id: id.to_string(),
            name: name.to_string(),
            owner_id: "a".to_string(),
        }
    }

    #[test]
    fn test_market_scenario() {
        let categories = vec![category("market", "Market")];
        let items = vec![
            item("i1", "market", 10.0, false),
            item("i2", "market", 5.0, true),
        ];
        let totals = category_totals(&categories, &items_by_category(&items));
        assert_eq!(
            totals["market"],
            CategoryTotals {
                total: 15.0,
                pending: 10.0,
                paid: 5.0
            }
        );
    }

    #[test]
    fn test_empty_category_is_zero() {
        let categories = vec![category("c1", "Vazia")];
        let totals = category_totals(&categories, &ItemGroups::new());
        assert_eq!(totals["c1"], CategoryTotals::default());
    }

    #[test]
    fn test_pending_plus_paid_is_total() {
        let items: Vec<Item> = (0..20)
            .map(|i| item(&i.to_string(), "c1", i as f64 * 1.37, i % 3 == 0))
            .collect();
        let totals = CategoryTotals::from_items(&items);
        assert!((totals.pending + totals.paid - totals.total).abs() < 1e-9);
    }

    #[test]
    fn test_grouping_partitions_items() {
        let items = vec![
            item("i1", "a", 1.0, false),
            item("i2", "b", 1.0, false),
            item("i3", "a", 1.0, true),
            item("i4", "orphan", 1.0, false),
        ];
        let groups = items_by_category(&items);

        assert_eq!(groups.values().map(Vec::len).sum::<usize>(), items.len());
        let ids: Vec<_> = groups["a"].iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["i1", "i3"]);
        assert!(groups.iter().all(|(key, group)| group.iter().all(|i| &i.category_id == key)));
    }

    #[test]
    fn test_toggle_moves_price_between_pending_and_paid() {
        let mut items = vec![item("i1", "c1", 7.5, false), item("i2", "c1", 2.5, false)];
        let before = CategoryTotals::from_items(&items);

        items[0].completed = true;
        let toggled = CategoryTotals::from_items(&items);
        assert_eq!(toggled.paid, 7.5);
        assert_eq!(toggled.pending, 2.5);

        items[0].completed = false;
        assert_eq!(CategoryTotals::from_items(&items), before);
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(15.0), "R$ 15.00");
        assert_eq!(format_price(0.126), "R$ 0.13");
    }
}
