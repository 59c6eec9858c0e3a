use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::Serialize;

use crate::model::ShoppingListItem;

pub const OTHER_AISLE: &str = "Other";

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct AisleGroup {
    pub aisle: String,
    pub items: Vec<ShoppingListItem>,
}

/// Missing ingredients collected across recipes, unique by ingredient id.
///
/// Lives independently of searches; only `remove` and `clear` drop entries.
#[derive(Debug, Clone, Default)]
pub struct ShoppingList {
    items: Vec<ShoppingListItem>,
}

impl ShoppingList {
    /// Appends every item whose id is not yet present. Returns how many were added.
    pub fn add_many<I>(&mut self, items: I) -> usize
    where
        I: IntoIterator<Item = ShoppingListItem>,
    {
        let mut added = 0;
        for item in items {
            if self.items.iter().any(|existing| existing.id == item.id) {
                continue;
            }
            self.items.push(item);
            added += 1;
        }
        added
    }

    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[ShoppingListItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items partitioned by aisle, aisles in lexicographic order. Items without an
    /// aisle land in [`OTHER_AISLE`].
    pub fn grouped_by_aisle(&self) -> Vec<AisleGroup> {
        let mut groups: BTreeMap<String, Vec<ShoppingListItem>> = BTreeMap::new();
        for item in &self.items {
            let aisle = item
                .aisle
                .as_deref()
                .filter(|a| !a.is_empty())
                .unwrap_or(OTHER_AISLE);
            groups.entry(aisle.to_string()).or_default().push(item.clone());
        }
        groups
            .into_iter()
            .map(|(aisle, items)| AisleGroup { aisle, items })
            .collect()
    }
}
