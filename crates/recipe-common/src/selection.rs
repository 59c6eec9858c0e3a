use serde::{Deserialize, Serialize};

use crate::catalog::STARTER_INGREDIENTS;
use crate::model::Ingredient;

/// The user's working ingredient list. Insertion ordered; names are unique
/// under case-insensitive comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSet {
    items: Vec<Ingredient>,
}

impl SelectionSet {
    /// The selection a fresh session starts with.
    pub fn starter() -> Self {
        let mut set = Self::default();
        for (name, category) in STARTER_INGREDIENTS {
            set.add(Ingredient::new(*name, *category));
        }
        set
    }

    /// Returns `false` when an ingredient with the same name is already present.
    pub fn add(&mut self, ingredient: Ingredient) -> bool {
        if self.contains(&ingredient.name) {
            return false;
        }
        self.items.push(ingredient);
        true
    }

    /// Removes by exact name.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.name != name);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn contains(&self, name: &str) -> bool {
        let key = name.to_lowercase();
        self.items.iter().any(|i| i.key() == key)
    }

    pub fn items(&self) -> &[Ingredient] {
        &self.items
    }

    pub fn names(&self) -> Vec<String> {
        self.items.iter().map(|i| i.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    #[test]
    fn case_variant_does_not_grow_the_set() {
        let mut set = SelectionSet::default();
        for name in ["Garlic", "garlic", "GARLIC", "gArLiC"] {
            set.add(Ingredient::new(name, Category::Vegetables));
            assert_eq!(set.len(), 1);
        }
        assert_eq!(set.names(), vec!["Garlic"]);
    }

    #[test]
    fn remove_is_exact_and_tolerates_absent_names() {
        let mut set = SelectionSet::default();
        set.add(Ingredient::new("Tofu", Category::Proteins));
        assert!(!set.remove("tofu"));
        assert!(!set.remove("Tempeh"));
        assert!(set.remove("Tofu"));
        assert!(set.is_empty());
    }

    #[test]
    fn keeps_insertion_order() {
        let mut set = SelectionSet::default();
        set.add(Ingredient::new("Rice", Category::Grains));
        set.add(Ingredient::new("Egg", Category::Proteins));
        set.add(Ingredient::new("Soy Sauce", Category::Spices));
        assert_eq!(set.names(), vec!["Rice", "Egg", "Soy Sauce"]);
        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn starter_selection() {
        let set = SelectionSet::starter();
        assert_eq!(
            set.names(),
            vec!["Chicken Breast", "Onion", "Garlic", "Olive Oil"]
        );
    }
}
