//! Static reference data: known ingredients for autocomplete and quick-add, and
//! the option lists behind the search filters.
use schemars::JsonSchema;
use serde::Serialize;

use crate::model::{Category, Ingredient};
use crate::selection::SelectionSet;

pub const MAX_SUGGESTIONS: usize = 5;

const COMMON_INGREDIENTS: &[(&str, Category)] = &[
    ("Chicken Breast", Category::Proteins),
    ("Ground Beef", Category::Proteins),
    ("Salmon", Category::Proteins),
    ("Eggs", Category::Proteins),
    ("Tofu", Category::Proteins),
    ("Onion", Category::Vegetables),
    ("Garlic", Category::Vegetables),
    ("Tomato", Category::Vegetables),
    ("Potato", Category::Vegetables),
    ("Carrot", Category::Vegetables),
    ("Bell Pepper", Category::Vegetables),
    ("Broccoli", Category::Vegetables),
    ("Spinach", Category::Vegetables),
    ("Lettuce", Category::Vegetables),
    ("Cucumber", Category::Vegetables),
    ("Zucchini", Category::Vegetables),
    ("Mushroom", Category::Vegetables),
    ("Avocado", Category::Vegetables),
    ("Apple", Category::Fruits),
    ("Banana", Category::Fruits),
    ("Lemon", Category::Fruits),
    ("Lime", Category::Fruits),
    ("Orange", Category::Fruits),
    ("Berries", Category::Fruits),
    ("Milk", Category::Dairy),
    ("Cheese", Category::Dairy),
    ("Yogurt", Category::Dairy),
    ("Butter", Category::Dairy),
    ("Sour Cream", Category::Dairy),
    ("Rice", Category::Grains),
    ("Pasta", Category::Grains),
    ("Bread", Category::Grains),
    ("Quinoa", Category::Grains),
    ("Oats", Category::Grains),
    ("Flour", Category::Grains),
    ("Salt", Category::Spices),
    ("Black Pepper", Category::Spices),
    ("Olive Oil", Category::Spices),
    ("Vegetable Oil", Category::Spices),
    ("Paprika", Category::Spices),
    ("Cumin", Category::Spices),
    ("Chili Powder", Category::Spices),
    ("Oregano", Category::Spices),
    ("Basil", Category::Spices),
    ("Thyme", Category::Spices),
    ("Rosemary", Category::Spices),
    ("Soy Sauce", Category::Spices),
    ("Vinegar", Category::Spices),
    ("Sugar", Category::Spices),
    ("Honey", Category::Spices),
    ("Mustard", Category::Spices),
    ("Ketchup", Category::Spices),
];

pub(crate) const STARTER_INGREDIENTS: &[(&str, Category)] = &[
    ("Chicken Breast", Category::Proteins),
    ("Onion", Category::Vegetables),
    ("Garlic", Category::Vegetables),
    ("Olive Oil", Category::Spices),
];

pub const DIETS: &[&str] = &[
    "Vegetarian",
    "Vegan",
    "Gluten Free",
    "Dairy Free",
    "Ketogenic",
    "Pescetarian",
];

pub const CUISINES: &[&str] = &[
    "Italian",
    "Mexican",
    "Asian",
    "American",
    "Mediterranean",
    "Indian",
    "Japanese",
    "Chinese",
    "French",
    "Thai",
];

pub const MEAL_TYPES: &[&str] = &[
    "main course",
    "side dish",
    "dessert",
    "appetizer",
    "salad",
    "breakfast",
    "soup",
    "snack",
    "drink",
];

pub const COOK_TIMES: &[(&str, &str)] = &[("Under 30 min", "30"), ("Under 1 hour", "60")];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct FilterOption {
    /// Value to submit; lowercased like the dropdowns it replaces.
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct FilterOptions {
    pub diets: Vec<FilterOption>,
    pub cuisines: Vec<FilterOption>,
    pub meal_types: Vec<FilterOption>,
    pub cook_times: Vec<FilterOption>,
}

pub fn filter_options() -> FilterOptions {
    let labelled = |labels: &[&str]| -> Vec<FilterOption> {
        labels
            .iter()
            .map(|label| FilterOption {
                value: label.to_lowercase(),
                label: label.to_string(),
            })
            .collect()
    };
    FilterOptions {
        diets: labelled(DIETS),
        cuisines: labelled(CUISINES),
        meal_types: labelled(MEAL_TYPES),
        cook_times: COOK_TIMES
            .iter()
            .map(|(label, value)| FilterOption {
                value: value.to_lowercase(),
                label: label.to_string(),
            })
            .collect(),
    }
}

pub fn all() -> impl Iterator<Item = Ingredient> {
    COMMON_INGREDIENTS
        .iter()
        .map(|(name, category)| Ingredient::new(*name, *category))
}

pub fn by_category(category: Category) -> Vec<Ingredient> {
    all().filter(|i| i.category == category).collect()
}

/// Exact, case-insensitive lookup.
pub fn lookup(name: &str) -> Option<Ingredient> {
    all().find(|i| i.same_as(name.trim()))
}

/// Catalog entries containing `term` that are not already selected.
pub fn suggest(term: &str, selection: &SelectionSet) -> Vec<Ingredient> {
    if term.is_empty() {
        return Vec::new();
    }
    let needle = term.to_lowercase();
    all()
        .filter(|i| i.name.to_lowercase().contains(&needle) && !selection.contains(&i.name))
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// What submitting `term` adds: the first suggestion, otherwise a custom entry.
pub fn resolve(term: &str, selection: &SelectionSet) -> Option<Ingredient> {
    suggest(term, selection)
        .into_iter()
        .next()
        .or_else(|| Ingredient::custom(term))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestions_skip_selected_and_cap_at_five() {
        let mut selection = SelectionSet::default();
        selection.add(Ingredient::new("Olive Oil", Category::Spices));

        let names: Vec<String> = suggest("oil", &selection)
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["Vegetable Oil"]);

        assert_eq!(suggest("e", &SelectionSet::default()).len(), MAX_SUGGESTIONS);
        assert!(suggest("", &selection).is_empty());
    }

    #[test]
    fn resolve_prefers_catalog_then_custom() {
        let selection = SelectionSet::default();
        let hit = resolve("PAPRI", &selection).unwrap();
        assert_eq!(hit.name, "Paprika");
        assert_eq!(hit.category, Category::Spices);

        let custom = resolve(" saffron ", &selection).unwrap();
        assert_eq!(custom.name, "saffron");
        assert_eq!(custom.category, Category::Custom);

        assert!(resolve("   ", &selection).is_none());
    }

    #[test]
    fn quick_add_groups() {
        let fruits = by_category(Category::Fruits);
        assert_eq!(fruits.len(), 6);
        assert!(by_category(Category::Custom).is_empty());
        assert_eq!(all().count(), 52);
    }

    #[test]
    fn filter_option_values_are_lowercased() {
        let options = filter_options();
        assert_eq!(options.diets[2].value, "gluten free");
        assert_eq!(options.diets[2].label, "Gluten Free");
        assert_eq!(options.cook_times[1].value, "60");
    }
}
