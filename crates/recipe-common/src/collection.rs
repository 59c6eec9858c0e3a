use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::RecipeError;
use crate::model::Recipe;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Upstream relevance order.
    #[default]
    Match,
    /// Ready time, shortest first.
    Time,
    /// Aggregate likes, most first.
    Rating,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Match => "match",
            SortMode::Time => "time",
            SortMode::Rating => "rating",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = RecipeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "match" => Ok(SortMode::Match),
            "time" => Ok(SortMode::Time),
            "rating" => Ok(SortMode::Rating),
            other => Err(RecipeError::InvalidInput(format!(
                "unknown sort mode: {other} (expected match, time or rating)"
            ))),
        }
    }
}

/// The last fetched recipes plus the requested ordering.
#[derive(Debug, Clone, Default)]
pub struct RecipeCollection {
    recipes: Vec<Recipe>,
    sort_by: SortMode,
    has_searched: bool,
}

impl RecipeCollection {
    /// Replaces the whole result set with the outcome of a search.
    pub fn replace(&mut self, recipes: Vec<Recipe>) {
        self.recipes = recipes;
        self.has_searched = true;
    }

    /// Drops results, keeping the "a search happened" marker.
    pub fn clear(&mut self) {
        self.recipes.clear();
    }

    pub fn set_sort(&mut self, sort_by: SortMode) {
        self.sort_by = sort_by;
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort_by
    }

    pub fn has_searched(&self) -> bool {
        self.has_searched
    }

    pub fn mark_searched(&mut self) {
        self.has_searched = true;
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn get(&self, id: i64) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id() == id)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn sorted(&self) -> Vec<&Recipe> {
        sort_recipes(&self.recipes, self.sort_by)
    }
}

/// Stable projection of `recipes` in `mode` order. The input is untouched.
pub fn sort_recipes(recipes: &[Recipe], mode: SortMode) -> Vec<&Recipe> {
    let mut sorted: Vec<&Recipe> = recipes.iter().collect();
    match mode {
        SortMode::Match => {}
        SortMode::Time => sorted.sort_by_key(|r| r.detail.ready_in_minutes),
        SortMode::Rating => {
            sorted.sort_by(|a, b| b.detail.aggregate_likes.cmp(&a.detail.aggregate_likes))
        }
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::recipe;

    fn ids(recipes: &[&Recipe]) -> Vec<i64> {
        recipes.iter().map(|r| r.id()).collect()
    }

    #[test]
    fn time_sort_is_stable_for_ties() {
        let recipes = vec![recipe(1, 45, 0), recipe(2, 20, 0), recipe(3, 45, 0)];
        assert_eq!(ids(&sort_recipes(&recipes, SortMode::Time)), vec![2, 1, 3]);
    }

    #[test]
    fn rating_sort_is_descending_and_stable() {
        let recipes = vec![recipe(1, 10, 5), recipe(2, 10, 9), recipe(3, 10, 5)];
        assert_eq!(ids(&sort_recipes(&recipes, SortMode::Rating)), vec![2, 1, 3]);
    }

    #[test]
    fn match_sort_keeps_pipeline_order() {
        let recipes = vec![recipe(9, 50, 1), recipe(4, 5, 100)];
        assert_eq!(ids(&sort_recipes(&recipes, SortMode::Match)), vec![9, 4]);
    }

    #[test]
    fn resorting_is_idempotent_and_leaves_source_alone() {
        let mut collection = RecipeCollection::default();
        collection.replace(vec![recipe(1, 45, 3), recipe(2, 20, 8), recipe(3, 45, 1)]);
        for mode in [SortMode::Time, SortMode::Rating, SortMode::Match] {
            collection.set_sort(mode);
            let first = ids(&collection.sorted());
            let second = ids(&collection.sorted());
            assert_eq!(first, second);
        }
        let source: Vec<i64> = collection.recipes().iter().map(|r| r.id()).collect();
        assert_eq!(source, vec![1, 2, 3]);
    }

    #[test]
    fn parse_sort_mode() {
        assert_eq!("Time".parse::<SortMode>().unwrap(), SortMode::Time);
        assert!(matches!(
            "popularity".parse::<SortMode>(),
            Err(RecipeError::InvalidInput(_))
        ));
    }

    #[test]
    fn has_searched_survives_an_empty_result() {
        let mut collection = RecipeCollection::default();
        assert!(!collection.has_searched());
        collection.replace(vec![]);
        assert!(collection.has_searched());
        assert!(collection.is_empty());
    }
}
