use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::RecipeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Category {
    Vegetables,
    Proteins,
    Dairy,
    Grains,
    Spices,
    Fruits,
    Custom,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Vegetables,
        Category::Proteins,
        Category::Dairy,
        Category::Grains,
        Category::Spices,
        Category::Fruits,
        Category::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Vegetables => "Vegetables",
            Category::Proteins => "Proteins",
            Category::Dairy => "Dairy",
            Category::Grains => "Grains",
            Category::Spices => "Spices",
            Category::Fruits => "Fruits",
            Category::Custom => "Custom",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = RecipeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| RecipeError::InvalidInput(format!("unknown category: {wanted}")))
    }
}

/// An ingredient the user has on hand. Identity is the lowercased name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Ingredient {
    pub name: String,
    pub category: Category,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }

    /// Free-text entry. Returns `None` when the trimmed text is empty.
    pub fn custom(text: &str) -> Option<Self> {
        let name = text.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self::new(name, Category::Custom))
    }

    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    pub fn same_as(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// Upstream sends explicit `null` for some absent fields; treat it like a
/// missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One concrete ingredient occurrence as reported by Spoonacular.
///
/// `id` is not unique across recipes: the same product can carry different ids
/// in different responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngredientDetail {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unit: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unit_long: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unit_short: String,
    #[serde(default)]
    pub aisle: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub original: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub original_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub meta: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
}

pub type ShoppingListItem = IngredientDetail;

/// A record from the match query (`findByIngredients`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub image_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub used_ingredient_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub missed_ingredient_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub missed_ingredients: Vec<IngredientDetail>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub used_ingredients: Vec<IngredientDetail>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub likes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct InstructionStep {
    pub number: u32,
    pub step: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnalyzedInstruction {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub steps: Vec<InstructionStep>,
}

/// A record from the bulk detail query (`informationBulk`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetail {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub image_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub servings: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ready_in_minutes: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub spoonacular_score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub aggregate_likes: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub health_score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cuisines: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dish_types: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub diets: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub analyzed_instructions: Vec<AnalyzedInstruction>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub extended_ingredients: Vec<IngredientDetail>,
}

/// The match-derived half of a [`Recipe`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct IngredientMatch {
    pub used_ingredient_count: u32,
    pub missed_ingredient_count: u32,
    pub used_ingredients: Vec<IngredientDetail>,
    pub missed_ingredients: Vec<IngredientDetail>,
}

impl From<&RecipeSummary> for IngredientMatch {
    fn from(summary: &RecipeSummary) -> Self {
        Self {
            used_ingredient_count: summary.used_ingredient_count,
            missed_ingredient_count: summary.missed_ingredient_count,
            used_ingredients: summary.used_ingredients.clone(),
            missed_ingredients: summary.missed_ingredients.clone(),
        }
    }
}

/// Detail fields joined with match fields for the same recipe id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Recipe {
    #[serde(flatten)]
    pub detail: RecipeDetail,
    #[serde(flatten)]
    pub matched: IngredientMatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Recipe {
    /// Joins a detail record with its match summary. A detail with no summary
    /// gets zero counts and empty lists.
    pub fn merge(detail: RecipeDetail, summary: Option<&RecipeSummary>) -> Self {
        let matched = match summary {
            Some(summary) => IngredientMatch::from(summary),
            None => IngredientMatch::default(),
        };
        Self { detail, matched }
    }

    pub fn id(&self) -> i64 {
        self.detail.id
    }

    /// Share of matched ingredients the user already has, 0..=100.
    ///
    /// Computed from the match counts only; the full ingredient list can
    /// enumerate ingredients differently.
    pub fn match_percentage(&self) -> u32 {
        let used = self.matched.used_ingredient_count as f64;
        let total = used + self.matched.missed_ingredient_count as f64;
        if total == 0.0 {
            return 0;
        }
        (used / total * 100.0).round() as u32
    }

    pub fn can_make_now(&self) -> bool {
        self.matched.missed_ingredient_count == 0
    }

    /// Full ingredient list length, falling back to used + missed when the full
    /// list is empty. The two sources may disagree for the same recipe.
    pub fn ingredient_count(&self) -> usize {
        match self.detail.extended_ingredients.len() {
            0 => (self.matched.used_ingredient_count + self.matched.missed_ingredient_count)
                as usize,
            n => n,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        let minutes = self.detail.ready_in_minutes;
        let count = self.ingredient_count();
        if minutes < 30 && count < 10 {
            Difficulty::Easy
        } else if minutes < 60 && count < 15 {
            Difficulty::Medium
        } else {
            Difficulty::Hard
        }
    }
}
