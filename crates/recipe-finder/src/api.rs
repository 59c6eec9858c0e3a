use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use recipe_common::collection::SortMode;
use recipe_common::filters::FilterCriteria;
use recipe_common::model::{Difficulty, Ingredient, InstructionStep, Recipe};
use recipe_common::pipeline::BackendMode;
use recipe_common::session::RecipeSession;
use recipe_common::shopping::{AisleGroup, ShoppingList};

// --- Tool parameters ---

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchCatalogParams {
    /// Fragment of an ingredient name, matched case-insensitively.
    pub term: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListCatalogCategoryParams {
    /// One of Vegetables, Proteins, Dairy, Grains, Spices, Fruits.
    pub category: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddIngredientParams {
    pub name: String,
    /// Category override. Defaults to the catalog category, or Custom.
    pub category: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RemoveIngredientParams {
    /// Exact ingredient name as listed by list_ingredients.
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct SetFiltersParams {
    pub diet: Option<String>,
    pub cuisine: Option<String>,
    pub meal_type: Option<String>,
    /// Maximum ready time in minutes, e.g. "30".
    pub max_ready_time: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct SortParams {
    /// "match" (default), "time" or "rating".
    pub sort_by: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RecipeIdParams {
    pub recipe_id: i64,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct IngredientIdParams {
    pub ingredient_id: i64,
}

// --- Tool results ---

#[derive(Debug, Serialize, JsonSchema)]
pub struct CatalogResponse {
    pub ingredients: Vec<Ingredient>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct SelectionResponse {
    /// Whether the call changed the selection.
    pub changed: bool,
    pub ingredients: Vec<Ingredient>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct FiltersResponse {
    pub filters: FilterCriteria,
}

/// Compact view of a recipe for result lists.
#[derive(Debug, Serialize, JsonSchema)]
pub struct RecipeCard {
    pub id: i64,
    pub title: String,
    pub image: Option<String>,
    pub ready_in_minutes: u32,
    pub aggregate_likes: u32,
    pub servings: u32,
    pub match_percentage: u32,
    pub can_make_now: bool,
    pub difficulty: Difficulty,
    pub missed_ingredient_count: u32,
    pub missing_ingredients: Vec<String>,
}

impl From<&Recipe> for RecipeCard {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id(),
            title: recipe.detail.title.clone(),
            image: recipe.detail.image.clone(),
            ready_in_minutes: recipe.detail.ready_in_minutes,
            aggregate_likes: recipe.detail.aggregate_likes,
            servings: recipe.detail.servings,
            match_percentage: recipe.match_percentage(),
            can_make_now: recipe.can_make_now(),
            difficulty: recipe.difficulty(),
            missed_ingredient_count: recipe.matched.missed_ingredient_count,
            missing_ingredients: recipe
                .missing_ingredient_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct RecipeListResponse {
    pub source: BackendMode,
    pub has_searched: bool,
    /// A search is running; its results are not in `recipes` yet.
    pub searching: bool,
    pub sort_by: SortMode,
    /// User-facing message from the last failed search.
    pub error: Option<String>,
    pub recipes: Vec<RecipeCard>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct ChecklistEntry {
    pub id: i64,
    pub original: String,
    pub checked: bool,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct RecipeDetailResponse {
    pub card: RecipeCard,
    pub summary_excerpt: String,
    pub share_text: String,
    pub ingredients: Vec<ChecklistEntry>,
    pub instructions: Vec<InstructionStep>,
    /// The full merged record, in Spoonacular's camelCase field names.
    pub recipe: Recipe,
}

impl From<&RecipeSession> for RecipeDetailResponse {
    fn from(session: &RecipeSession) -> Self {
        let recipe = session.recipe();
        Self {
            card: RecipeCard::from(recipe),
            summary_excerpt: recipe.summary_excerpt(),
            share_text: recipe.share_text(),
            ingredients: recipe
                .detail
                .extended_ingredients
                .iter()
                .map(|i| ChecklistEntry {
                    id: i.id,
                    original: i.original.clone(),
                    checked: session.is_checked(i.id),
                })
                .collect(),
            instructions: recipe.instruction_steps(),
            recipe: recipe.clone(),
        }
    }
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct ToggleResponse {
    pub ingredient_id: i64,
    pub checked: bool,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct ShoppingListResponse {
    /// Items inserted by this call, when it added anything.
    pub added: Option<usize>,
    pub total: usize,
    pub aisles: Vec<AisleGroup>,
}

impl ShoppingListResponse {
    pub fn new(list: &ShoppingList, added: Option<usize>) -> Self {
        Self {
            added,
            total: list.len(),
            aisles: list.grouped_by_aisle(),
        }
    }
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct OkResponse {
    pub ok: bool,
}
