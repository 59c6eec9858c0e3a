//! Recipe aggregation: match query, bulk detail query, join by id.
use std::collections::HashMap;
use std::future::Future;

use schemars::JsonSchema;
use serde::Serialize;
use tracing::{info, warn};

use crate::demo;
use crate::error::RecipeError;
use crate::filters::FilterCriteria;
use crate::model::{Recipe, RecipeDetail, RecipeSummary};
use crate::spoonacular::{SpoonacularClient, SpoonacularError};

/// The two upstream lookups the pipeline is built from.
pub trait RecipeSource {
    fn match_query(
        &self,
        ingredients: &[String],
        filters: &FilterCriteria,
    ) -> impl Future<Output = Result<Vec<RecipeSummary>, SpoonacularError>> + Send;

    fn bulk_details(
        &self,
        ids: &[i64],
    ) -> impl Future<Output = Result<Vec<RecipeDetail>, SpoonacularError>> + Send;
}

/// Runs one search against `source`. Results keep the bulk response order.
///
/// Every call hits the upstream; nothing is cached between calls. Any failure
/// discards the partial result.
pub async fn find_recipes<S>(
    source: &S,
    ingredient_names: &[String],
    filters: &FilterCriteria,
) -> Result<Vec<Recipe>, RecipeError>
where
    S: RecipeSource + Sync,
{
    if ingredient_names.is_empty() {
        return Err(RecipeError::empty_selection());
    }

    let summaries = source.match_query(ingredient_names, filters).await?;
    if summaries.is_empty() {
        info!(ingredients = ingredient_names.len(), "match query returned no recipes");
        return Ok(Vec::new());
    }

    let ids: Vec<i64> = summaries.iter().map(|s| s.id).collect();
    let details = source.bulk_details(&ids).await?;

    let recipes = merge_recipes(&summaries, details);
    info!(
        matched = summaries.len(),
        returned = recipes.len(),
        "recipe search complete"
    );
    Ok(recipes)
}

/// Joins each detail with the summary of the same id, in detail order.
pub fn merge_recipes(summaries: &[RecipeSummary], details: Vec<RecipeDetail>) -> Vec<Recipe> {
    let mut by_id: HashMap<i64, &RecipeSummary> = HashMap::with_capacity(summaries.len());
    for summary in summaries {
        by_id.entry(summary.id).or_insert(summary);
    }

    details
        .into_iter()
        .map(|detail| {
            let summary = by_id.get(&detail.id).copied();
            if summary.is_none() {
                warn!(recipe_id = detail.id, "no match summary for detail record");
            }
            Recipe::merge(detail, summary)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    Live,
    Demo,
}

/// Where searches are answered from. `Demo` never touches the network.
#[derive(Clone)]
pub enum RecipeBackend {
    Live(SpoonacularClient),
    Demo,
}

impl RecipeBackend {
    pub fn mode(&self) -> BackendMode {
        match self {
            RecipeBackend::Live(_) => BackendMode::Live,
            RecipeBackend::Demo => BackendMode::Demo,
        }
    }

    pub async fn find_recipes(
        &self,
        ingredient_names: &[String],
        filters: &FilterCriteria,
    ) -> Result<Vec<Recipe>, RecipeError> {
        match self {
            RecipeBackend::Live(client) => find_recipes(client, ingredient_names, filters).await,
            RecipeBackend::Demo => {
                if ingredient_names.is_empty() {
                    return Err(RecipeError::empty_selection());
                }
                info!("serving demo recipes");
                Ok(demo::demo_recipes())
            }
        }
    }
}
