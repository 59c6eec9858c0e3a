//! Per-server session state: selection, filters, results, open recipe and
//! shopping list. Every tool call operates on this one value.
use recipe_common::collection::RecipeCollection;
use recipe_common::error::RecipeError;
use recipe_common::filters::FilterCriteria;
use recipe_common::model::Recipe;
use recipe_common::selection::SelectionSet;
use recipe_common::session::DetailView;
use recipe_common::shopping::ShoppingList;
use tracing::{debug, info, warn};

pub const SEARCH_IN_PROGRESS: &str = "A search is already in progress. Please wait for it to finish.";

/// Inputs captured when a search starts, so the network call can run without
/// holding the state lock.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub ticket: u64,
    pub ingredient_names: Vec<String>,
    pub filters: FilterCriteria,
}

#[derive(Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Applied { count: usize },
    Failed { message: String },
    /// A newer search started; the result was dropped.
    Stale,
}

#[derive(Debug)]
pub struct FinderState {
    pub selection: SelectionSet,
    pub filters: FilterCriteria,
    pub collection: RecipeCollection,
    pub shopping: ShoppingList,
    pub detail: DetailView,
    pub last_error: Option<String>,
    ticket: u64,
    pending: Option<u64>,
}

impl Default for FinderState {
    fn default() -> Self {
        Self {
            selection: SelectionSet::starter(),
            filters: FilterCriteria::default(),
            collection: RecipeCollection::default(),
            shopping: ShoppingList::default(),
            detail: DetailView::default(),
            last_error: None,
            ticket: 0,
            pending: None,
        }
    }
}

impl FinderState {
    /// Validates and snapshots the search inputs. Clears the previous results.
    pub fn begin_search(&mut self) -> Result<SearchRequest, RecipeError> {
        if self.selection.is_empty() {
            self.last_error = Some(RecipeError::empty_selection().user_message());
            return Err(RecipeError::empty_selection());
        }
        if self.pending.is_some() {
            return Err(RecipeError::InvalidInput(SEARCH_IN_PROGRESS.to_string()));
        }

        self.ticket += 1;
        self.pending = Some(self.ticket);
        self.last_error = None;
        self.collection.clear();
        self.collection.mark_searched();
        debug!(ticket = self.ticket, "search started");

        Ok(SearchRequest {
            ticket: self.ticket,
            ingredient_names: self.selection.names(),
            filters: self.filters.clone(),
        })
    }

    pub fn finish_search(
        &mut self,
        ticket: u64,
        result: Result<Vec<Recipe>, RecipeError>,
    ) -> SearchOutcome {
        if ticket != self.ticket {
            info!(ticket, latest = self.ticket, "dropping stale search result");
            return SearchOutcome::Stale;
        }
        self.pending = None;

        match result {
            Ok(recipes) => {
                let count = recipes.len();
                self.collection.replace(recipes);
                SearchOutcome::Applied { count }
            }
            Err(err) => {
                warn!(error = %err, "recipe search failed");
                let message = err.user_message();
                self.collection.clear();
                self.last_error = Some(message.clone());
                SearchOutcome::Failed { message }
            }
        }
    }

    /// Releases the pending marker of a search whose caller went away.
    pub fn abandon_search(&mut self, ticket: u64) {
        if self.pending == Some(ticket) {
            info!(ticket, "search abandoned");
            self.pending = None;
        }
    }

    pub fn is_searching(&self) -> bool {
        self.pending.is_some()
    }

    /// Opens a recipe from the current results.
    pub fn open_recipe(&mut self, recipe_id: i64) -> Result<(), RecipeError> {
        let recipe = self
            .collection
            .get(recipe_id)
            .cloned()
            .ok_or_else(|| RecipeError::InvalidInput(format!("unknown recipe id: {recipe_id}")))?;
        self.detail.open(recipe);
        Ok(())
    }

    /// Adds the open recipe's missing ingredients to the shopping list.
    pub fn add_missing_to_shopping_list(&mut self) -> Result<usize, RecipeError> {
        let session = self
            .detail
            .current()
            .ok_or_else(|| RecipeError::InvalidInput("no recipe is open".to_string()))?;
        let missing = session.recipe().matched.missed_ingredients.clone();
        Ok(self.shopping.add_many(missing))
    }
}
