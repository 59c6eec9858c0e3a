//! MCP server for ingredient-driven recipe discovery.
//!
//! Tools cover the whole flow: build an ingredient selection, set filters, run
//! a search, sort and open results, and collect missing ingredients into a
//! shopping list grouped by aisle.
use std::sync::Arc;

use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use tokio::sync::Mutex;
use tracing::info;

use recipe_common::catalog::{self, FilterOptions};
use recipe_common::collection::SortMode;
use recipe_common::filters::FilterCriteria;
use recipe_common::model::{Category, Ingredient};
use recipe_common::pipeline::RecipeBackend;

use crate::api::{
    AddIngredientParams, CatalogResponse, FiltersResponse, IngredientIdParams,
    ListCatalogCategoryParams, OkResponse, RecipeCard, RecipeDetailResponse, RecipeIdParams,
    RecipeListResponse, RemoveIngredientParams, SearchCatalogParams, SelectionResponse,
    SetFiltersParams, ShoppingListResponse, SortParams, ToggleResponse,
};
use crate::state::{FinderState, SearchOutcome};

#[derive(Clone)]
pub struct RecipeFinderServer {
    backend: Arc<RecipeBackend>,
    state: Arc<Mutex<FinderState>>,
    tool_router: ToolRouter<RecipeFinderServer>,
}

impl RecipeFinderServer {
    /// A server with its own fresh session state.
    pub fn new(backend: Arc<RecipeBackend>) -> Self {
        Self {
            backend,
            state: Arc::new(Mutex::new(FinderState::default())),
            tool_router: Self::tool_router(),
        }
    }

    fn list_response(&self, state: &FinderState) -> RecipeListResponse {
        RecipeListResponse {
            source: self.backend.mode(),
            has_searched: state.collection.has_searched(),
            searching: state.is_searching(),
            sort_by: state.collection.sort_mode(),
            error: state.last_error.clone(),
            recipes: state
                .collection
                .sorted()
                .into_iter()
                .map(RecipeCard::from)
                .collect(),
        }
    }

    fn detail_response(state: &FinderState) -> Result<RecipeDetailResponse, String> {
        state
            .detail
            .current()
            .map(RecipeDetailResponse::from)
            .ok_or_else(|| "no recipe is open".to_string())
    }
}

/// Clears the pending-search marker if the tool call is dropped mid-flight.
struct PendingSearch {
    state: Arc<Mutex<FinderState>>,
    ticket: u64,
    armed: bool,
}

impl PendingSearch {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for PendingSearch {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let state = Arc::clone(&self.state);
        let ticket = self.ticket;
        tokio::spawn(async move {
            state.lock().await.abandon_search(ticket);
        });
    }
}

fn parse_sort(raw: Option<&str>) -> Result<Option<SortMode>, String> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => s.parse::<SortMode>().map(Some).map_err(|e| e.user_message()),
        None => Ok(None),
    }
}

fn selection_response(state: &FinderState, changed: bool) -> SelectionResponse {
    SelectionResponse {
        changed,
        ingredients: state.selection.items().to_vec(),
    }
}

#[tool_router]
impl RecipeFinderServer {
    #[tool(description = "Autocomplete: up to 5 known ingredients whose name contains the term and that are not already selected.")]
    async fn search_catalog(
        &self,
        Parameters(params): Parameters<SearchCatalogParams>,
    ) -> Result<Json<CatalogResponse>, String> {
        let term = params.term.trim().to_string();
        if term.is_empty() {
            return Err("term must not be empty".to_string());
        }
        let state = self.state.lock().await;
        Ok(Json(CatalogResponse {
            ingredients: catalog::suggest(&term, &state.selection),
        }))
    }

    #[tool(description = "List the known ingredients of one category for quick-add.")]
    async fn list_catalog_category(
        &self,
        Parameters(params): Parameters<ListCatalogCategoryParams>,
    ) -> Result<Json<CatalogResponse>, String> {
        let category = params
            .category
            .parse::<Category>()
            .map_err(|e| e.user_message())?;
        Ok(Json(CatalogResponse {
            ingredients: catalog::by_category(category),
        }))
    }

    #[tool(description = "List the allowed values for the diet, cuisine, meal type and cook time filters. Leaving a filter unset means Any.")]
    async fn list_filter_options(&self) -> Result<Json<FilterOptions>, String> {
        Ok(Json(catalog::filter_options()))
    }

    #[tool(description = "Add an ingredient to the selection. Without a category, a partial name resolves to the first matching catalog ingredient that is not selected yet; unknown names are added as Custom. Case-insensitive duplicates are ignored.")]
    async fn add_ingredient(
        &self,
        Parameters(params): Parameters<AddIngredientParams>,
    ) -> Result<Json<SelectionResponse>, String> {
        let name = params.name.trim().to_string();
        if name.is_empty() {
            return Err("name must not be empty".to_string());
        }
        let category = params
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty());
        let ingredient = match category {
            Some(raw) => {
                let category = raw.parse::<Category>().map_err(|e| e.user_message())?;
                Some(Ingredient::new(name.clone(), category))
            }
            None => None,
        };

        let mut state = self.state.lock().await;
        let ingredient = match ingredient {
            Some(ingredient) => ingredient,
            // exact catalog names win so an already selected entry stays a no-op
            None => catalog::lookup(&name)
                .or_else(|| catalog::resolve(&name, &state.selection))
                .ok_or_else(|| "name must not be empty".to_string())?,
        };
        let changed = state.selection.add(ingredient);
        Ok(Json(selection_response(&state, changed)))
    }

    #[tool(description = "Remove an ingredient from the selection by its exact name.")]
    async fn remove_ingredient(
        &self,
        Parameters(params): Parameters<RemoveIngredientParams>,
    ) -> Result<Json<SelectionResponse>, String> {
        let mut state = self.state.lock().await;
        let changed = state.selection.remove(&params.name);
        Ok(Json(selection_response(&state, changed)))
    }

    #[tool(description = "Remove every ingredient from the selection.")]
    async fn clear_ingredients(&self) -> Result<Json<SelectionResponse>, String> {
        let mut state = self.state.lock().await;
        let changed = !state.selection.is_empty();
        state.selection.clear();
        Ok(Json(selection_response(&state, changed)))
    }

    #[tool(description = "List the currently selected ingredients in the order they were added.")]
    async fn list_ingredients(&self) -> Result<Json<SelectionResponse>, String> {
        let state = self.state.lock().await;
        Ok(Json(selection_response(&state, false)))
    }

    #[tool(description = "Replace the search filters. Omitted or blank fields mean Any.")]
    async fn set_filters(
        &self,
        Parameters(params): Parameters<SetFiltersParams>,
    ) -> Result<Json<FiltersResponse>, String> {
        let filters = FilterCriteria::from_raw(
            params.diet.as_deref(),
            params.cuisine.as_deref(),
            params.meal_type.as_deref(),
            params.max_ready_time.as_deref(),
        );
        let mut state = self.state.lock().await;
        state.filters = filters.clone();
        Ok(Json(FiltersResponse { filters }))
    }

    #[tool(description = "Search recipes using the selected ingredients and filters. Replaces previous results. Optionally sets the sort order (match, time, rating).")]
    async fn find_recipes(
        &self,
        Parameters(params): Parameters<SortParams>,
    ) -> Result<Json<RecipeListResponse>, String> {
        let sort = parse_sort(params.sort_by.as_deref())?;
        let request = {
            let mut state = self.state.lock().await;
            let request = state.begin_search().map_err(|e| e.user_message())?;
            if let Some(sort) = sort {
                state.collection.set_sort(sort);
            }
            request
        };
        let pending = PendingSearch {
            state: Arc::clone(&self.state),
            ticket: request.ticket,
            armed: true,
        };

        info!(
            ticket = request.ticket,
            ingredients = request.ingredient_names.len(),
            filtered = !request.filters.is_empty(),
            "running recipe search"
        );
        let result = self
            .backend
            .find_recipes(&request.ingredient_names, &request.filters)
            .await;

        let mut state = self.state.lock().await;
        let outcome = state.finish_search(request.ticket, result);
        pending.disarm();
        match outcome {
            SearchOutcome::Applied { .. } => Ok(Json(self.list_response(&state))),
            SearchOutcome::Failed { message } => Err(message),
            SearchOutcome::Stale => Err("search was superseded by a newer one".to_string()),
        }
    }

    #[tool(description = "List the current results in the requested order (match, time or rating). Never triggers a new search.")]
    async fn list_recipes(
        &self,
        Parameters(params): Parameters<SortParams>,
    ) -> Result<Json<RecipeListResponse>, String> {
        let sort = parse_sort(params.sort_by.as_deref())?;
        let mut state = self.state.lock().await;
        if let Some(sort) = sort {
            state.collection.set_sort(sort);
        }
        Ok(Json(self.list_response(&state)))
    }

    #[tool(description = "Open a recipe from the current results: full ingredients with checked state, instructions, summary excerpt and share text. Resets checked ingredients.")]
    async fn open_recipe(
        &self,
        Parameters(params): Parameters<RecipeIdParams>,
    ) -> Result<Json<RecipeDetailResponse>, String> {
        let mut state = self.state.lock().await;
        state
            .open_recipe(params.recipe_id)
            .map_err(|e| e.user_message())?;
        Ok(Json(Self::detail_response(&state)?))
    }

    #[tool(description = "Check or uncheck an ingredient of the open recipe.")]
    async fn toggle_ingredient_checked(
        &self,
        Parameters(params): Parameters<IngredientIdParams>,
    ) -> Result<Json<ToggleResponse>, String> {
        let mut state = self.state.lock().await;
        let checked = state
            .detail
            .toggle_checked(params.ingredient_id)
            .ok_or_else(|| "no recipe is open".to_string())?;
        Ok(Json(ToggleResponse {
            ingredient_id: params.ingredient_id,
            checked,
        }))
    }

    #[tool(description = "Close the open recipe and discard its checked ingredients.")]
    async fn close_recipe(&self) -> Result<Json<OkResponse>, String> {
        let mut state = self.state.lock().await;
        let was_open = state.detail.close().is_some();
        Ok(Json(OkResponse { ok: was_open }))
    }

    #[tool(description = "Add the open recipe's missing ingredients to the shopping list, skipping ingredient ids already on it.")]
    async fn add_missing_to_shopping_list(&self) -> Result<Json<ShoppingListResponse>, String> {
        let mut state = self.state.lock().await;
        let added = state
            .add_missing_to_shopping_list()
            .map_err(|e| e.user_message())?;
        info!(added, total = state.shopping.len(), "shopping list updated");
        Ok(Json(ShoppingListResponse::new(&state.shopping, Some(added))))
    }

    #[tool(description = "Remove one item from the shopping list by ingredient id.")]
    async fn remove_shopping_item(
        &self,
        Parameters(params): Parameters<IngredientIdParams>,
    ) -> Result<Json<ShoppingListResponse>, String> {
        let mut state = self.state.lock().await;
        if !state.shopping.remove(params.ingredient_id) {
            return Err(format!(
                "ingredient {} is not on the shopping list",
                params.ingredient_id
            ));
        }
        Ok(Json(ShoppingListResponse::new(&state.shopping, None)))
    }

    #[tool(description = "Remove every item from the shopping list.")]
    async fn clear_shopping_list(&self) -> Result<Json<ShoppingListResponse>, String> {
        let mut state = self.state.lock().await;
        state.shopping.clear();
        Ok(Json(ShoppingListResponse::new(&state.shopping, None)))
    }

    #[tool(description = "Show the shopping list grouped by aisle. Items without an aisle are listed under Other.")]
    async fn get_shopping_list(&self) -> Result<Json<ShoppingListResponse>, String> {
        let state = self.state.lock().await;
        Ok(Json(ShoppingListResponse::new(&state.shopping, None)))
    }
}

#[tool_handler]
impl ServerHandler for RecipeFinderServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "recipe-finder".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Recipe finder MCP server. Build an ingredient selection with add_ingredient \
(search_catalog helps with names), optionally set_filters, then find_recipes. Use \
list_recipes to re-sort without searching again, open_recipe for details, and \
add_missing_to_shopping_list to collect what is missing. Results come from Spoonacular, \
or from a fixed demo set when the server runs in demo mode (reported as source)."
                    .to_string(),
            ),
        }
    }
}
