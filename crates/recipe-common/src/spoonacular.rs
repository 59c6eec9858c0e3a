use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::filters::FilterCriteria;
use crate::model::{RecipeDetail, RecipeSummary};
use crate::pipeline::RecipeSource;

pub const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com";
pub const DEFAULT_RESULT_LIMIT: u32 = 12;

/// `ranking=1` asks upstream to maximise used ingredients.
const RANKING_MAXIMIZE_USED: &str = "1";

#[derive(Clone, Debug)]
pub struct SpoonacularConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub result_limit: u32,
    pub max_error_body_bytes: usize,
}

impl SpoonacularConfig {
    pub fn from_env() -> Self {
        let base_url = std::env::var("SPOONACULAR_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let api_key = std::env::var("SPOONACULAR_API_KEY")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let result_limit = std::env::var("SPOONACULAR_RESULT_LIMIT")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_RESULT_LIMIT);

        let max_error_body_bytes = std::env::var("SPOONACULAR_MAX_ERROR_BODY_BYTES")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(8 * 1024);

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            result_limit,
            max_error_body_bytes,
        }
    }
}

impl Default for SpoonacularConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            result_limit: DEFAULT_RESULT_LIMIT,
            max_error_body_bytes: 8 * 1024,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SpoonacularError {
    #[error("no spoonacular api key configured")]
    MissingApiKey,

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid response JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("upstream returned error: status={status} message={message}")]
    Upstream { status: StatusCode, message: String },

    #[error("upstream returned non-JSON error: status={status} body={body}")]
    UpstreamBody { status: StatusCode, body: String },
}

/// HTTP client for the two Spoonacular endpoints the search needs.
///
/// Requests are sent once; there is no retry and no client-side timeout.
#[derive(Clone)]
pub struct SpoonacularClient {
    config: SpoonacularConfig,
    api_key: String,
    http: reqwest::Client,
}

impl SpoonacularClient {
    pub fn new(config: SpoonacularConfig) -> Result<Self, SpoonacularError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or(SpoonacularError::MissingApiKey)?;
        let http = reqwest::Client::builder()
            .user_agent("recipe-finder/spoonacular")
            .build()?;
        Ok(Self {
            config,
            api_key,
            http,
        })
    }


    pub async fn find_by_ingredients(
        &self,
        ingredients: &[String],
        filters: &FilterCriteria,
    ) -> Result<Vec<RecipeSummary>, SpoonacularError> {
        let url = format!("{}/recipes/findByIngredients", self.config.base_url);
        let joined = ingredients.join(",");
        let number = self.config.result_limit.to_string();

        let mut params: Vec<(&str, &str)> = vec![
            ("apiKey", self.api_key.as_str()),
            ("ingredients", joined.as_str()),
            ("number", number.as_str()),
            ("ranking", RANKING_MAXIMIZE_USED),
            ("ignorePantry", "true"),
        ];
        params.extend(filters.query_pairs());

        debug!(
            ingredients = ingredients.len(),
            filters = params.len() - 5,
            "spoonacular match query"
        );
        let resp = self.http.get(&url).query(&params).send().await?;
        Self::parse_json_response(resp, self.config.max_error_body_bytes).await
    }

    pub async fn information_bulk(
        &self,
        ids: &[i64],
    ) -> Result<Vec<RecipeDetail>, SpoonacularError> {
        let url = format!("{}/recipes/informationBulk", self.config.base_url);
        let ids = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");

        debug!(ids = %ids, "spoonacular bulk detail query");
        let resp = self
            .http
            .get(&url)
            .query(&[("apiKey", self.api_key.as_str()), ("ids", ids.as_str())])
            .send()
            .await?;
        Self::parse_json_response(resp, self.config.max_error_body_bytes).await
    }

    async fn parse_json_response<T: for<'de> Deserialize<'de>>(
        resp: reqwest::Response,
        max_error_body_bytes: usize,
    ) -> Result<T, SpoonacularError> {
        if resp.status().is_success() {
            let bytes = resp.bytes().await?;
            return Ok(serde_json::from_slice(&bytes)?);
        }
        Err(Self::to_upstream_error(resp, max_error_body_bytes).await)
    }

    async fn to_upstream_error(
        resp: reqwest::Response,
        max_error_body_bytes: usize,
    ) -> SpoonacularError {
        let status = resp.status();
        let body = read_limited_text(resp, max_error_body_bytes).await;
        if let Ok(parsed) = serde_json::from_str::<SpoonacularErrorBody>(&body) {
            let message = parsed
                .message
                .unwrap_or_else(|| "unknown upstream error".to_string());
            return SpoonacularError::Upstream { status, message };
        }
        SpoonacularError::UpstreamBody { status, body }
    }
}

impl RecipeSource for SpoonacularClient {
    async fn match_query(
        &self,
        ingredients: &[String],
        filters: &FilterCriteria,
    ) -> Result<Vec<RecipeSummary>, SpoonacularError> {
        self.find_by_ingredients(ingredients, filters).await
    }

    async fn bulk_details(&self, ids: &[i64]) -> Result<Vec<RecipeDetail>, SpoonacularError> {
        self.information_bulk(ids).await
    }
}

async fn read_limited_text(resp: reqwest::Response, max_bytes: usize) -> String {
    match resp.bytes().await {
        Ok(mut b) => {
            if b.len() > max_bytes {
                b.truncate(max_bytes);
            }
            String::from_utf8_lossy(&b).to_string()
        }
        Err(e) => {
            warn!(error = %e, "failed to read upstream error body");
            "<failed to read error body>".to_string()
        }
    }
}

#[derive(Debug, Deserialize)]
struct SpoonacularErrorBody {
    message: Option<String>,
}
