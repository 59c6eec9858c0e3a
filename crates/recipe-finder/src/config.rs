use recipe_common::pipeline::RecipeBackend;
use recipe_common::spoonacular::{SpoonacularClient, SpoonacularConfig};
use tracing::warn;

use crate::error::AppError;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub spoonacular: SpoonacularConfig,
    /// Serve the built-in demo recipes instead of calling Spoonacular.
    pub demo: bool,
    /// Serve MCP over TCP on this address instead of stdio.
    pub tcp_listen_addr: Option<String>,
}

impl Config {
    /// Optional:
    /// - `SPOONACULAR_API_KEY` (without it the server runs in demo mode)
    /// - `SPOONACULAR_BASE_URL`, `SPOONACULAR_RESULT_LIMIT`,
    ///   `SPOONACULAR_MAX_ERROR_BODY_BYTES`
    /// - `RECIPE_FINDER_DEMO` (`1|true|yes|on` or `0|false|no|off`)
    /// - `MCP_TCP_LISTEN_ADDR`
    pub fn from_env() -> Result<Self, AppError> {
        let demo = match std::env::var("RECIPE_FINDER_DEMO") {
            Ok(raw) => parse_flag(&raw).ok_or_else(|| {
                AppError::Config(format!(
                    "RECIPE_FINDER_DEMO must be a boolean flag, got {raw:?}"
                ))
            })?,
            Err(_) => false,
        };

        Ok(Self {
            spoonacular: SpoonacularConfig::from_env(),
            demo,
            tcp_listen_addr: std::env::var("MCP_TCP_LISTEN_ADDR").ok(),
        })
    }

    pub fn backend(&self) -> Result<RecipeBackend, AppError> {
        if self.demo {
            return Ok(RecipeBackend::Demo);
        }
        if self.spoonacular.api_key.is_none() {
            warn!("SPOONACULAR_API_KEY is not set, serving demo recipes");
            return Ok(RecipeBackend::Demo);
        }
        Ok(RecipeBackend::Live(SpoonacularClient::new(
            self.spoonacular.clone(),
        )?))
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
