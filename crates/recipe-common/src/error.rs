/// Error types surfaced by a recipe search attempt.
///
/// Every variant is terminal for the attempt: callers discard partial results and
/// show [`RecipeError::user_message`]. Client-level failures are defined in
/// [`crate::spoonacular::SpoonacularError`] and convert into this type via `From`.
use tracing::error;

use crate::spoonacular::SpoonacularError;

pub const EMPTY_SELECTION_MESSAGE: &str = "Please add some ingredients first!";

pub const SERVICE_UNAVAILABLE_MESSAGE: &str =
    "Failed to fetch recipes. The API might be unavailable. Please try again later.";

#[derive(Debug, thiserror::Error)]
pub enum RecipeError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("[{status}] {message}")]
    Upstream { status: u16, message: String },

    #[error("transport failure: {0}")]
    Transport(String),
}

impl RecipeError {
    pub fn empty_selection() -> Self {
        RecipeError::InvalidInput(EMPTY_SELECTION_MESSAGE.to_string())
    }

    /// Text safe to show to the user. Transport details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            RecipeError::InvalidInput(message) => message.clone(),
            RecipeError::Upstream { .. } => self.to_string(),
            RecipeError::Transport(_) => SERVICE_UNAVAILABLE_MESSAGE.to_string(),
        }
    }
}

impl From<SpoonacularError> for RecipeError {
    fn from(err: SpoonacularError) -> Self {
        match err {
            SpoonacularError::Upstream { status, message } => RecipeError::Upstream {
                status: status.as_u16(),
                message,
            },
            other => {
                error!(error = %other, "spoonacular request failed");
                RecipeError::Transport(other.to_string())
            }
        }
    }
}
