use recipe_common::spoonacular::SpoonacularError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Client(#[from] SpoonacularError),
}
