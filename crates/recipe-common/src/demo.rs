//! Fixed recipe set served when no Spoonacular key is configured or demo mode is
//! switched on.
use crate::model::{IngredientDetail, IngredientMatch, Recipe, RecipeDetail};

fn serving(id: i64, name: &str, aisle: &str, image: &str) -> IngredientDetail {
    IngredientDetail {
        id,
        amount: 1.0,
        unit: "serving".to_string(),
        unit_long: "serving".to_string(),
        unit_short: "serving".to_string(),
        aisle: Some(aisle.to_string()),
        name: name.to_string(),
        original: name.to_string(),
        original_name: name.to_string(),
        meta: vec![],
        image: Some(format!("https://spoonacular.com/cdn/ingredients_100x100/{image}")),
    }
}

pub fn demo_recipes() -> Vec<Recipe> {
    let apple = serving(9003, "apple", "Produce", "apple.jpg");
    let butter = serving(1001, "butter", "Milk, Eggs, Other Dairy", "butter-sliced.jpg");
    let sugar = serving(19335, "sugar", "Baking", "sugar-in-bowl.png");

    vec![Recipe {
        detail: RecipeDetail {
            id: 641803,
            title: "Easy & Delish! ~ Apple Crumble".to_string(),
            image: Some("https://spoonacular.com/recipeImages/641803-312x231.jpg".to_string()),
            image_type: Some("jpg".to_string()),
            servings: 2,
            ready_in_minutes: 45,
            source_url: "http://www.foodista.com/recipe/P32B6B6N/easy-delish-apple-crumble"
                .to_string(),
            spoonacular_score: 96.0,
            aggregate_likes: 122,
            health_score: 5.0,
            summary: "A delicious apple crumble dessert.".to_string(),
            cuisines: vec!["European".to_string(), "British".to_string()],
            dish_types: vec!["dessert".to_string()],
            diets: vec!["lacto ovo vegetarian".to_string()],
            analyzed_instructions: vec![],
            extended_ingredients: vec![apple.clone(), butter.clone(), sugar.clone()],
        },
        matched: IngredientMatch {
            used_ingredient_count: 1,
            missed_ingredient_count: 2,
            used_ingredients: vec![apple],
            missed_ingredients: vec![butter, sugar],
        },
    }]
}
