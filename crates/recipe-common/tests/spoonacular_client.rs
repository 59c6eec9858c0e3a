use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use recipe_common::error::{RecipeError, SERVICE_UNAVAILABLE_MESSAGE};
use recipe_common::filters::FilterCriteria;
use recipe_common::pipeline::find_recipes;
use recipe_common::spoonacular::{SpoonacularClient, SpoonacularConfig};

type Params = HashMap<String, String>;

#[derive(Clone, Default)]
struct Upstream {
    calls: Arc<Mutex<Vec<(&'static str, Params)>>>,
    match_body: Option<Value>,
    bulk_error: Option<(StatusCode, String)>,
}

impl Upstream {
    fn calls(&self) -> Vec<(&'static str, Params)> {
        self.calls.lock().unwrap().clone()
    }
}

async fn find_by_ingredients(
    State(upstream): State<Upstream>,
    Query(params): Query<Params>,
) -> (StatusCode, Json<Value>) {
    upstream.calls.lock().unwrap().push(("match", params));
    let body = upstream.match_body.clone().unwrap_or_else(|| {
        json!([
            {
                "id": 1, "title": "Garlic Chicken", "usedIngredientCount": 2,
                "missedIngredientCount": 1,
                "usedIngredients": [
                    {"id": 11215, "name": "garlic", "aisle": "Produce"},
                    {"id": 5062, "name": "chicken breast", "aisle": "Meat"}
                ],
                "missedIngredients": [{"id": 1001, "name": "butter", "aisle": "Milk, Eggs, Other Dairy"}]
            },
            {
                "id": 2, "title": "Onion Soup", "usedIngredientCount": 1,
                "missedIngredientCount": 0,
                "usedIngredients": [{"id": 11282, "name": "onion", "aisle": "Produce"}],
                "missedIngredients": []
            }
        ])
    });
    (StatusCode::OK, Json(body))
}

async fn information_bulk(
    State(upstream): State<Upstream>,
    Query(params): Query<Params>,
) -> (StatusCode, Json<Value>) {
    upstream.calls.lock().unwrap().push(("bulk", params));
    if let Some((status, message)) = upstream.bulk_error.clone() {
        return (
            status,
            Json(json!({"status": "failure", "code": status.as_u16(), "message": message})),
        );
    }
    (
        StatusCode::OK,
        Json(json!([
            {"id": 2, "title": "Onion Soup", "readyInMinutes": 40, "aggregateLikes": 3,
             "servings": 4, "sourceUrl": "https://example.com/2", "summary": "<b>Warm</b>",
             "extendedIngredients": [{"id": 11282, "name": "onion", "original": "2 onions"}]},
            {"id": 1, "title": "Garlic Chicken", "readyInMinutes": 25, "aggregateLikes": 10,
             "servings": 2, "sourceUrl": "https://example.com/1", "summary": "",
             "extendedIngredients": []}
        ])),
    )
}

async fn spawn_upstream(upstream: Upstream) -> String {
    let app = Router::new()
        .route("/recipes/findByIngredients", get(find_by_ingredients))
        .route("/recipes/informationBulk", get(information_bulk))
        .with_state(upstream);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn client_for(base_url: String) -> SpoonacularClient {
    SpoonacularClient::new(SpoonacularConfig {
        base_url,
        api_key: Some("test-key".to_string()),
        ..Default::default()
    })
    .unwrap()
}

fn names(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn search_sends_expected_query_parameters() {
    let upstream = Upstream::default();
    let client = client_for(spawn_upstream(upstream.clone()).await);
    let filters = FilterCriteria {
        diet: Some("vegetarian".to_string()),
        meal_type: Some("main course".to_string()),
        max_ready_time: Some("30".to_string()),
        ..Default::default()
    };

    let recipes = find_recipes(&client, &names(&["Chicken Breast", "Garlic"]), &filters)
        .await
        .unwrap();
    assert_eq!(recipes.len(), 2);

    let calls = upstream.calls();
    assert_eq!(calls.len(), 2);

    let (kind, params) = &calls[0];
    assert_eq!(*kind, "match");
    assert_eq!(params["apiKey"], "test-key");
    assert_eq!(params["ingredients"], "Chicken Breast,Garlic");
    assert_eq!(params["number"], "12");
    assert_eq!(params["ranking"], "1");
    assert_eq!(params["ignorePantry"], "true");
    assert_eq!(params["diet"], "vegetarian");
    assert_eq!(params["type"], "main course");
    assert_eq!(params["maxReadyTime"], "30");
    assert!(!params.contains_key("cuisine"));

    let (kind, params) = &calls[1];
    assert_eq!(*kind, "bulk");
    assert_eq!(params["ids"], "1,2");
    assert_eq!(params["apiKey"], "test-key");
}

#[tokio::test]
async fn merged_recipes_follow_bulk_order() {
    let upstream = Upstream::default();
    let client = client_for(spawn_upstream(upstream).await);

    let recipes = find_recipes(&client, &names(&["onion"]), &FilterCriteria::default())
        .await
        .unwrap();

    let soup = &recipes[0];
    assert_eq!(soup.id(), 2);
    assert_eq!(soup.matched.used_ingredient_count, 1);
    assert!(soup.can_make_now());
    assert_eq!(soup.match_percentage(), 100);
    assert_eq!(soup.summary_excerpt(), "Warm");

    let chicken = &recipes[1];
    assert_eq!(chicken.id(), 1);
    assert_eq!(chicken.matched.missed_ingredient_count, 1);
    assert_eq!(chicken.matched.missed_ingredients[0].name, "butter");
    assert_eq!(chicken.ingredient_count(), 3);
}

#[tokio::test]
async fn empty_match_result_skips_bulk_call() {
    let upstream = Upstream {
        match_body: Some(json!([])),
        ..Default::default()
    };
    let client = client_for(spawn_upstream(upstream.clone()).await);

    let recipes = find_recipes(&client, &names(&["gravel"]), &FilterCriteria::default())
        .await
        .unwrap();
    assert!(recipes.is_empty());
    let kinds: Vec<&str> = upstream.calls().iter().map(|(k, _)| *k).collect();
    assert_eq!(kinds, vec!["match"]);
}

#[tokio::test]
async fn upstream_error_carries_status_and_message() {
    let upstream = Upstream {
        bulk_error: Some((
            StatusCode::PAYMENT_REQUIRED,
            "Your daily points limit of 150 has been reached.".to_string(),
        )),
        ..Default::default()
    };
    let client = client_for(spawn_upstream(upstream).await);

    let err = find_recipes(&client, &names(&["onion"]), &FilterCriteria::default())
        .await
        .unwrap_err();
    assert!(matches!(err, RecipeError::Upstream { status: 402, .. }));
    assert_eq!(
        err.user_message(),
        "[402] Your daily points limit of 150 has been reached."
    );
}

#[tokio::test]
async fn malformed_body_is_a_transport_failure() {
    let upstream = Upstream {
        match_body: Some(json!({"unexpected": "object"})),
        ..Default::default()
    };
    let client = client_for(spawn_upstream(upstream).await);

    let err = find_recipes(&client, &names(&["onion"]), &FilterCriteria::default())
        .await
        .unwrap_err();
    assert!(matches!(err, RecipeError::Transport(_)));
    assert_eq!(err.user_message(), SERVICE_UNAVAILABLE_MESSAGE);
}

#[tokio::test]
async fn unreachable_host_is_a_transport_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(format!("http://{addr}"));
    let err = find_recipes(&client, &names(&["onion"]), &FilterCriteria::default())
        .await
        .unwrap_err();
    assert!(matches!(err, RecipeError::Transport(_)));
}
