use std::collections::BTreeSet;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use swipestock::config::StorageBackend;
use swipestock::models::Stock;
use swipestock::services::stocks_service;
use swipestock::{build_store, config, routes, AppState};
use tower::ServiceExt;

fn stock(id: i64, ticker: &str, name: &str, tags: &[&str], likes: i64) -> Stock {
    Stock {
        id,
        ticker: ticker.to_string(),
        name: name.to_string(),
        sector: "Test".to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        likes,
    }
}

fn small_catalog() -> Vec<Stock> {
    vec![
        stock(1, "TSLA", "Tesla, Inc.", &["tech", "automotive"], 0),
        stock(2, "AAPL", "Apple Inc.", &["tech"], 0),
        stock(3, "F", "Ford Motor Company", &["automotive"], 0),
        stock(4, "KO", "The Coca-Cola Company", &["beverages"], 0),
        stock(5, "GM", "General Motors Company", &["automotive", "tech"], 0),
    ]
}

async fn test_state() -> AppState {
    let mut settings = config::load();
    settings.storage = StorageBackend::Memory;
    settings.bcrypt_cost = 4;
    settings.seed_catalog = false;
    settings.recommendation_limit = 20;
    settings.search_limit = 10;

    let store = build_store(&settings).await.expect("memory store");
    for s in small_catalog() {
        store.upsert_stock(&s).await.unwrap();
    }
    AppState::new(store, settings)
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(state: &AppState, req: Request<Body>) -> (StatusCode, Value) {
    let res = routes::app(state.clone()).oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn register(state: &AppState, email: &str) -> i64 {
    let (status, body) = send(
        state,
        json_request(Method::POST, "/", json!({ "email": email, "password": "pw" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["userId"].as_i64().unwrap()
}

async fn like(state: &AppState, user_id: i64, stock_id: i64) {
    let (status, _) = send(
        state,
        json_request(
            Method::POST,
            "/swipe",
            json!({ "userId": user_id, "stockId": stock_id, "swipeType": "like" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

fn tickers(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|s| s["ticker"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn search_is_case_insensitive_on_ticker() {
    let state = test_state().await;

    let (status, body) = send(&state, get("/search?query=aapl")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(tickers(&body), vec!["AAPL"]);
}

#[tokio::test]
async fn search_matches_name_substrings() {
    let state = test_state().await;

    let (_, body) = send(&state, get("/search?query=motor")).await;

    assert_eq!(tickers(&body), vec!["F", "GM"]);
}

#[tokio::test]
async fn search_returns_only_the_wire_fields() {
    let state = test_state().await;

    let (_, body) = send(&state, get("/search?query=TSLA")).await;

    assert_eq!(
        body,
        json!([{ "id": 1, "ticker": "TSLA", "name": "Tesla, Inc.", "sector": "Test" }])
    );
}

#[tokio::test]
async fn empty_or_missing_query_returns_empty_list() {
    let state = test_state().await;

    for uri in ["/search?query=", "/search?query=%20%20", "/search"] {
        let (status, body) = send(&state, get(uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }
}

#[tokio::test]
async fn search_without_matches_returns_empty_list() {
    let state = test_state().await;

    let (status, body) = send(&state, get("/search?query=zzzz")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn search_treats_regex_characters_literally() {
    let state = test_state().await;

    let (status, body) = send(&state, get("/search?query=.*")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn search_respects_limit() {
    let mut state = test_state().await;
    state.settings.search_limit = 2;

    let (_, body) = send(&state, get("/search?query=o")).await;

    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn zero_search_limit_still_returns_a_result() {
    let mut state = test_state().await;
    state.settings.search_limit = 0;

    let (_, body) = send(&state, get("/search?query=o")).await;

    assert_eq!(tickers(&body), vec!["F"]);
}

#[tokio::test]
async fn recommendations_for_unknown_user_are_not_found() {
    let state = test_state().await;

    let (status, body) = send(&state, get("/recommendations?user_id=42")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].as_str().unwrap().contains("42"));
}

#[tokio::test]
async fn recommendations_without_user_id_is_a_validation_error() {
    let state = test_state().await;

    let (status, _) = send(&state, get("/recommendations")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&state, get("/recommendations?user_id=abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn liked_tags_rank_related_stocks_first() {
    let state = test_state().await;
    let user = register(&state, "rank@example.com").await;

    like(&state, user, 1).await;

    let (status, body) = send(&state, get(&format!("/recommendations?user_id={user}"))).await;

    assert_eq!(status, StatusCode::OK);
    // two shared tags beat one; ticker breaks ties; KO shares nothing
    assert_eq!(tickers(&body), vec!["GM", "TSLA", "AAPL", "F"]);
}

#[tokio::test]
async fn explicit_interests_drive_recommendations() {
    let state = test_state().await;
    let user = register(&state, "bev@example.com").await;

    send(
        &state,
        json_request(Method::PUT, &format!("/{user}/interests"), json!({ "interests": ["Beverages"] })),
    )
    .await;

    let (_, body) = send(&state, get(&format!("/recommendations?user_id={user}"))).await;

    assert_eq!(tickers(&body), vec!["KO"]);
}

#[tokio::test]
async fn empty_interests_fall_back_to_popularity() {
    let state = test_state().await;
    let a = register(&state, "a@example.com").await;
    let b = register(&state, "b@example.com").await;
    let fresh = register(&state, "fresh@example.com").await;

    like(&state, a, 4).await;
    like(&state, b, 4).await;
    like(&state, b, 3).await;

    let (status, body) = send(&state, get(&format!("/recommendations?user_id={fresh}"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(tickers(&body), vec!["KO", "F", "AAPL", "GM", "TSLA"]);
}

#[tokio::test]
async fn recommendations_respect_limit() {
    let mut state = test_state().await;
    state.settings.recommendation_limit = 1;
    let user = register(&state, "limit@example.com").await;

    like(&state, user, 1).await;
    let (_, body) = send(&state, get(&format!("/recommendations?user_id={user}"))).await;

    assert_eq!(tickers(&body), vec!["GM"]);
}

#[test]
fn rank_by_interest_orders_by_overlap_then_ticker() {
    let interests: BTreeSet<String> = ["automotive", "tech"].iter().map(|s| s.to_string()).collect();

    let ranked = stocks_service::rank_by_interest(small_catalog(), &interests, 10);
    let got: Vec<&str> = ranked.iter().map(|s| s.ticker.as_str()).collect();

    assert_eq!(got, vec!["GM", "TSLA", "AAPL", "F"]);
}

#[test]
fn overlap_ignores_duplicate_stock_tags() {
    let interests: BTreeSet<String> = ["tech".to_string()].into_iter().collect();
    let s = stock(9, "DUP", "Dup Corp", &["tech", "tech"], 0);

    assert_eq!(stocks_service::overlap(&s, &interests), 1);
}

#[test]
fn rank_by_popularity_orders_by_likes_then_ticker() {
    let stocks = vec![
        stock(1, "B", "B", &[], 3),
        stock(2, "A", "A", &[], 3),
        stock(3, "C", "C", &[], 7),
        stock(4, "D", "D", &[], 0),
    ];

    let ranked = stocks_service::rank_by_popularity(stocks, 3);
    let got: Vec<&str> = ranked.iter().map(|s| s.ticker.as_str()).collect();

    assert_eq!(got, vec!["C", "A", "B"]);
}
