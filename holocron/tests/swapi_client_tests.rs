//! People API client tests against an in-process HTTP server

use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use holocron::services::{FetchError, PeopleFetcher, PeopleSource, SwapiClient, SwapiError};
use holocron::store::{MemoryStorage, RecordStore};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

async fn people(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let search = params.get("search").cloned().unwrap_or_default().to_lowercase();
    let catalogue = [
        json!({
            "name": "Darth Vader",
            "height": "202",
            "mass": "136",
            "hair_color": "none",
            "skin_color": "white",
            "eye_color": "yellow",
            "birth_year": "41.9BBY",
            "gender": "male",
            "homeworld": "https://swapi.dev/api/planets/1/"
        }),
        json!({ "name": "Darth Maul", "height": "175" }),
        json!({ "name": "Yoda", "height": "66" }),
    ];
    let results: Vec<Value> = catalogue
        .into_iter()
        .filter(|p| {
            p["name"]
                .as_str()
                .map(|n| n.to_lowercase().contains(&search))
                .unwrap_or(false)
        })
        .collect();
    Json(json!({ "count": results.len(), "next": null, "results": results }))
}

async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "database offline")
}

async fn garbage() -> &'static str {
    "<html>not json</html>"
}

/// Start a server and return its base URL
async fn spawn_server() -> String {
    let app = Router::new()
        .route("/api/people/", get(people))
        .route("/broken/people/", get(broken))
        .route("/garbage/people/", get(garbage));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client(base: &str) -> SwapiClient {
    SwapiClient::new(base, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_search_decodes_results() {
    let base = spawn_server().await;

    let results = client(&format!("{}/api", base)).search("Darth Vader").await.unwrap();

    assert_eq!(results.len(), 1);
    let vader = &results[0];
    assert_eq!(vader.name, "Darth Vader");
    assert_eq!(vader.birth_year, "41.9BBY");
    assert_eq!(vader.id, "");
    assert_eq!(
        vader.extra.get("homeworld"),
        Some(&json!("https://swapi.dev/api/planets/1/"))
    );
}

#[tokio::test]
async fn test_search_with_no_match_is_empty() {
    let base = spawn_server().await;
    let results = client(&format!("{}/api", base)).search("Jar Jar").await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_server_error_is_api_error() {
    let base = spawn_server().await;
    let err = client(&format!("{}/broken", base)).search("Yoda").await.unwrap_err();

    match err {
        SwapiError::Api(status, body) => {
            assert_eq!(status, 500);
            assert_eq!(body, "database offline");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_undecodable_body_is_parse_error() {
    let base = spawn_server().await;
    let err = client(&format!("{}/garbage", base)).search("Yoda").await.unwrap_err();
    assert!(matches!(err, SwapiError::Parse(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{}/api", addr)).search("Yoda").await.unwrap_err();
    assert!(matches!(err, SwapiError::Network(_)));
}

#[tokio::test]
async fn test_fetcher_over_http_takes_first_result() {
    let base = spawn_server().await;
    let fetcher = PeopleFetcher::new(
        RecordStore::new(Arc::new(MemoryStorage::new())),
        Arc::new(client(&format!("{}/api", base))),
    );

    let person = fetcher.fetch_one("darth").await.unwrap();
    assert_eq!(person.name, "Darth Vader");
    assert_eq!(person.id, "Darth Vader");

    let yoda = fetcher.fetch_one("Yoda").await.unwrap();
    assert_eq!(yoda.id, "Yoda");

    let missing = fetcher.fetch_one("Jar Jar").await.unwrap_err();
    assert!(matches!(missing, FetchError::NotFound(_)));
}

#[tokio::test]
async fn test_fetcher_over_broken_server_is_unavailable() {
    let base = spawn_server().await;
    let fetcher = PeopleFetcher::new(
        RecordStore::new(Arc::new(MemoryStorage::new())),
        Arc::new(client(&format!("{}/broken", base))),
    );

    let err = fetcher.fetch_one("Yoda").await.unwrap_err();
    assert!(matches!(err, FetchError::Unavailable));
}
