use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use movie_finder::{
    error::AppError,
    models::{Lookup, LookupKey},
    services::providers::{MetadataProvider, OmdbProvider},
};

type Seen = Arc<Mutex<Vec<HashMap<String, String>>>>;

/// Local stand-in for the OMDb endpoint; records every query string it receives
async fn omdb(State(seen): State<Seen>, Query(params): Query<HashMap<String, String>>) -> Response {
    seen.lock().unwrap().push(params.clone());

    if params.get("apikey").map(String::as_str) != Some("test_key") {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"Response": "False", "Error": "Invalid API key!"})),
        )
            .into_response();
    }

    let title = params.get("t").map(String::as_str);
    let id = params.get("i").map(String::as_str);

    match (title, id) {
        (Some("Avengers: Endgame"), _) | (_, Some("tt4154796")) => Json(json!({
            "Title": "Avengers: Endgame",
            "Year": "2019",
            "Rated": "PG-13",
            "Poster": "https://img.example/endgame.jpg",
            "imdbID": "tt4154796",
            "Response": "True"
        }))
        .into_response(),
        (Some("garbled"), _) => "<html>oops</html>".into_response(),
        (Some("partial"), _) => Json(json!({"Title": "partial", "Response": "True"})).into_response(),
        _ => Json(json!({"Response": "False", "Error": "Movie not found!"})).into_response(),
    }
}

async fn spawn_omdb() -> (SocketAddr, Seen) {
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new().route("/", get(omdb)).with_state(seen.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, seen)
}

fn provider(addr: SocketAddr, key: &str) -> OmdbProvider {
    OmdbProvider::new(key.to_string(), format!("http://{}/", addr))
}

#[tokio::test]
async fn test_title_lookup_sends_title_and_key() {
    let (addr, seen) = spawn_omdb().await;

    let lookup = provider(addr, "test_key")
        .lookup(&LookupKey::Title("Avengers: Endgame".to_string()))
        .await
        .unwrap();

    let record = lookup.found().expect("record");
    assert_eq!(record.imdb_id, "tt4154796");
    assert_eq!(record.poster.as_deref(), Some("https://img.example/endgame.jpg"));

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].get("t").map(String::as_str), Some("Avengers: Endgame"));
    assert_eq!(seen[0].get("apikey").map(String::as_str), Some("test_key"));
    assert!(!seen[0].contains_key("i"));
}

#[tokio::test]
async fn test_id_lookup_sends_identifier() {
    let (addr, seen) = spawn_omdb().await;

    let lookup = provider(addr, "test_key")
        .lookup(&LookupKey::Id("tt4154796".to_string()))
        .await
        .unwrap();

    assert!(matches!(lookup, Lookup::Found(_)));
    let seen = seen.lock().unwrap();
    assert_eq!(seen[0].get("i").map(String::as_str), Some("tt4154796"));
    assert!(!seen[0].contains_key("t"));
}

#[tokio::test]
async fn test_false_sentinel_is_missing() {
    let (addr, _) = spawn_omdb().await;

    let lookup = provider(addr, "test_key")
        .lookup(&LookupKey::Title("zzzznotamovie".to_string()))
        .await
        .unwrap();

    assert_eq!(
        lookup,
        Lookup::Missing {
            reason: "Movie not found!".to_string()
        }
    );
}

#[tokio::test]
async fn test_non_json_body_is_parse_error() {
    let (addr, _) = spawn_omdb().await;

    let err = provider(addr, "test_key")
        .lookup(&LookupKey::Title("garbled".to_string()))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Parse(_)));
}

#[tokio::test]
async fn test_partial_success_payload_is_parse_error() {
    let (addr, _) = spawn_omdb().await;

    let err = provider(addr, "test_key")
        .lookup(&LookupKey::Title("partial".to_string()))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Parse(_)));
}

#[tokio::test]
async fn test_rejected_key_is_external_api_error() {
    let (addr, _) = spawn_omdb().await;

    let err = provider(addr, "wrong_key")
        .lookup(&LookupKey::Title("Joker".to_string()))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::ExternalApi(_)));
}

#[tokio::test]
async fn test_unreachable_service_is_http_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = provider(addr, "test_key")
        .lookup(&LookupKey::Title("Joker".to_string()))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::HttpClient(_)));
}
