//! Integration tests for venue API routes
//!
//! Tests the venue endpoints including:
//! - Listing grouped by city and state
//! - Case-insensitive search with upcoming show counts
//! - Detail with past and upcoming shows
//! - Create, update and delete with validation

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use sea_orm::{ConnectionTrait, EntityTrait};
use tower::util::ServiceExt;

use venue_booking::db::entities::artist;
use venue_booking::db::repositories::ShowRepository;
use venue_booking::handlers;
use venue_booking::state::AppState;
use venue_booking::test_utils::*;

/// Helper to create a test router with the JSON API
fn create_test_router(state: &AppState) -> Router {
    Router::new()
        .nest("/api", handlers::api_routes())
        .with_state(state.clone())
}

/// Helper to parse JSON response body
async fn parse_json_response<T: serde::de::DeserializeOwned>(
    response: axum::response::Response,
) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_list_venues_empty() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let response = app.oneshot(get("/api/venues")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = parse_json_response(response).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_list_venues_grouped_by_city() {
    let state = setup_test_app_state().await;
    let hop = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    let pianos = create_test_venue(&state.db, "The Dueling Pianos Bar", "New York", "NY").await;
    let park = create_test_venue(&state.db, "Park Square Live Music & Coffee", "San Francisco", "CA").await;

    let app = create_test_router(&state);
    let response = app.oneshot(get("/api/venues")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = parse_json_response(response).await;
    assert_eq!(
        body,
        json!([
            {
                "city": "San Francisco",
                "state": "CA",
                "venues": [
                    { "id": hop.id, "name": "The Musical Hop" },
                    { "id": park.id, "name": "Park Square Live Music & Coffee" },
                ]
            },
            {
                "city": "New York",
                "state": "NY",
                "venues": [{ "id": pianos.id, "name": "The Dueling Pianos Bar" }]
            },
        ])
    );
}

#[tokio::test]
async fn test_same_city_in_different_states_is_separate() {
    let state = setup_test_app_state().await;
    create_test_venue(&state.db, "Main Street Hall", "Springfield", "IL").await;
    create_test_venue(&state.db, "Riverside Stage", "Springfield", "MA").await;

    let app = create_test_router(&state);
    let response = app.oneshot(get("/api/venues")).await.unwrap();

    let body: serde_json::Value = parse_json_response(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_search_venues_counts_upcoming_shows() {
    let state = setup_test_app_state().await;
    let hop = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    create_test_venue(&state.db, "The Dueling Pianos Bar", "New York", "NY").await;
    let park = create_test_venue(&state.db, "Park Square Live Music & Coffee", "San Francisco", "CA").await;
    let artist = create_test_artist(&state.db, "The Wild Sax Band").await;
    create_test_show(&state.db, artist.id, park.id, "2035-04-01 20:00:00").await;
    create_test_show(&state.db, artist.id, park.id, "2019-06-15 23:00:00").await;

    let app = create_test_router(&state);
    let response = app
        .clone()
        .oneshot(get("/api/venues/search?search_term=Hop"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = parse_json_response(response).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["search_term"], "Hop");
    assert_eq!(body["data"][0]["id"], hop.id);
    assert_eq!(body["data"][0]["num_upcoming_shows"], 0);

    let response = app
        .oneshot(get("/api/venues/search?search_term=music"))
        .await
        .unwrap();

    let body: serde_json::Value = parse_json_response(response).await;
    assert_eq!(body["count"], 2);
    let park_match = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["id"] == park.id)
        .unwrap();
    assert_eq!(park_match["num_upcoming_shows"], 2);
}

#[tokio::test]
async fn test_search_without_term_matches_everything() {
    let state = setup_test_app_state().await;
    create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    create_test_venue(&state.db, "The Dueling Pianos Bar", "New York", "NY").await;

    let app = create_test_router(&state);
    let response = app.oneshot(get("/api/venues/search")).await.unwrap();

    let body: serde_json::Value = parse_json_response(response).await;
    assert_eq!(body["count"], 2);
}

#[tokio::test]
async fn test_get_venue_splits_past_and_upcoming() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    let artist = create_test_artist(&state.db, "Guns N Petals").await;
    // Starts exactly at the reference instant, so it counts as past
    create_test_show(&state.db, artist.id, venue.id, "2019-05-21 21:30:00").await;
    create_test_show(&state.db, artist.id, venue.id, "2019-05-21 21:30:01").await;
    create_test_show(&state.db, artist.id, venue.id, "2035-04-01 20:00:00").await;

    let app = create_test_router(&state);
    let response = app
        .oneshot(get(&format!("/api/venues/{}", venue.id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = parse_json_response(response).await;

    assert_eq!(body["name"], "The Musical Hop");
    assert_eq!(body["genres"], json!(["Jazz", "Reggae"]));
    assert_eq!(body["past_shows_count"], 1);
    assert_eq!(body["upcoming_shows_count"], 2);
    assert_eq!(
        body["past_shows"],
        json!([{
            "artist_id": artist.id,
            "artist_name": "Guns N Petals",
            "artist_image_link": null,
            "start_time": "05/21/2019, 21:30",
        }])
    );
    assert_eq!(body["upcoming_shows"][0]["start_time"], "05/21/2019, 21:30");
    assert_eq!(body["upcoming_shows"][1]["start_time"], "04/01/2035, 20:00");
}

#[tokio::test]
async fn test_get_venue_not_found() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let response = app.oneshot(get("/api/venues/99999")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_venue() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let payload = json!({
        "name": "The Musical Hop",
        "city": "San Francisco",
        "state": "CA",
        "address": "1015 Folsom Street",
        "phone": "(123) 123-1234",
        "genres": ["Jazz", "Reggae", "Swing", "Classical", "Folk"],
        "facebook_link": "https://www.facebook.com/TheMusicalHop",
        "website": "https://www.themusicalhop.com",
        "seeking_talent": true,
        "seeking_description": "We are on the lookout for a local artist to play every two weeks."
    });

    let response = app
        .oneshot(json_request("POST", "/api/venues", payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: serde_json::Value = parse_json_response(response).await;
    assert_eq!(body["name"], "The Musical Hop");
    assert_eq!(body["genres"], "Jazz, Reggae, Swing, Classical, Folk");
    assert_eq!(body["website"], "https://www.themusicalhop.com");
    assert_eq!(body["image_link"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_create_venue_reports_every_invalid_field() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let payload = json!({
        "name": "",
        "city": "San Francisco",
        "state": "ZZ",
        "address": "",
        "phone": "12345",
        "genres": ["Polka"],
        "facebook_link": "not a url"
    });

    let response = app
        .oneshot(json_request("POST", "/api/venues", payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = parse_json_response(response).await;
    assert_eq!(body["error"], "Validation failed");

    let fields: Vec<(String, String)> = body["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| {
            (
                f["field"].as_str().unwrap().to_string(),
                f["kind"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    let expected: Vec<(String, String)> = [
        ("name", "required"),
        ("state", "invalid_state"),
        ("phone", "invalid_phone"),
        ("genres", "invalid_genres"),
        ("facebook_link", "invalid_url"),
        ("address", "required"),
    ]
    .iter()
    .map(|(f, k)| (f.to_string(), k.to_string()))
    .collect();
    assert_eq!(fields, expected);
}

#[tokio::test]
async fn test_update_venue() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    let app = create_test_router(&state);

    let payload = json!({
        "name": "The Musical Hop",
        "city": "Oakland",
        "state": "CA",
        "address": "1 Broadway",
        "phone": "415.000.1234",
        "genres": ["Blues"],
    });

    let response = app
        .oneshot(json_request("PUT", &format!("/api/venues/{}", venue.id), payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = parse_json_response(response).await;
    assert_eq!(body["id"], venue.id);
    assert_eq!(body["city"], "Oakland");
    assert_eq!(body["genres"], "Blues");
    assert_eq!(body["seeking_talent"], false);
}

#[tokio::test]
async fn test_delete_venue_removes_shows() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    let artist = create_test_artist(&state.db, "Guns N Petals").await;
    create_test_show(&state.db, artist.id, venue.id, "2035-04-01 20:00:00").await;

    let app = create_test_router(&state);
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/venues/{}", venue.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let shows = ShowRepository::new(state.db.clone())
        .find_by_artist(artist.id)
        .await
        .unwrap();
    assert!(shows.is_empty());

    let response = app
        .oneshot(get(&format!("/api/venues/{}", venue.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_venue_with_missing_artist_fails() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    let artist = create_test_artist(&state.db, "Guns N Petals").await;
    create_test_show(&state.db, artist.id, venue.id, "2035-04-01 20:00:00").await;

    // Leave the show behind when the artist row goes away
    state
        .db
        .execute_unprepared("PRAGMA foreign_keys = OFF")
        .await
        .unwrap();
    artist::Entity::delete_by_id(artist.id)
        .exec(&state.db)
        .await
        .unwrap();

    let app = create_test_router(&state);
    let response = app
        .oneshot(get(&format!("/api/venues/{}", venue.id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = parse_json_response(response).await;
    assert_eq!(
        body["error"],
        format!(
            "Show at venue {} references missing artist {}",
            venue.id, artist.id
        )
    );
    assert!(body["details"]
        .as_str()
        .unwrap()
        .starts_with("Referential lookup failed"));
}
