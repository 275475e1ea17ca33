//! Integration tests for show API routes
//!
//! Tests listing shows with both sides resolved and the checks applied
//! before a new show is written.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use sea_orm::{ConnectionTrait, EntityTrait};
use tower::util::ServiceExt;

use venue_booking::db::entities::venue;
use venue_booking::db::repositories::ShowRepository;
use venue_booking::handlers;
use venue_booking::state::AppState;
use venue_booking::test_utils::*;

fn create_test_router(state: &AppState) -> Router {
    Router::new()
        .nest("/api", handlers::api_routes())
        .with_state(state.clone())
}

async fn parse_json_response<T: serde::de::DeserializeOwned>(
    response: axum::response::Response,
) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn post_show(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/shows")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_list_shows_resolves_names() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "Park Square Live Music & Coffee", "San Francisco", "CA").await;
    let artist = create_test_artist(&state.db, "The Wild Sax Band").await;
    create_test_show(&state.db, artist.id, venue.id, "2035-04-01 20:00:00").await;

    let app = create_test_router(&state);
    let response = app
        .oneshot(Request::builder().uri("/api/shows").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = parse_json_response(response).await;
    assert_eq!(
        body,
        json!([{
            "venue_id": venue.id,
            "venue_name": "Park Square Live Music & Coffee",
            "artist_id": artist.id,
            "artist_name": "The Wild Sax Band",
            "artist_image_link": null,
            "start_time": "2035-04-01 20:00:00",
            "start_time_display": "Sunday April, 1, 2035 at 8:00PM",
            "start_time_short": "Sun 04, 01, 2035 8:00PM",
        }])
    );
}

#[tokio::test]
async fn test_create_show() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    let artist = create_test_artist(&state.db, "Guns N Petals").await;

    let app = create_test_router(&state);
    let response = app
        .oneshot(post_show(json!({
            "artist_id": artist.id,
            "venue_id": venue.id,
            "start_time": "2035-04-01 20:00",
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: serde_json::Value = parse_json_response(response).await;
    assert_eq!(body["start_time"], "2035-04-01 20:00:00");

    let stored = ShowRepository::new(state.db.clone())
        .find_by_key(artist.id, venue.id, "2035-04-01 20:00:00")
        .await
        .unwrap();
    assert_eq!(stored.venue_id, venue.id);
}

#[tokio::test]
async fn test_create_show_with_unknown_references() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;

    let app = create_test_router(&state);
    let response = app
        .oneshot(post_show(json!({
            "artist_id": 999,
            "venue_id": venue.id,
            "start_time": "2035-04-01 20:00:00",
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = parse_json_response(response).await;
    assert_eq!(body["fields"][0]["field"], "artist_id");
    assert_eq!(body["fields"][0]["kind"], "invalid_reference");
    assert_eq!(body["fields"].as_array().unwrap().len(), 1);

    let shows = ShowRepository::new(state.db.clone()).find_all().await.unwrap();
    assert!(shows.is_empty());
}

#[tokio::test]
async fn test_create_duplicate_show() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    let artist = create_test_artist(&state.db, "Guns N Petals").await;
    create_test_show(&state.db, artist.id, venue.id, "2035-04-01 20:00:00").await;

    let app = create_test_router(&state);
    let response = app
        .oneshot(post_show(json!({
            "artist_id": artist.id,
            "venue_id": venue.id,
            "start_time": "2035-04-01T20:00:00",
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = parse_json_response(response).await;
    assert_eq!(body["fields"][0]["field"], "start_time");
    assert_eq!(body["fields"][0]["kind"], "duplicate");
}

#[tokio::test]
async fn test_create_show_with_bad_start_time() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    let artist = create_test_artist(&state.db, "Guns N Petals").await;

    let app = create_test_router(&state);
    let response = app
        .oneshot(post_show(json!({
            "artist_id": artist.id,
            "venue_id": venue.id,
            "start_time": "next friday",
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = parse_json_response(response).await;
    assert_eq!(body["fields"][0]["kind"], "invalid_date_time");
}

#[tokio::test]
async fn test_list_shows_with_missing_venue_fails() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    let artist = create_test_artist(&state.db, "Guns N Petals").await;
    create_test_show(&state.db, artist.id, venue.id, "2035-04-01 20:00:00").await;

    state
        .db
        .execute_unprepared("PRAGMA foreign_keys = OFF")
        .await
        .unwrap();
    venue::Entity::delete_by_id(venue.id)
        .exec(&state.db)
        .await
        .unwrap();

    let app = create_test_router(&state);
    let response = app
        .oneshot(Request::builder().uri("/api/shows").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = parse_json_response(response).await;
    assert_eq!(
        body["error"],
        format!("Show references missing venue {}", venue.id)
    );
}
