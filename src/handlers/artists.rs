use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    db::entities::artist,
    error::Result,
    services::{
        self,
        artists::ArtistDetail,
        ArtistSubmission, ArtistSummary, SearchResults,
    },
    state::AppState,
};

use super::venues::SearchQuery;

pub async fn list_artists(State(state): State<AppState>) -> Result<Json<Vec<ArtistSummary>>> {
    Ok(Json(services::artists::list(&state.db).await?))
}

pub async fn search_artists(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResults>> {
    let now = state.clock.now();
    Ok(Json(
        services::artists::search(&state.db, &query.search_term, now).await?,
    ))
}

pub async fn get_artist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ArtistDetail>> {
    let now = state.clock.now();
    Ok(Json(services::artists::detail(&state.db, id, now).await?))
}

pub async fn create_artist(
    State(state): State<AppState>,
    Json(payload): Json<ArtistSubmission>,
) -> Result<(StatusCode, Json<artist::Model>)> {
    let artist = services::artists::create(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(artist)))
}

pub async fn update_artist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ArtistSubmission>,
) -> Result<Json<artist::Model>> {
    Ok(Json(services::artists::update(&state.db, id, payload).await?))
}

pub async fn delete_artist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    services::artists::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
