use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    db::entities::venue,
    error::Result,
    services::{
        self,
        venues::VenueDetail,
        CityGroup, SearchResults, VenueSubmission,
    },
    state::AppState,
};

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search_term: String,
}

/// Venues grouped by city and state
pub async fn list_venues(State(state): State<AppState>) -> Result<Json<Vec<CityGroup>>> {
    Ok(Json(services::venues::list_grouped(&state.db).await?))
}

pub async fn search_venues(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResults>> {
    let now = state.clock.now();
    Ok(Json(
        services::venues::search(&state.db, &query.search_term, now).await?,
    ))
}

/// Venue with its shows split into past and upcoming
pub async fn get_venue(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<VenueDetail>> {
    let now = state.clock.now();
    Ok(Json(services::venues::detail(&state.db, id, now).await?))
}

pub async fn create_venue(
    State(state): State<AppState>,
    Json(payload): Json<VenueSubmission>,
) -> Result<(StatusCode, Json<venue::Model>)> {
    let venue = services::venues::create(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(venue)))
}

pub async fn update_venue(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<VenueSubmission>,
) -> Result<Json<venue::Model>> {
    Ok(Json(services::venues::update(&state.db, id, payload).await?))
}

pub async fn delete_venue(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    services::venues::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
