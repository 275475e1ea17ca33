use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::{
    db::entities::show,
    error::Result,
    services::{self, shows::ShowListing, ShowSubmission},
    state::AppState,
};

#[derive(Deserialize)]
pub struct CreateShowRequest {
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: String,
}

impl From<CreateShowRequest> for ShowSubmission {
    fn from(request: CreateShowRequest) -> Self {
        Self {
            artist_id: request.artist_id.to_string(),
            venue_id: request.venue_id.to_string(),
            start_time: request.start_time,
        }
    }
}

pub async fn list_shows(State(state): State<AppState>) -> Result<Json<Vec<ShowListing>>> {
    Ok(Json(services::shows::list(&state.db).await?))
}

pub async fn create_show(
    State(state): State<AppState>,
    Json(payload): Json<CreateShowRequest>,
) -> Result<(StatusCode, Json<show::Model>)> {
    let show = services::shows::create(&state.db, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(show)))
}
