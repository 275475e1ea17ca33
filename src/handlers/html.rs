use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};

use crate::{
    error::AppError,
    services::{self, ArtistSubmission, ShowSubmission, VenueSubmission},
    state::AppState,
    templates::{
        artist_detail_page, artist_form_page, artists_page, error_page, home_page,
        search_results_page, show_form_page, shows_page, venue_detail_page, venue_form_page,
        venues_page, FormMode, Notice, SearchKind,
    },
};

use super::forms::FormFields;

/// Error rendered as a full HTML page rather than JSON.
pub struct HtmlError(AppError);

impl From<AppError> for HtmlError {
    fn from(error: AppError) -> Self {
        Self(error)
    }
}

impl IntoResponse for HtmlError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        let message = self.0.public_message();
        (status, Html(error_page(status, &message).into_string())).into_response()
    }
}

pub type HtmlResult<T> = std::result::Result<T, HtmlError>;

type FormBody = Form<Vec<(String, String)>>;

fn render_home(notice: Notice) -> Html<String> {
    Html(home_page(Some(&notice)).into_string())
}

pub async fn index() -> Html<String> {
    Html(home_page(None).into_string())
}

pub async fn not_found() -> HtmlError {
    HtmlError(AppError::NotFound("The page you requested does not exist".to_string()))
}

// ============================================================================
// Venues
// ============================================================================

pub async fn venues(State(state): State<AppState>) -> HtmlResult<Html<String>> {
    let areas = services::venues::list_grouped(&state.db).await?;
    Ok(Html(venues_page(&areas).into_string()))
}

pub async fn search_venues(
    State(state): State<AppState>,
    Form(pairs): FormBody,
) -> HtmlResult<Html<String>> {
    let term = FormFields::new(pairs).text("search_term");
    let results = services::venues::search(&state.db, &term, state.clock.now()).await?;
    Ok(Html(search_results_page(SearchKind::Venues, &results).into_string()))
}

pub async fn show_venue(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> HtmlResult<Html<String>> {
    let venue = services::venues::detail(&state.db, id, state.clock.now()).await?;
    Ok(Html(venue_detail_page(&venue).into_string()))
}

pub async fn create_venue_form() -> Html<String> {
    Html(venue_form_page(FormMode::Create, &VenueSubmission::default(), None).into_string())
}

pub async fn create_venue_submission(
    State(state): State<AppState>,
    Form(pairs): FormBody,
) -> HtmlResult<Html<String>> {
    let submission = VenueSubmission::from(&FormFields::new(pairs));
    let name = submission.name.clone();

    match services::venues::create(&state.db, submission.clone()).await {
        Ok(venue) => Ok(render_home(Notice::success(format!(
            "Venue {} was successfully listed!",
            venue.name
        )))),
        Err(AppError::Validation(errors)) => Ok(Html(
            venue_form_page(FormMode::Create, &submission, Some(&errors)).into_string(),
        )),
        Err(AppError::Persistence(e)) => {
            tracing::error!("Venue {} could not be listed: {}", name, e);
            Ok(render_home(Notice::error(format!(
                "An error occurred. Venue {} could not be listed.",
                name
            ))))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn edit_venue(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> HtmlResult<Html<String>> {
    let submission = services::venues::edit_form(&state.db, id).await?;
    Ok(Html(venue_form_page(FormMode::Edit(id), &submission, None).into_string()))
}

pub async fn edit_venue_submission(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(pairs): FormBody,
) -> HtmlResult<Response> {
    let submission = VenueSubmission::from(&FormFields::new(pairs));
    let name = submission.name.clone();

    match services::venues::update(&state.db, id, submission.clone()).await {
        Ok(venue) => Ok(Redirect::to(&format!("/venues/{}", venue.id)).into_response()),
        Err(AppError::Validation(errors)) => Ok(Html(
            venue_form_page(FormMode::Edit(id), &submission, Some(&errors)).into_string(),
        )
        .into_response()),
        Err(AppError::Persistence(e)) => {
            tracing::error!("Venue {} could not be updated: {}", id, e);
            Ok(render_home(Notice::error(format!(
                "An error occurred. Venue {} could not be updated.",
                name
            )))
            .into_response())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn delete_venue(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> HtmlResult<Html<String>> {
    match services::venues::delete(&state.db, id).await {
        Ok(()) => Ok(render_home(Notice::success(format!(
            "Venue {} was successfully removed!",
            id
        )))),
        Err(AppError::Persistence(e)) => {
            tracing::error!("Venue {} could not be removed: {}", id, e);
            Ok(render_home(Notice::error(format!(
                "An error occurred. Venue {} could not be removed.",
                id
            ))))
        }
        Err(e) => Err(e.into()),
    }
}

// ============================================================================
// Artists
// ============================================================================

pub async fn artists(State(state): State<AppState>) -> HtmlResult<Html<String>> {
    let artists = services::artists::list(&state.db).await?;
    Ok(Html(artists_page(&artists).into_string()))
}

pub async fn search_artists(
    State(state): State<AppState>,
    Form(pairs): FormBody,
) -> HtmlResult<Html<String>> {
    let term = FormFields::new(pairs).text("search_term");
    let results = services::artists::search(&state.db, &term, state.clock.now()).await?;
    Ok(Html(search_results_page(SearchKind::Artists, &results).into_string()))
}

pub async fn show_artist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> HtmlResult<Html<String>> {
    let artist = services::artists::detail(&state.db, id, state.clock.now()).await?;
    Ok(Html(artist_detail_page(&artist).into_string()))
}

pub async fn create_artist_form() -> Html<String> {
    Html(artist_form_page(FormMode::Create, &ArtistSubmission::default(), None).into_string())
}

pub async fn create_artist_submission(
    State(state): State<AppState>,
    Form(pairs): FormBody,
) -> HtmlResult<Html<String>> {
    let submission = ArtistSubmission::from(&FormFields::new(pairs));
    let name = submission.name.clone();

    match services::artists::create(&state.db, submission.clone()).await {
        Ok(artist) => Ok(render_home(Notice::success(format!(
            "Artist {} was successfully listed!",
            artist.name
        )))),
        Err(AppError::Validation(errors)) => Ok(Html(
            artist_form_page(FormMode::Create, &submission, Some(&errors)).into_string(),
        )),
        Err(AppError::Persistence(e)) => {
            tracing::error!("Artist {} could not be listed: {}", name, e);
            Ok(render_home(Notice::error(format!(
                "An error occurred. Artist {} could not be listed.",
                name
            ))))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn edit_artist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> HtmlResult<Html<String>> {
    let submission = services::artists::edit_form(&state.db, id).await?;
    Ok(Html(artist_form_page(FormMode::Edit(id), &submission, None).into_string()))
}

pub async fn edit_artist_submission(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(pairs): FormBody,
) -> HtmlResult<Response> {
    let submission = ArtistSubmission::from(&FormFields::new(pairs));
    let name = submission.name.clone();

    match services::artists::update(&state.db, id, submission.clone()).await {
        Ok(artist) => Ok(Redirect::to(&format!("/artists/{}", artist.id)).into_response()),
        Err(AppError::Validation(errors)) => Ok(Html(
            artist_form_page(FormMode::Edit(id), &submission, Some(&errors)).into_string(),
        )
        .into_response()),
        Err(AppError::Persistence(e)) => {
            tracing::error!("Artist {} could not be updated: {}", id, e);
            Ok(render_home(Notice::error(format!(
                "An error occurred. Artist {} could not be updated.",
                name
            )))
            .into_response())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn delete_artist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> HtmlResult<Html<String>> {
    match services::artists::delete(&state.db, id).await {
        Ok(()) => Ok(render_home(Notice::success(format!(
            "Artist {} was successfully removed!",
            id
        )))),
        Err(AppError::Persistence(e)) => {
            tracing::error!("Artist {} could not be removed: {}", id, e);
            Ok(render_home(Notice::error(format!(
                "An error occurred. Artist {} could not be removed.",
                id
            ))))
        }
        Err(e) => Err(e.into()),
    }
}

// ============================================================================
// Shows
// ============================================================================

pub async fn shows(State(state): State<AppState>) -> HtmlResult<Html<String>> {
    let shows = services::shows::list(&state.db).await?;
    Ok(Html(shows_page(&shows).into_string()))
}

pub async fn create_show_form() -> Html<String> {
    Html(show_form_page(&ShowSubmission::default(), None).into_string())
}

pub async fn create_show_submission(
    State(state): State<AppState>,
    Form(pairs): FormBody,
) -> HtmlResult<Html<String>> {
    let submission = ShowSubmission::from(&FormFields::new(pairs));

    match services::shows::create(&state.db, submission.clone()).await {
        Ok(_) => Ok(render_home(Notice::success("Show was successfully listed!"))),
        Err(AppError::Validation(errors)) => {
            Ok(Html(show_form_page(&submission, Some(&errors)).into_string()))
        }
        Err(AppError::Persistence(e)) => {
            tracing::error!("Show could not be listed: {}", e);
            Ok(render_home(Notice::error(
                "An error occurred. Show could not be listed.",
            )))
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn html_error_keeps_status() {
        let response = HtmlError::from(AppError::NotFound("Venue 9 not found".into())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response =
            HtmlError::from(AppError::Internal("bad row".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
