use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::info;

use crate::{
    db::{
        entities::show,
        repositories::{ArtistRepository, ShowRepository, VenueRepository},
    },
    error::{AppError, Result},
    services::{
        schedule::{format_start_time, parse_stored_start_time, to_storage, DisplayFormat},
        validation::{ShowSubmission, ValidationErrorKind, ValidationErrors},
    },
};

/// One row of the show listing, with both sides of the booking resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowListing {
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
    pub start_time_display: String,
    pub start_time_short: String,
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<ShowListing>> {
    let shows = ShowRepository::new(db.clone()).find_all().await?;

    let venue_ids = shows.iter().map(|s| s.venue_id).collect();
    let artist_ids = shows.iter().map(|s| s.artist_id).collect();
    let venues = VenueRepository::new(db.clone()).find_by_ids(venue_ids).await?;
    let artists = ArtistRepository::new(db.clone())
        .find_by_ids(artist_ids)
        .await?;

    shows
        .into_iter()
        .map(|show| {
            let venue = venues.get(&show.venue_id).ok_or_else(|| {
                AppError::ReferentialLookup(format!("Show references missing venue {}", show.venue_id))
            })?;
            let artist = artists.get(&show.artist_id).ok_or_else(|| {
                AppError::ReferentialLookup(format!(
                    "Show references missing artist {}",
                    show.artist_id
                ))
            })?;
            let start = parse_stored_start_time(&show.start_time)?;

            Ok(ShowListing {
                venue_id: venue.id,
                venue_name: venue.name.clone(),
                artist_id: artist.id,
                artist_name: artist.name.clone(),
                artist_image_link: artist.image_link.clone(),
                start_time: show.start_time,
                start_time_display: format_start_time(start, DisplayFormat::Full),
                start_time_short: format_start_time(start, DisplayFormat::Medium),
            })
        })
        .collect()
}

/// Validate and persist a show. Missing artists or venues and an already
/// listed (artist, venue, start time) triple are reported as field errors
/// before anything is written.
pub async fn create(db: &DatabaseConnection, submission: ShowSubmission) -> Result<show::Model> {
    let valid = submission.validate()?;

    let mut errors = ValidationErrors::new();
    if ArtistRepository::new(db.clone())
        .find_by_id(valid.artist_id)
        .await?
        .is_none()
    {
        errors.push("artist_id", ValidationErrorKind::InvalidReference);
    }
    if VenueRepository::new(db.clone())
        .find_by_id(valid.venue_id)
        .await?
        .is_none()
    {
        errors.push("venue_id", ValidationErrorKind::InvalidReference);
    }

    let repository = ShowRepository::new(db.clone());
    if errors.is_empty()
        && repository
            .exists(valid.artist_id, valid.venue_id, &to_storage(valid.start_time))
            .await?
    {
        errors.push("start_time", ValidationErrorKind::Duplicate);
    }
    let valid = errors.into_result(valid)?;

    let show = repository.create(valid).await?;
    info!(
        "Show of artist {} at venue {} on {} was listed",
        show.artist_id, show.venue_id, show.start_time
    );
    Ok(show)
}
