use chrono::NaiveDateTime;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::info;

use crate::{
    db::{
        entities::venue,
        enums::decode_genres,
        repositories::{ArtistRepository, ShowRepository, VenueRepository},
    },
    error::{AppError, Result},
    services::{
        directory::{count_upcoming, group_venues_by_city, CityGroup, SearchMatch, SearchResults},
        schedule::{format_for_detail, parse_stored_start_time, split_shows},
        validation::VenueSubmission,
    },
};

/// A show on a venue page, enriched with the performing artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowAtVenue {
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueDetail {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<ShowAtVenue>,
    pub upcoming_shows: Vec<ShowAtVenue>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// Stored venue mapped back to the fields a form submits, for editing.
pub fn to_submission(venue: venue::Model) -> VenueSubmission {
    VenueSubmission {
        name: venue.name,
        city: venue.city,
        state: venue.state,
        address: venue.address,
        phone: venue.phone.unwrap_or_default(),
        genres: decode_genres(&venue.genres),
        image_link: venue.image_link.unwrap_or_default(),
        facebook_link: venue.facebook_link.unwrap_or_default(),
        website_link: venue.website.unwrap_or_default(),
        seeking_talent: venue.seeking_talent,
        seeking_description: venue.seeking_description.unwrap_or_default(),
    }
}

pub async fn list_grouped(db: &DatabaseConnection) -> Result<Vec<CityGroup>> {
    let venues = VenueRepository::new(db.clone()).find_all().await?;
    Ok(group_venues_by_city(venues))
}

/// Case-insensitive substring search over venue names.
pub async fn search(
    db: &DatabaseConnection,
    search_term: &str,
    now: NaiveDateTime,
) -> Result<SearchResults> {
    let venues = VenueRepository::new(db.clone())
        .search_by_name(search_term)
        .await?;

    let ids = venues.iter().map(|v| v.id).collect();
    let shows = ShowRepository::new(db.clone()).find_by_venues(ids).await?;
    let upcoming = count_upcoming(&shows, now, |s| s.venue_id)?;

    let data = venues
        .into_iter()
        .map(|v| SearchMatch {
            num_upcoming_shows: upcoming.get(&v.id).copied().unwrap_or(0),
            id: v.id,
            name: v.name,
        })
        .collect();

    Ok(SearchResults::new(search_term, data))
}

pub async fn detail(db: &DatabaseConnection, id: i32, now: NaiveDateTime) -> Result<VenueDetail> {
    let venue = VenueRepository::new(db.clone()).get(id).await?;
    let shows = ShowRepository::new(db.clone()).find_by_venue(id).await?;

    let artist_ids = shows.iter().map(|s| s.artist_id).collect();
    let artists = ArtistRepository::new(db.clone())
        .find_by_ids(artist_ids)
        .await?;

    let enriched = shows
        .into_iter()
        .map(|show| {
            let start = parse_stored_start_time(&show.start_time)?;
            let artist = artists.get(&show.artist_id).ok_or_else(|| {
                AppError::ReferentialLookup(format!(
                    "Show at venue {} references missing artist {}",
                    id, show.artist_id
                ))
            })?;
            Ok((
                start,
                ShowAtVenue {
                    artist_id: artist.id,
                    artist_name: artist.name.clone(),
                    artist_image_link: artist.image_link.clone(),
                    start_time: format_for_detail(start),
                },
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    let split = split_shows(enriched, now, |(start, _)| *start);
    let past_shows_count = split.past_count();
    let upcoming_shows_count = split.upcoming_count();

    Ok(VenueDetail {
        id: venue.id,
        name: venue.name,
        genres: decode_genres(&venue.genres),
        address: venue.address,
        city: venue.city,
        state: venue.state,
        phone: venue.phone,
        website: venue.website,
        facebook_link: venue.facebook_link,
        seeking_talent: venue.seeking_talent,
        seeking_description: venue.seeking_description,
        image_link: venue.image_link,
        past_shows: split.past.into_iter().map(|(_, s)| s).collect(),
        upcoming_shows: split.upcoming.into_iter().map(|(_, s)| s).collect(),
        past_shows_count,
        upcoming_shows_count,
    })
}

pub async fn edit_form(db: &DatabaseConnection, id: i32) -> Result<VenueSubmission> {
    let venue = VenueRepository::new(db.clone()).get(id).await?;
    Ok(to_submission(venue))
}

pub async fn create(db: &DatabaseConnection, submission: VenueSubmission) -> Result<venue::Model> {
    let valid = submission.validate()?;
    let venue = VenueRepository::new(db.clone()).create(valid).await?;
    info!("Venue {} ({}) was listed", venue.id, venue.name);
    Ok(venue)
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    submission: VenueSubmission,
) -> Result<venue::Model> {
    let valid = submission.validate()?;
    let venue = VenueRepository::new(db.clone()).update(id, valid).await?;
    info!("Venue {} ({}) was updated", venue.id, venue.name);
    Ok(venue)
}

pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<()> {
    let removed_shows = VenueRepository::new(db.clone()).delete(id).await?;
    info!("Venue {} was removed along with {} shows", id, removed_shows);
    Ok(())
}
