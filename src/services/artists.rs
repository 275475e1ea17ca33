use chrono::NaiveDateTime;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::info;

use crate::{
    db::{
        entities::artist,
        enums::decode_genres,
        repositories::{ArtistRepository, ShowRepository, VenueRepository},
    },
    error::{AppError, Result},
    services::{
        directory::{count_upcoming, ArtistSummary, SearchMatch, SearchResults},
        schedule::{format_for_detail, parse_stored_start_time, split_shows},
        validation::ArtistSubmission,
    },
};

/// A show on an artist page, enriched with the hosting venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowByArtist {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistDetail {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<ShowByArtist>,
    pub upcoming_shows: Vec<ShowByArtist>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

pub fn to_submission(artist: artist::Model) -> ArtistSubmission {
    ArtistSubmission {
        name: artist.name,
        city: artist.city,
        state: artist.state,
        phone: artist.phone.unwrap_or_default(),
        genres: decode_genres(&artist.genres),
        image_link: artist.image_link.unwrap_or_default(),
        facebook_link: artist.facebook_link.unwrap_or_default(),
        website_link: artist.website.unwrap_or_default(),
        seeking_venue: artist.seeking_venue,
        seeking_description: artist.seeking_description.unwrap_or_default(),
    }
}

/// All artists, ascending by id.
pub async fn list(db: &DatabaseConnection) -> Result<Vec<ArtistSummary>> {
    let artists = ArtistRepository::new(db.clone()).find_all().await?;
    Ok(artists.into_iter().map(ArtistSummary::from).collect())
}

pub async fn search(
    db: &DatabaseConnection,
    search_term: &str,
    now: NaiveDateTime,
) -> Result<SearchResults> {
    let artists = ArtistRepository::new(db.clone())
        .search_by_name(search_term)
        .await?;

    let ids = artists.iter().map(|a| a.id).collect();
    let shows = ShowRepository::new(db.clone()).find_by_artists(ids).await?;
    let upcoming = count_upcoming(&shows, now, |s| s.artist_id)?;

    let data = artists
        .into_iter()
        .map(|a| SearchMatch {
            num_upcoming_shows: upcoming.get(&a.id).copied().unwrap_or(0),
            id: a.id,
            name: a.name,
        })
        .collect();

    Ok(SearchResults::new(search_term, data))
}

pub async fn detail(db: &DatabaseConnection, id: i32, now: NaiveDateTime) -> Result<ArtistDetail> {
    let artist = ArtistRepository::new(db.clone()).get(id).await?;
    let shows = ShowRepository::new(db.clone()).find_by_artist(id).await?;

    let venue_ids = shows.iter().map(|s| s.venue_id).collect();
    let venues = VenueRepository::new(db.clone()).find_by_ids(venue_ids).await?;

    let enriched = shows
        .into_iter()
        .map(|show| {
            let start = parse_stored_start_time(&show.start_time)?;
            let venue = venues.get(&show.venue_id).ok_or_else(|| {
                AppError::ReferentialLookup(format!(
                    "Show by artist {} references missing venue {}",
                    id, show.venue_id
                ))
            })?;
            Ok((
                start,
                ShowByArtist {
                    venue_id: venue.id,
                    venue_name: venue.name.clone(),
                    venue_image_link: venue.image_link.clone(),
                    start_time: format_for_detail(start),
                },
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    let split = split_shows(enriched, now, |(start, _)| *start);
    let past_shows_count = split.past_count();
    let upcoming_shows_count = split.upcoming_count();

    Ok(ArtistDetail {
        id: artist.id,
        name: artist.name,
        genres: decode_genres(&artist.genres),
        city: artist.city,
        state: artist.state,
        phone: artist.phone,
        website: artist.website,
        facebook_link: artist.facebook_link,
        seeking_venue: artist.seeking_venue,
        seeking_description: artist.seeking_description,
        image_link: artist.image_link,
        past_shows: split.past.into_iter().map(|(_, s)| s).collect(),
        upcoming_shows: split.upcoming.into_iter().map(|(_, s)| s).collect(),
        past_shows_count,
        upcoming_shows_count,
    })
}

pub async fn edit_form(db: &DatabaseConnection, id: i32) -> Result<ArtistSubmission> {
    let artist = ArtistRepository::new(db.clone()).get(id).await?;
    Ok(to_submission(artist))
}

pub async fn create(db: &DatabaseConnection, submission: ArtistSubmission) -> Result<artist::Model> {
    let valid = submission.validate()?;
    let artist = ArtistRepository::new(db.clone()).create(valid).await?;
    info!("Artist {} ({}) was listed", artist.id, artist.name);
    Ok(artist)
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    submission: ArtistSubmission,
) -> Result<artist::Model> {
    let valid = submission.validate()?;
    let artist = ArtistRepository::new(db.clone()).update(id, valid).await?;
    info!("Artist {} ({}) was updated", artist.id, artist.name);
    Ok(artist)
}

pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<()> {
    let removed_shows = ArtistRepository::new(db.clone()).delete(id).await?;
    info!("Artist {} was removed along with {} shows", id, removed_shows);
    Ok(())
}
