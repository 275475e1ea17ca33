use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionError, TransactionTrait,
};
use std::collections::HashMap;

use crate::db::entities::{artist, show, venue};
use crate::db::enums::encode_genres;
use crate::error::{AppError, Result};
use crate::services::schedule::to_storage;
use crate::services::validation::{ValidArtist, ValidShow, ValidVenue};

/// Unwrap a failed transaction, logging store failures. sea-orm has already
/// rolled the transaction back by the time this runs.
fn rolled_back(action: &str, err: TransactionError<AppError>) -> AppError {
    let err = match err {
        TransactionError::Connection(e) => AppError::Persistence(e),
        TransactionError::Transaction(e) => e,
    };
    if let AppError::Persistence(ref e) = err {
        tracing::error!("{} failed, transaction rolled back: {}", action, e);
    }
    err
}

/// Case-insensitive substring match. Folding happens here rather than in SQL
/// so every backend agrees on non-ASCII names.
fn name_matches(name: &str, term: &str) -> bool {
    name.to_lowercase().contains(&term.to_lowercase())
}

fn venue_fields(active: &mut venue::ActiveModel, venue: ValidVenue) {
    active.name = Set(venue.name);
    active.city = Set(venue.city);
    active.state = Set(venue.state);
    active.address = Set(venue.address);
    active.phone = Set(Some(venue.phone));
    active.genres = Set(encode_genres(&venue.genres));
    active.image_link = Set(venue.image_link);
    active.facebook_link = Set(venue.facebook_link);
    active.website = Set(venue.website);
    active.seeking_talent = Set(venue.seeking_talent);
    active.seeking_description = Set(venue.seeking_description);
}

fn artist_fields(active: &mut artist::ActiveModel, artist: ValidArtist) {
    active.name = Set(artist.name);
    active.city = Set(artist.city);
    active.state = Set(artist.state);
    active.phone = Set(Some(artist.phone));
    active.genres = Set(encode_genres(&artist.genres));
    active.image_link = Set(artist.image_link);
    active.facebook_link = Set(artist.facebook_link);
    active.website = Set(artist.website);
    active.seeking_venue = Set(artist.seeking_venue);
    active.seeking_description = Set(artist.seeking_description);
}

#[derive(Clone)]
pub struct VenueRepository {
    db: DatabaseConnection,
}

impl VenueRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<venue::Model>> {
        Ok(venue::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Like [`Self::find_by_id`], but a missing row is `NotFound`.
    pub async fn get(&self, id: i32) -> Result<venue::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Venue {} not found", id)))
    }

    pub async fn find_all(&self) -> Result<Vec<venue::Model>> {
        Ok(venue::Entity::find()
            .order_by_asc(venue::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn find_by_ids(&self, ids: Vec<i32>) -> Result<HashMap<i32, venue::Model>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        Ok(venue::Entity::find()
            .filter(venue::Column::Id.is_in(ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|v| (v.id, v))
            .collect())
    }

    pub async fn search_by_name(&self, term: &str) -> Result<Vec<venue::Model>> {
        Ok(self
            .find_all()
            .await?
            .into_iter()
            .filter(|row| name_matches(&row.name, term))
            .collect())
    }

    pub async fn create(&self, venue: ValidVenue) -> Result<venue::Model> {
        self.db
            .transaction::<_, venue::Model, AppError>(move |txn| {
                Box::pin(async move {
                    let mut active = <venue::ActiveModel as Default>::default();
                    venue_fields(&mut active, venue);
                    active.insert(txn).await.map_err(AppError::Persistence)
                })
            })
            .await
            .map_err(|e| rolled_back("Create venue", e))
    }

    pub async fn update(&self, id: i32, venue: ValidVenue) -> Result<venue::Model> {
        self.db
            .transaction::<_, venue::Model, AppError>(move |txn| {
                Box::pin(async move {
                    let existing = venue::Entity::find_by_id(id)
                        .one(txn)
                        .await
                        .map_err(AppError::Persistence)?
                        .ok_or_else(|| AppError::NotFound(format!("Venue {} not found", id)))?;
                    let mut active: venue::ActiveModel = existing.into();
                    venue_fields(&mut active, venue);
                    active.update(txn).await.map_err(AppError::Persistence)
                })
            })
            .await
            .map_err(|e| rolled_back("Update venue", e))
    }

    /// Delete a venue and every show held there, in one transaction.
    ///
    /// Returns how many shows were removed alongside it.
    pub async fn delete(&self, id: i32) -> Result<u64> {
        self.db
            .transaction::<_, u64, AppError>(move |txn| {
                Box::pin(async move {
                    venue::Entity::find_by_id(id)
                        .one(txn)
                        .await
                        .map_err(AppError::Persistence)?
                        .ok_or_else(|| AppError::NotFound(format!("Venue {} not found", id)))?;

                    let shows = show::Entity::delete_many()
                        .filter(show::Column::VenueId.eq(id))
                        .exec(txn)
                        .await
                        .map_err(AppError::Persistence)?;

                    venue::Entity::delete_by_id(id)
                        .exec(txn)
                        .await
                        .map_err(AppError::Persistence)?;

                    Ok(shows.rows_affected)
                })
            })
            .await
            .map_err(|e| rolled_back("Delete venue", e))
    }
}

#[derive(Clone)]
pub struct ArtistRepository {
    db: DatabaseConnection,
}

impl ArtistRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<artist::Model>> {
        Ok(artist::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn get(&self, id: i32) -> Result<artist::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Artist {} not found", id)))
    }

    pub async fn find_all(&self) -> Result<Vec<artist::Model>> {
        Ok(artist::Entity::find()
            .order_by_asc(artist::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn find_by_ids(&self, ids: Vec<i32>) -> Result<HashMap<i32, artist::Model>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        Ok(artist::Entity::find()
            .filter(artist::Column::Id.is_in(ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect())
    }

    pub async fn search_by_name(&self, term: &str) -> Result<Vec<artist::Model>> {
        Ok(self
            .find_all()
            .await?
            .into_iter()
            .filter(|row| name_matches(&row.name, term))
            .collect())
    }

    pub async fn create(&self, artist: ValidArtist) -> Result<artist::Model> {
        self.db
            .transaction::<_, artist::Model, AppError>(move |txn| {
                Box::pin(async move {
                    let mut active = <artist::ActiveModel as Default>::default();
                    artist_fields(&mut active, artist);
                    active.insert(txn).await.map_err(AppError::Persistence)
                })
            })
            .await
            .map_err(|e| rolled_back("Create artist", e))
    }

    pub async fn update(&self, id: i32, artist: ValidArtist) -> Result<artist::Model> {
        self.db
            .transaction::<_, artist::Model, AppError>(move |txn| {
                Box::pin(async move {
                    let existing = artist::Entity::find_by_id(id)
                        .one(txn)
                        .await
                        .map_err(AppError::Persistence)?
                        .ok_or_else(|| AppError::NotFound(format!("Artist {} not found", id)))?;
                    let mut active: artist::ActiveModel = existing.into();
                    artist_fields(&mut active, artist);
                    active.update(txn).await.map_err(AppError::Persistence)
                })
            })
            .await
            .map_err(|e| rolled_back("Update artist", e))
    }

    /// Delete an artist and every show they play, in one transaction.
    pub async fn delete(&self, id: i32) -> Result<u64> {
        self.db
            .transaction::<_, u64, AppError>(move |txn| {
                Box::pin(async move {
                    artist::Entity::find_by_id(id)
                        .one(txn)
                        .await
                        .map_err(AppError::Persistence)?
                        .ok_or_else(|| AppError::NotFound(format!("Artist {} not found", id)))?;

                    let shows = show::Entity::delete_many()
                        .filter(show::Column::ArtistId.eq(id))
                        .exec(txn)
                        .await
                        .map_err(AppError::Persistence)?;

                    artist::Entity::delete_by_id(id)
                        .exec(txn)
                        .await
                        .map_err(AppError::Persistence)?;

                    Ok(shows.rows_affected)
                })
            })
            .await
            .map_err(|e| rolled_back("Delete artist", e))
    }
}

#[derive(Clone)]
pub struct ShowRepository {
    db: DatabaseConnection,
}

impl ShowRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<show::Model>> {
        Ok(show::Entity::find()
            .order_by_asc(show::Column::StartTime)
            .order_by_asc(show::Column::VenueId)
            .order_by_asc(show::Column::ArtistId)
            .all(&self.db)
            .await?)
    }

    /// Look a show up by its full (artist, venue, start time) identity.
    pub async fn find_by_key(
        &self,
        artist_id: i32,
        venue_id: i32,
        start_time: &str,
    ) -> Result<show::Model> {
        show::Entity::find_by_id((artist_id, venue_id, start_time.to_string()))
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Show of artist {} at venue {} starting {} not found",
                    artist_id, venue_id, start_time
                ))
            })
    }

    pub async fn exists(&self, artist_id: i32, venue_id: i32, start_time: &str) -> Result<bool> {
        Ok(show::Entity::find_by_id((artist_id, venue_id, start_time.to_string()))
            .one(&self.db)
            .await?
            .is_some())
    }

    pub async fn find_by_venue(&self, venue_id: i32) -> Result<Vec<show::Model>> {
        self.find_by_venues(vec![venue_id]).await
    }

    pub async fn find_by_artist(&self, artist_id: i32) -> Result<Vec<show::Model>> {
        self.find_by_artists(vec![artist_id]).await
    }

    pub async fn find_by_venues(&self, venue_ids: Vec<i32>) -> Result<Vec<show::Model>> {
        if venue_ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(show::Entity::find()
            .filter(show::Column::VenueId.is_in(venue_ids))
            .order_by_asc(show::Column::StartTime)
            .all(&self.db)
            .await?)
    }

    pub async fn find_by_artists(&self, artist_ids: Vec<i32>) -> Result<Vec<show::Model>> {
        if artist_ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(show::Entity::find()
            .filter(show::Column::ArtistId.is_in(artist_ids))
            .order_by_asc(show::Column::StartTime)
            .all(&self.db)
            .await?)
    }

    pub async fn create(&self, show: ValidShow) -> Result<show::Model> {
        self.db
            .transaction::<_, show::Model, AppError>(move |txn| {
                Box::pin(async move {
                    show::ActiveModel {
                        artist_id: Set(show.artist_id),
                        venue_id: Set(show.venue_id),
                        start_time: Set(to_storage(show.start_time)),
                    }
                    .insert(txn)
                    .await
                    .map_err(AppError::Persistence)
                })
            })
            .await
            .map_err(|e| rolled_back("Create show", e))
    }
}
