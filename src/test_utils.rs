//! Test utilities for Venue Booking
//!
//! Provides helpers for creating isolated test environments with:
//! - In-memory SQLite databases (one per test)
//! - AppState factories with a pinned reference clock
//! - Test data generators

use chrono::NaiveDateTime;
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};

use crate::{
    config::{Config, LogFormat, ReferenceTimeMode},
    db::entities::{artist, show, venue},
    services::schedule::{to_storage, ReferenceClock, STORAGE_FORMAT},
    state::AppState,
};

/// Setup an in-memory SQLite database with all migrations applied
///
/// Each call creates a fresh, isolated database
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Create a test configuration with sensible defaults
pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        server_host: "127.0.0.1".to_string(),
        server_port: 5000,
        reference_time: ReferenceTimeMode::PerRequest,
        log_format: LogFormat::Pretty,
        run_migrations: true,
    }
}

/// Parse a `YYYY-MM-DD HH:MM:SS` literal, panicking on typos in tests
pub fn at(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, STORAGE_FORMAT).expect("Invalid test timestamp")
}

/// The instant every test app state treats as "now": 2019-05-21 21:30:00
pub fn test_now() -> NaiveDateTime {
    at("2019-05-21 21:30:00")
}

/// Create a complete test AppState with an isolated database and a clock
/// pinned to [`test_now`]
pub async fn setup_test_app_state() -> AppState {
    let db = setup_test_db().await;
    AppState::new(db, test_config()).with_clock(ReferenceClock::Fixed(test_now()))
}

// ============================================================================
// Test Data Factories
// ============================================================================

/// Create a test venue in the database
pub async fn create_test_venue(
    db: &DatabaseConnection,
    name: &str,
    city: &str,
    state: &str,
) -> venue::Model {
    let venue = venue::ActiveModel {
        name: Set(name.to_string()),
        city: Set(city.to_string()),
        state: Set(state.to_string()),
        address: Set("1015 Folsom Street".to_string()),
        phone: Set(Some("123-123-1234".to_string())),
        genres: Set("Jazz, Reggae".to_string()),
        image_link: Set(None),
        facebook_link: Set(None),
        website: Set(None),
        seeking_talent: Set(false),
        seeking_description: Set(None),
        ..Default::default()
    };

    venue.insert(db).await.expect("Failed to insert test venue")
}

/// Create a test artist in the database
pub async fn create_test_artist(db: &DatabaseConnection, name: &str) -> artist::Model {
    let artist = artist::ActiveModel {
        name: Set(name.to_string()),
        city: Set("San Francisco".to_string()),
        state: Set("CA".to_string()),
        phone: Set(Some("326-123-5000".to_string())),
        genres: Set("Rock n Roll".to_string()),
        image_link: Set(None),
        facebook_link: Set(None),
        website: Set(None),
        seeking_venue: Set(true),
        seeking_description: Set(None),
        ..Default::default()
    };

    artist.insert(db).await.expect("Failed to insert test artist")
}

/// Create a test show in the database
pub async fn create_test_show(
    db: &DatabaseConnection,
    artist_id: i32,
    venue_id: i32,
    start: &str,
) -> show::Model {
    let show = show::ActiveModel {
        artist_id: Set(artist_id),
        venue_id: Set(venue_id),
        start_time: Set(to_storage(at(start))),
    };

    show.insert(db).await.expect("Failed to insert test show")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::EntityTrait;

    #[tokio::test]
    async fn test_setup_test_db() {
        let db = setup_test_db().await;
        let venues = venue::Entity::find().all(&db).await.unwrap();
        assert_eq!(venues.len(), 0);
    }

    #[tokio::test]
    async fn test_create_test_show() {
        let db = setup_test_db().await;
        let venue = create_test_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let artist = create_test_artist(&db, "Guns N Petals").await;
        let show = create_test_show(&db, artist.id, venue.id, "2019-05-21 21:30:00").await;

        assert_eq!(show.venue_id, venue.id);
        assert_eq!(show.artist_id, artist.id);
        assert_eq!(show.start_time, "2019-05-21 21:30:00");
    }

    #[tokio::test]
    async fn test_parallel_databases() {
        // Run two database setups in parallel - they should not interfere
        let (db1, db2) = tokio::join!(setup_test_db(), setup_test_db());

        create_test_artist(&db1, "Artist 1").await;
        create_test_artist(&db2, "Artist 2").await;

        let in_db1 = artist::Entity::find().all(&db1).await.unwrap();
        let in_db2 = artist::Entity::find().all(&db2).await.unwrap();

        assert_eq!(in_db1.len(), 1);
        assert_eq!(in_db2.len(), 1);
        assert_eq!(in_db1[0].name, "Artist 1");
        assert_eq!(in_db2[0].name, "Artist 2");
    }

    #[test]
    fn test_clock_is_pinned() {
        assert_eq!(test_now().to_string(), "2019-05-21 21:30:00");
    }
}
