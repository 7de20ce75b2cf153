// Shared fixtures for the booking integration tests
#![allow(dead_code)]

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use stagebook_db::entities::{artist, show, venue, Genres};
use stagebook_db::mutation::{self, ArtistInput, ShowInput, VenueInput};
use stagebook_db::DatabaseConfig;

/// Fresh in-memory database with every migration applied
pub async fn test_db() -> DatabaseConnection {
    let db = stagebook_db::connect(&DatabaseConfig::in_memory())
        .await
        .expect("failed to open in-memory database");
    stagebook_migration::Migrator::up(&db, None)
        .await
        .expect("failed to run migrations");
    db
}

/// Fixed evaluation instant so partitions are deterministic
pub fn now() -> DateTime<FixedOffset> {
    Utc.with_ymd_and_hms(2030, 6, 15, 20, 0, 0)
        .unwrap()
        .fixed_offset()
}

pub fn days_from_now(days: i64) -> DateTime<FixedOffset> {
    now() + Duration::days(days)
}

pub fn venue_input(name: &str, city: &str, state: &str) -> VenueInput {
    VenueInput {
        name: name.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        address: "1015 Folsom Street".to_string(),
        phone: Some("123-123-1234".to_string()),
        image_link: None,
        facebook_link: None,
        website: None,
        seeking_talent: false,
        seeking_description: None,
        genres: Genres::from_csv("Jazz,Reggae"),
    }
}

pub fn artist_input(name: &str) -> ArtistInput {
    ArtistInput {
        name: name.to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        phone: None,
        genres: Genres::from_csv("Rock n Roll"),
        image_link: Some(format!("https://img.example.com/{}.jpg", name.len())),
        facebook_link: None,
        website: None,
        looking_venues: true,
        seeking_description: None,
    }
}

pub async fn add_venue(db: &DatabaseConnection, name: &str, city: &str, state: &str) -> venue::Model {
    mutation::create_venue(db, venue_input(name, city, state))
        .await
        .expect("venue insert")
}

pub async fn add_artist(db: &DatabaseConnection, name: &str) -> artist::Model {
    mutation::create_artist(db, artist_input(name))
        .await
        .expect("artist insert")
}

pub async fn add_show(
    db: &DatabaseConnection,
    venue_id: i32,
    artist_id: i32,
    start_time: DateTime<FixedOffset>,
) -> show::Model {
    mutation::create_show(
        db,
        ShowInput {
            venue_id,
            artist_id,
            start_time,
        },
    )
    .await
    .expect("show insert")
}
