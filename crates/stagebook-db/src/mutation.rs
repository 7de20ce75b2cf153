//! Write side. Each mutation runs inside a single transaction that commits on
//! success and rolls back on any error; the pooled connection is released
//! when the transaction is dropped, whatever the outcome.

use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, TransactionTrait,
};

use crate::entities::{artist, show, venue, Genres};
use crate::query::{to_utc, Instant};
use crate::BookingError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueInput {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub genres: Genres,
}

impl VenueInput {
    fn into_active_model(self, id: ActiveValue<i32>) -> venue::ActiveModel {
        venue::ActiveModel {
            id,
            name: Set(self.name),
            city: Set(self.city),
            state: Set(self.state),
            address: Set(self.address),
            phone: Set(self.phone),
            image_link: Set(self.image_link),
            facebook_link: Set(self.facebook_link),
            website: Set(self.website),
            seeking_talent: Set(self.seeking_talent),
            seeking_description: Set(self.seeking_description),
            genres: Set(self.genres),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistInput {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Genres,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub looking_venues: bool,
    pub seeking_description: Option<String>,
}

impl ArtistInput {
    fn into_active_model(self, id: ActiveValue<i32>) -> artist::ActiveModel {
        artist::ActiveModel {
            id,
            name: Set(self.name),
            city: Set(self.city),
            state: Set(self.state),
            phone: Set(self.phone),
            genres: Set(self.genres),
            image_link: Set(self.image_link),
            facebook_link: Set(self.facebook_link),
            website: Set(self.website),
            looking_venues: Set(self.looking_venues),
            seeking_description: Set(self.seeking_description),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowInput {
    pub venue_id: i32,
    pub artist_id: i32,
    pub start_time: Instant,
}

fn not_updated(what: String) -> impl FnOnce(DbErr) -> BookingError {
    move |e| match e {
        DbErr::RecordNotUpdated => BookingError::NotFound(what),
        other => other.into(),
    }
}

pub async fn create_venue(
    db: &DatabaseConnection,
    input: VenueInput,
) -> Result<venue::Model, BookingError> {
    let model = input.into_active_model(NotSet);
    let created = db
        .transaction::<_, venue::Model, BookingError>(|txn| {
            Box::pin(async move { Ok(model.insert(txn).await?) })
        })
        .await?;
    tracing::info!(venue_id = created.id, "venue listed");
    Ok(created)
}

/// Full-field overwrite of an existing venue.
pub async fn update_venue(
    db: &DatabaseConnection,
    id: i32,
    input: VenueInput,
) -> Result<venue::Model, BookingError> {
    let model = input.into_active_model(Unchanged(id));
    let updated = db
        .transaction::<_, venue::Model, BookingError>(|txn| {
            Box::pin(async move {
                model
                    .update(txn)
                    .await
                    .map_err(not_updated(format!("venue {id}")))
            })
        })
        .await?;
    tracing::info!(venue_id = id, "venue edited");
    Ok(updated)
}

/// Remove a venue and every show it hosts. Returns the removed record.
pub async fn delete_venue(db: &DatabaseConnection, id: i32) -> Result<venue::Model, BookingError> {
    let removed = db
        .transaction::<_, venue::Model, BookingError>(|txn| {
            Box::pin(async move {
                let existing = venue::Entity::find_by_id(id)
                    .one(txn)
                    .await?
                    .ok_or_else(|| BookingError::not_found(format!("venue {id}")))?;

                let shows = show::Entity::delete_many()
                    .filter(show::Column::VenueId.eq(id))
                    .exec(txn)
                    .await?;
                venue::Entity::delete_by_id(id).exec(txn).await?;

                tracing::debug!(
                    venue_id = id,
                    shows_removed = shows.rows_affected,
                    "venue and its shows removed"
                );
                Ok(existing)
            })
        })
        .await?;
    tracing::info!(venue_id = id, "venue deleted");
    Ok(removed)
}

pub async fn create_artist(
    db: &DatabaseConnection,
    input: ArtistInput,
) -> Result<artist::Model, BookingError> {
    let model = input.into_active_model(NotSet);
    let created = db
        .transaction::<_, artist::Model, BookingError>(|txn| {
            Box::pin(async move { Ok(model.insert(txn).await?) })
        })
        .await?;
    tracing::info!(artist_id = created.id, "artist listed");
    Ok(created)
}

/// Full-field overwrite of an existing artist.
pub async fn update_artist(
    db: &DatabaseConnection,
    id: i32,
    input: ArtistInput,
) -> Result<artist::Model, BookingError> {
    let model = input.into_active_model(Unchanged(id));
    let updated = db
        .transaction::<_, artist::Model, BookingError>(|txn| {
            Box::pin(async move {
                model
                    .update(txn)
                    .await
                    .map_err(not_updated(format!("artist {id}")))
            })
        })
        .await?;
    tracing::info!(artist_id = id, "artist edited");
    Ok(updated)
}

/// Book a show. Both referenced records must exist at insert time.
pub async fn create_show(
    db: &DatabaseConnection,
    input: ShowInput,
) -> Result<show::Model, BookingError> {
    let ShowInput {
        venue_id,
        artist_id,
        start_time,
    } = input;

    let created = db
        .transaction::<_, show::Model, BookingError>(|txn| {
            Box::pin(async move {
                if venue::Entity::find_by_id(venue_id).one(txn).await?.is_none() {
                    return Err(BookingError::InvalidReference(format!("venue {venue_id}")));
                }
                if artist::Entity::find_by_id(artist_id).one(txn).await?.is_none() {
                    return Err(BookingError::InvalidReference(format!(
                        "artist {artist_id}"
                    )));
                }

                let model = show::ActiveModel {
                    id: NotSet,
                    venue_id: Set(venue_id),
                    artist_id: Set(artist_id),
                    start_time: Set(to_utc(start_time)),
                };
                Ok(model.insert(txn).await?)
            })
        })
        .await?;
    tracing::info!(show_id = created.id, venue_id, artist_id, "show listed");
    Ok(created)
}
