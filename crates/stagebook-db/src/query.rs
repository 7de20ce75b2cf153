//! Read side: listings, substring search and the upcoming/past show split.
//!
//! Every function takes the evaluation instant `now` from the caller. A show
//! is upcoming when `start_time > now` and past when `start_time < now`; a
//! show starting exactly at `now` belongs to neither partition.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::sea_query::{BinOper, Expr, Func, IntoColumnRef, SimpleExpr};
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use serde::Serialize;

use crate::entities::{artist, show, venue};
use crate::BookingError;

pub type Instant = DateTime<FixedOffset>;

/// Normalize to a UTC offset so stored and compared timestamps share one form.
pub fn to_utc(t: Instant) -> Instant {
    t.with_timezone(&Utc).fixed_offset()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    Upcoming,
    Past,
}

impl Window {
    fn condition(self, now: Instant) -> SimpleExpr {
        match self {
            Window::Upcoming => show::Column::StartTime.gt(now),
            Window::Past => show::Column::StartTime.lt(now),
        }
    }
}

/// One row of a listing or search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: u64,
}

/// Venues sharing one (city, state) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueArea {
    pub city: String,
    pub state: String,
    pub venues: Vec<Listing>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<Listing>,
}

impl SearchResults {
    fn new(data: Vec<Listing>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistEntry {
    pub id: i32,
    pub name: String,
}

/// A show as seen from a venue page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistSlot {
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: Instant,
}

/// A show as seen from an artist page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueSlot {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: Instant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: venue::Model,
    pub past_shows: Vec<ArtistSlot>,
    pub upcoming_shows: Vec<ArtistSlot>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: artist::Model,
    pub past_shows: Vec<VenueSlot>,
    pub upcoming_shows: Vec<VenueSlot>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowListing {
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: Instant,
}

/// Case-insensitive "contains" on a text column. The term is matched as
/// given: surrounding whitespace is significant and LIKE wildcards match
/// literally. Both sides are folded with the backend's `LOWER`, so non-ASCII
/// case folding follows the backend (ASCII-only on SQLite).
fn name_contains(col: impl IntoColumnRef, term: &str) -> SimpleExpr {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    let pattern = SimpleExpr::Binary(
        Box::new(Func::lower(Expr::val(format!("%{escaped}%"))).into()),
        BinOper::Escape,
        Box::new(SimpleExpr::Constant('\\'.into())),
    );
    Expr::expr(Func::lower(Expr::col(col))).binary(BinOper::Like, pattern)
}

/// Upcoming show counts keyed by `key` (venue or artist id), in one grouped
/// query. Ids without upcoming shows are absent from the map.
async fn upcoming_counts<C>(
    db: &C,
    key: show::Column,
    ids: Option<&[i32]>,
    now: Instant,
) -> Result<HashMap<i32, u64>, BookingError>
where
    C: ConnectionTrait,
{
    let mut select = show::Entity::find()
        .select_only()
        .column(key)
        .column_as(show::Column::Id.count(), "upcoming")
        .filter(Window::Upcoming.condition(now));
    if let Some(ids) = ids {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        select = select.filter(key.is_in(ids.iter().copied()));
    }

    let rows: Vec<(i32, i64)> = select.group_by(key).into_tuple().all(db).await?;
    Ok(rows
        .into_iter()
        .map(|(id, n)| (id, u64::try_from(n).unwrap_or(0)))
        .collect())
}

/// GET /venues: venues grouped by (city, state), ordered by state.
pub async fn venue_areas<C>(db: &C, now: Instant) -> Result<Vec<VenueArea>, BookingError>
where
    C: ConnectionTrait,
{
    let now = to_utc(now);
    let venues = venue::Entity::find()
        .order_by_asc(venue::Column::State)
        .order_by_asc(venue::Column::City)
        .order_by_asc(venue::Column::Id)
        .all(db)
        .await?;
    let counts = upcoming_counts(db, show::Column::VenueId, None, now).await?;

    // Sorted by (state, city), so equal pairs are adjacent
    let mut areas: Vec<VenueArea> = Vec::new();
    for v in venues {
        let listing = Listing {
            id: v.id,
            name: v.name,
            num_upcoming_shows: counts.get(&v.id).copied().unwrap_or(0),
        };
        match areas.last_mut() {
            Some(area) if area.city == v.city && area.state == v.state => {
                area.venues.push(listing)
            }
            _ => areas.push(VenueArea {
                city: v.city,
                state: v.state,
                venues: vec![listing],
            }),
        }
    }
    Ok(areas)
}

/// GET /artists
pub async fn artist_list<C>(db: &C) -> Result<Vec<ArtistEntry>, BookingError>
where
    C: ConnectionTrait,
{
    let artists = artist::Entity::find()
        .order_by_asc(artist::Column::Name)
        .order_by_asc(artist::Column::Id)
        .all(db)
        .await?;
    Ok(artists
        .into_iter()
        .map(|a| ArtistEntry {
            id: a.id,
            name: a.name,
        })
        .collect())
}

pub async fn search_venues<C>(
    db: &C,
    term: &str,
    now: Instant,
) -> Result<SearchResults, BookingError>
where
    C: ConnectionTrait,
{
    let now = to_utc(now);
    let matches = venue::Entity::find()
        .filter(name_contains((venue::Entity, venue::Column::Name), term))
        .order_by_asc(venue::Column::Id)
        .all(db)
        .await?;
    let ids: Vec<i32> = matches.iter().map(|v| v.id).collect();
    let counts = upcoming_counts(db, show::Column::VenueId, Some(&ids), now).await?;

    Ok(SearchResults::new(
        matches
            .into_iter()
            .map(|v| Listing {
                num_upcoming_shows: counts.get(&v.id).copied().unwrap_or(0),
                id: v.id,
                name: v.name,
            })
            .collect(),
    ))
}

pub async fn search_artists<C>(
    db: &C,
    term: &str,
    now: Instant,
) -> Result<SearchResults, BookingError>
where
    C: ConnectionTrait,
{
    let now = to_utc(now);
    let matches = artist::Entity::find()
        .filter(name_contains((artist::Entity, artist::Column::Name), term))
        .order_by_asc(artist::Column::Id)
        .all(db)
        .await?;
    let ids: Vec<i32> = matches.iter().map(|a| a.id).collect();
    let counts = upcoming_counts(db, show::Column::ArtistId, Some(&ids), now).await?;

    Ok(SearchResults::new(
        matches
            .into_iter()
            .map(|a| Listing {
                num_upcoming_shows: counts.get(&a.id).copied().unwrap_or(0),
                id: a.id,
                name: a.name,
            })
            .collect(),
    ))
}

pub async fn find_venue<C>(db: &C, id: i32) -> Result<venue::Model, BookingError>
where
    C: ConnectionTrait,
{
    venue::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| BookingError::not_found(format!("venue {id}")))
}

pub async fn find_artist<C>(db: &C, id: i32) -> Result<artist::Model, BookingError>
where
    C: ConnectionTrait,
{
    artist::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| BookingError::not_found(format!("artist {id}")))
}

async fn venue_shows<C>(
    db: &C,
    venue_id: i32,
    window: Window,
    now: Instant,
) -> Result<Vec<ArtistSlot>, BookingError>
where
    C: ConnectionTrait,
{
    let rows = show::Entity::find()
        .find_also_related(artist::Entity)
        .filter(show::Column::VenueId.eq(venue_id))
        .filter(window.condition(now))
        .order_by_asc(show::Column::StartTime)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(s, a)| {
            a.map(|a| ArtistSlot {
                artist_id: a.id,
                artist_name: a.name,
                artist_image_link: a.image_link,
                start_time: s.start_time,
            })
        })
        .collect())
}

async fn artist_shows<C>(
    db: &C,
    artist_id: i32,
    window: Window,
    now: Instant,
) -> Result<Vec<VenueSlot>, BookingError>
where
    C: ConnectionTrait,
{
    let rows = show::Entity::find()
        .find_also_related(venue::Entity)
        .filter(show::Column::ArtistId.eq(artist_id))
        .filter(window.condition(now))
        .order_by_asc(show::Column::StartTime)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(s, v)| {
            v.map(|v| VenueSlot {
                venue_id: v.id,
                venue_name: v.name,
                venue_image_link: v.image_link,
                start_time: s.start_time,
            })
        })
        .collect())
}

/// GET /venues/{id}. An empty venue table is reported as not found before
/// the id is looked up.
pub async fn venue_detail<C>(db: &C, id: i32, now: Instant) -> Result<VenueDetail, BookingError>
where
    C: ConnectionTrait,
{
    let now = to_utc(now);
    if venue::Entity::find().count(db).await? == 0 {
        return Err(BookingError::not_found("no venues listed"));
    }
    let venue = find_venue(db, id).await?;
    let upcoming_shows = venue_shows(db, id, Window::Upcoming, now).await?;
    let past_shows = venue_shows(db, id, Window::Past, now).await?;

    Ok(VenueDetail {
        venue,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    })
}

/// GET /artists/{id}. Same empty-table rule as [`venue_detail`].
pub async fn artist_detail<C>(
    db: &C,
    id: i32,
    now: Instant,
) -> Result<ArtistDetail, BookingError>
where
    C: ConnectionTrait,
{
    let now = to_utc(now);
    if artist::Entity::find().count(db).await? == 0 {
        return Err(BookingError::not_found("no artists listed"));
    }
    let artist = find_artist(db, id).await?;
    let upcoming_shows = artist_shows(db, id, Window::Upcoming, now).await?;
    let past_shows = artist_shows(db, id, Window::Past, now).await?;

    Ok(ArtistDetail {
        artist,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    })
}

/// GET /shows: every show by start time, with venue and artist names loaded
/// in one batched lookup each.
pub async fn show_list<C>(db: &C) -> Result<Vec<ShowListing>, BookingError>
where
    C: ConnectionTrait,
{
    let shows = show::Entity::find()
        .order_by_asc(show::Column::StartTime)
        .order_by_asc(show::Column::Id)
        .all(db)
        .await?;
    if shows.is_empty() {
        return Ok(vec![]);
    }

    let venue_ids: BTreeSet<i32> = shows.iter().map(|s| s.venue_id).collect();
    let artist_ids: BTreeSet<i32> = shows.iter().map(|s| s.artist_id).collect();

    let venues: HashMap<i32, venue::Model> = venue::Entity::find()
        .filter(venue::Column::Id.is_in(venue_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|v| (v.id, v))
        .collect();
    let artists: HashMap<i32, artist::Model> = artist::Entity::find()
        .filter(artist::Column::Id.is_in(artist_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|a| (a.id, a))
        .collect();

    Ok(shows
        .into_iter()
        .filter_map(|s| {
            let v = venues.get(&s.venue_id)?;
            let a = artists.get(&s.artist_id)?;
            Some(ShowListing {
                venue_id: v.id,
                venue_name: v.name.clone(),
                artist_id: a.id,
                artist_name: a.name.clone(),
                artist_image_link: a.image_link.clone(),
                start_time: s.start_time,
            })
        })
        .collect())
}
